//! Copilot endpoints
//!
//! Copilots are the field staff bookings are assigned to.

use crate::client::SpinovoClient;
use crate::endpoints::paged;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use spinovo_core::validation::{PASSWORD_LENGTH, Validator, require_id, sanitize_name};

/// Copilots API interface
#[derive(Debug, Clone)]
pub struct CopilotsApi {
    client: SpinovoClient,
}

impl CopilotsApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/copilot/list?page=&limit=
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<ApiEnvelope<CopilotListData>> {
        self.client.get(&paged("/admin/copilot/list", page, limit)).await
    }

    /// GET /admin/copilot/profile/{id}
    pub async fn details(&self, copilot_id: &str) -> ApiResult<ApiEnvelope<CopilotDetailsData>> {
        require_id("copilot", copilot_id)?;
        self.client
            .get(&format!("/admin/copilot/profile/{}", copilot_id.trim()))
            .await
    }

    /// POST /admin/copilot/create
    pub async fn create(
        &self,
        request: &CreateCopilotRequest,
    ) -> ApiResult<ApiEnvelope<CreateCopilotResponse>> {
        request.validate()?;
        let request = CreateCopilotRequest {
            name: sanitize_name(&request.name),
            mobile: request.mobile.trim().to_string(),
            password: request.password.clone(),
        };
        self.client.post("/admin/copilot/create", &request).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Copilot {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub profile_pic: String,
    pub city_id: i64,
    pub role: i64,
    pub status: i64,
    pub is_deleted: i64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopilotListData {
    #[serde(rename = "copilotTotal")]
    pub copilot_total: u64,
    pub total_pages: u32,
    pub page: u32,
    #[serde(rename = "copilotList")]
    pub copilot_list: Vec<Copilot>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CopilotDetailsData {
    #[serde(rename = "copilotUser")]
    pub copilot_user: Option<Copilot>,
}

/// New copilot account
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CreateCopilotRequest {
    pub name: String,
    pub mobile: String,
    pub password: String,
}

impl std::fmt::Debug for CreateCopilotRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreateCopilotRequest")
            .field("name", &self.name)
            .field("mobile", &self.mobile)
            .finish_non_exhaustive()
    }
}

impl CreateCopilotRequest {
    pub fn validate(&self) -> ApiResult<()> {
        Validator::new()
            .required("name", &self.name)
            .min_length("name", self.name.trim(), 2)
            .mobile("mobile", self.mobile.trim())
            .min_length("password", &self.password, PASSWORD_LENGTH.0)
            .max_length("password", &self.password, PASSWORD_LENGTH.1)
            .validate()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreateCopilotResponse {
    pub user: Option<Copilot>,
}
