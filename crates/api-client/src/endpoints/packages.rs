//! Subscription package endpoints
//!
//! A package holds validity plans (a duration in days), each of which holds
//! sub plans (garment count, price, pickups).

use crate::client::SpinovoClient;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use spinovo_core::validation::{Validator, require_id, sanitize_string};

/// Packages API interface
#[derive(Debug, Clone)]
pub struct PackagesApi {
    client: SpinovoClient,
}

impl PackagesApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/package/list
    pub async fn list(&self) -> ApiResult<ApiEnvelope<PackageListData>> {
        self.client.get("/admin/package/list").await
    }

    /// POST /admin/package/create
    pub async fn create(&self, name: &str) -> ApiResult<ApiEnvelope<PackageCreateData>> {
        let name = sanitize_string(name);
        Validator::new().required("name", &name).validate()?;
        self.client
            .post("/admin/package/create", &json!({ "name": name }))
            .await
    }

    /// POST /admin/package/create/{pkg}/validity
    pub async fn create_validity_plan(
        &self,
        package_id: &str,
        plan_id: u32,
        validity: u32,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("package", package_id)?;
        self.client
            .post(
                &format!("/admin/package/create/{}/validity", package_id.trim()),
                &json!({ "plan_id": plan_id, "validity": validity }),
            )
            .await
    }

    /// POST /admin/package/create/{pkg}/plan/{plan}/subplan
    pub async fn create_sub_plan(
        &self,
        package_id: &str,
        plan_id: &str,
        request: &SubPlanRequest,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("package", package_id)?;
        require_id("plan", plan_id)?;
        request.validate()?;
        self.client
            .post(
                &format!(
                    "/admin/package/create/{}/plan/{}/subplan",
                    package_id.trim(),
                    plan_id.trim()
                ),
                request,
            )
            .await
    }

    /// DELETE /admin/package/delete/{pkg}/plan/{plan}/subplan/{sub}
    pub async fn delete_sub_plan(
        &self,
        package_id: &str,
        plan_id: &str,
        sub_plan_id: &str,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("package", package_id)?;
        require_id("plan", plan_id)?;
        require_id("sub plan", sub_plan_id)?;
        self.client
            .delete(&format!(
                "/admin/package/delete/{}/plan/{}/subplan/{}",
                package_id.trim(),
                plan_id.trim(),
                sub_plan_id.trim()
            ))
            .await
    }

    /// DELETE /admin/package/delete/{pkg}/plan/{plan}
    pub async fn delete_validity_plan(
        &self,
        package_id: &str,
        plan_id: &str,
    ) -> ApiResult<ApiEnvelope<Value>> {
        require_id("package", package_id)?;
        require_id("plan", plan_id)?;
        self.client
            .delete(&format!(
                "/admin/package/delete/{}/plan/{}",
                package_id.trim(),
                plan_id.trim()
            ))
            .await
    }

    /// DELETE /admin/package/delete/{pkg}
    pub async fn delete(&self, package_id: &str) -> ApiResult<ApiEnvelope<Value>> {
        require_id("package", package_id)?;
        self.client
            .delete(&format!("/admin/package/delete/{}", package_id.trim()))
            .await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SubPlan {
    #[serde(rename = "_id")]
    pub id: String,
    /// Number or string depending on when the plan was created
    pub sub_plan_id: Value,
    pub clothes: u32,
    pub prices: f64,
    pub discount_rate: f64,
    pub no_of_pickups: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidityPlan {
    #[serde(rename = "_id")]
    pub id: String,
    pub plan_id: u32,
    /// Days
    pub validity: u32,
    pub sub_plan: Vec<SubPlan>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Package {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub plan: Vec<ValidityPlan>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageListData {
    pub count: u64,
    pub data: Vec<Package>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PackageCreateData {
    pub data: Option<Package>,
}

/// New sub plan under a validity plan
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubPlanRequest {
    pub sub_plan_id: u32,
    pub clothes: u32,
    pub discount_rate: f64,
    pub prices: f64,
    pub no_of_pickups: u32,
}

impl SubPlanRequest {
    pub fn validate(&self) -> ApiResult<()> {
        Validator::new()
            .non_negative("discount_rate", self.discount_rate)
            .non_negative("prices", self.prices)
            .validate()
    }
}
