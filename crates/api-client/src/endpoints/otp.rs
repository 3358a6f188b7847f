//! OTP request log endpoint

use crate::client::SpinovoClient;
use crate::endpoints::paged;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// OTP log API interface
#[derive(Debug, Clone)]
pub struct OtpApi {
    client: SpinovoClient,
}

impl OtpApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/customer/otpreques?page=&limit=
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<ApiEnvelope<OtpRequestListData>> {
        self.client
            .get(&paged("/admin/customer/otpreques", page, limit))
            .await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpRequest {
    #[serde(rename = "_id")]
    pub id: String,
    pub mobile_no: String,
    pub otp_code: String,
    /// `signup`, `login`, `forgot` or `verify`
    pub otp_request: String,
    pub otp_send_response: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OtpRequestListData {
    #[serde(rename = "totalOtpRequest")]
    pub total_otp_request: u64,
    pub total_pages: u32,
    pub page: u32,
    #[serde(rename = "otpList")]
    pub otp_list: Vec<OtpRequest>,
}
