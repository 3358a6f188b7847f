//! Booking assignment endpoints

use crate::client::SpinovoClient;
use crate::endpoints::bookings::{AssignBookingRequest, AssignBookingResponse, Booking};
use crate::endpoints::copilots::Copilot;
use crate::endpoints::customers::Address;
use crate::endpoints::paged;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Assignments API interface
#[derive(Debug, Clone)]
pub struct AssignmentsApi {
    client: SpinovoClient,
}

impl AssignmentsApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/assign/list?page=&limit=
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<ApiEnvelope<AssignBookingListData>> {
        self.client.get(&paged("/admin/assign/list", page, limit)).await
    }

    /// POST /admin/booking/assign
    pub async fn assign(
        &self,
        request: &AssignBookingRequest,
    ) -> ApiResult<ApiEnvelope<AssignBookingResponse>> {
        request.validate()?;
        self.client.post("/admin/booking/assign", request).await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignBooking {
    #[serde(rename = "_id")]
    pub id: String,
    pub booking_id: String,
    pub copilot_id: String,
    pub status: i64,
    pub order_details: Option<Booking>,
    pub address_details: Option<Address>,
    pub copilot_details: Option<Copilot>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssignBookingListData {
    pub total_count: u64,
    pub current_page: u32,
    pub total_pages: u32,
    pub assign_list: Vec<AssignBooking>,
}
