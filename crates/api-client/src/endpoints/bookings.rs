//! Booking endpoints

use crate::client::SpinovoClient;
use crate::endpoints::customers::{Address, Customer};
use crate::endpoints::paged;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use spinovo_core::validation::{Validator, require_id};

/// Bookings API interface
#[derive(Debug, Clone)]
pub struct BookingsApi {
    client: SpinovoClient,
}

impl BookingsApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/booking/list?page=&limit=
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<ApiEnvelope<BookingListData>> {
        self.client.get(&paged("/admin/booking/list", page, limit)).await
    }

    /// GET /admin/booking/details/{id}
    pub async fn details(&self, booking_id: &str) -> ApiResult<ApiEnvelope<BookingDetailsData>> {
        require_id("booking", booking_id)?;
        self.client
            .get(&format!("/admin/booking/details/{}", booking_id.trim()))
            .await
    }

    /// Hand a booking to a copilot
    ///
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
pub struct Booking {
    #[serde(rename = "_id")]
    pub id: String,
    pub customer_id: String,
    pub order_no: u64,
    pub order_display_no: String,
    pub order_stage_id: i64,
    pub order_type: String,
    pub service_id: i64,
    pub service_name: String,
    pub garment_qty: u32,
    pub garment_original_amount: f64,
    pub garment_discount_amount: f64,
    pub service_charges: f64,
    pub slot_charges: f64,
    pub order_amount: f64,
    pub transaction_id: String,
    pub booking_date: String,
    pub booking_time: String,
    pub address_id: String,
    pub ord_status: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingListData {
    #[serde(rename = "totalOrders")]
    pub total_orders: u64,
    pub total_pages: u32,
    pub page: u32,
    #[serde(rename = "bookingList")]
    pub booking_list: Vec<Booking>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BookingDetailsData {
    pub order: Option<Booking>,
    pub customer: Option<Customer>,
    pub address: Option<Address>,
}

/// Booking to copilot assignment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssignBookingRequest {
    pub booking_id: String,
    pub copilot_id: String,
}

impl AssignBookingRequest {
    pub fn new(booking_id: impl Into<String>, copilot_id: impl Into<String>) -> Self {
        Self {
            booking_id: booking_id.into(),
            copilot_id: copilot_id.into(),
        }
    }

    pub fn validate(&self) -> ApiResult<()> {
        Validator::new()
            .required("booking_id", &self.booking_id)
            .required("copilot_id", &self.copilot_id)
            .validate()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignBookingResponse {
    pub assign_id: String,
}
