//! Dashboard endpoint

use crate::client::SpinovoClient;
use crate::endpoints::bookings::Booking;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Dashboard API interface
#[derive(Debug, Clone)]
pub struct DashboardApi {
    client: SpinovoClient,
}

impl DashboardApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/dashboard
    pub async fn get(&self) -> ApiResult<ApiEnvelope<DashboardData>> {
        self.client.get("/admin/dashboard").await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DashboardData {
    pub total_customers: u64,
    pub total_booking: u64,
    pub today_total_booking: u64,
    pub total_revenue: f64,
    pub revenue_growth: f64,
    pub order_growth: f64,
    pub monthly_revenue_overview: Vec<MonthlyRevenue>,
    #[serde(rename = "TodayBookingList")]
    pub today_booking_list: Vec<Booking>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyRevenue {
    pub month: String,
    pub value: f64,
}
