//! Customer endpoints

use crate::client::SpinovoClient;
use crate::endpoints::bookings::Booking;
use crate::endpoints::otp::OtpRequest;
use crate::endpoints::paged;
use crate::endpoints::transactions::Transaction;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};
use spinovo_core::validation::require_id;

/// Customers API interface
#[derive(Debug, Clone)]
pub struct CustomersApi {
    client: SpinovoClient,
}

impl CustomersApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/customer/list?page=&limit=
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<ApiEnvelope<CustomerListData>> {
        self.client.get(&paged("/admin/customer/list", page, limit)).await
    }

    /// GET /admin/customer/details/{id}
    pub async fn details(&self, customer_id: &str) -> ApiResult<ApiEnvelope<CustomerDetailsData>> {
        require_id("customer", customer_id)?;
        self.client
            .get(&format!("/admin/customer/details/{}", customer_id.trim()))
            .await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Customer {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub wallet_balance: f64,
    pub spinovo_bonus: f64,
    #[serde(rename = "familly_member")]
    pub family_members: u32,
    pub living_type: String,
    pub gender: String,
    pub dob: String,
    pub profile_pic: String,
    pub city_id: i64,
    #[serde(rename = "isActive")]
    pub is_active: bool,
    #[serde(rename = "lastActive")]
    pub last_active: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    #[serde(rename = "_id")]
    pub id: String,
    pub customer_id: String,
    pub address_type: String,
    pub address_label: String,
    pub flat_no: String,
    pub street: String,
    pub landmark: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
    pub format_address: String,
    #[serde(rename = "isPrimary")]
    pub is_primary: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerListData {
    #[serde(rename = "totalCustomers")]
    pub total_customers: u64,
    pub total_pages: u32,
    pub page: u32,
    #[serde(rename = "customerList")]
    pub customer_list: Vec<Customer>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerDetailsData {
    pub user: Option<Customer>,
    pub orders: Vec<Booking>,
    pub transactions: Vec<Transaction>,
    pub addresses: Vec<Address>,
    pub otps: Vec<OtpRequest>,
}

#[cfg(test)]
mod tests {
    use crate::endpoints::test_support::{ok, signed_in};
    use serde_json::json;
    use spinovo_core::error::ErrorKind;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer};

    #[tokio::test]
    async fn test_list_clamps_pagination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/customer/list"))
            .and(query_param("page", "1"))
            .and(query_param("limit", "100"))
            .respond_with(ok(json!({
                "totalCustomers": 1,
                "total_pages": 1,
                "page": 1,
                "customerList": [{"_id": "c1", "name": "Ravi", "wallet_balance": 12.5}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let data = signed_in(&server)
            .customers()
            .list(0, 1000)
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(data.customer_list.len(), 1);
        assert_eq!(data.customer_list[0].wallet_balance, 12.5);
    }

    #[tokio::test]
    async fn test_details_rejects_bad_ids_locally() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ok(json!({})))
            .expect(0)
            .mount(&server)
            .await;

        let customers = signed_in(&server).customers();
        for bad in ["", "undefined", "null"] {
            let err = customers.details(bad).await.unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation);
            assert_eq!(err.message(), "Invalid customer ID provided");
        }
    }

    #[tokio::test]
    async fn test_details_decodes() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/customer/details/c1"))
            .respond_with(ok(json!({
                "user": {"_id": "c1", "name": "Ravi"},
                "addresses": [{"_id": "a1", "isPrimary": true}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let data = signed_in(&server)
            .customers()
            .details("c1")
            .await
            .unwrap()
            .into_data()
            .unwrap();
        assert_eq!(data.user.unwrap().name, "Ravi");
        assert!(data.addresses[0].is_primary);
        assert!(data.orders.is_empty());
    }
}
