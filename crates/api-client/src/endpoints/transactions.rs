//! Wallet transaction endpoint

use crate::client::SpinovoClient;
use crate::endpoints::paged;
use crate::envelope::ApiEnvelope;
use crate::error::ApiResult;
use serde::{Deserialize, Serialize};

/// Transactions API interface
#[derive(Debug, Clone)]
pub struct TransactionsApi {
    client: SpinovoClient,
}

impl TransactionsApi {
    pub(crate) fn new(client: SpinovoClient) -> Self {
        Self { client }
    }

    /// GET /admin/customer/transactions?page=&limit=
    pub async fn list(&self, page: u32, limit: u32) -> ApiResult<ApiEnvelope<TransactionListData>> {
        self.client
            .get(&paged("/admin/customer/transactions", page, limit))
            .await
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Transaction {
    #[serde(rename = "_id")]
    pub id: String,
    pub customer_id: String,
    pub transaction_id: String,
    pub wallet_type: String,
    pub amount: f64,
    /// `credit` or `debit`
    pub transaction_type: String,
    pub reason: String,
    pub message: String,
    pub status: i64,
    #[serde(rename = "createdAt")]
    pub created_at: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransactionListData {
    #[serde(rename = "totalTransaction")]
    pub total_transaction: u64,
    pub total_pages: u32,
    pub page: u32,
    #[serde(rename = "transactionList")]
    pub transaction_list: Vec<Transaction>,
}
