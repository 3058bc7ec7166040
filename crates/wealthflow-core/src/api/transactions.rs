use crate::models::{Transaction, TransactionCreate, TransactionFilter, TransactionUpdate};

use super::{ApiError, Transport};

pub struct TransactionsApi<'a> {
    transport: &'a Transport,
}

impl<'a> TransactionsApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    /// List transactions; unset filter fields are not sent.
    pub async fn list(&self, filter: &TransactionFilter) -> Result<Vec<Transaction>, ApiError> {
        self.transport.get_with_query("/transactions/", filter).await
    }

    pub async fn get(&self, id: i64) -> Result<Transaction, ApiError> {
        self.transport.get(&format!("/transactions/{}", id)).await
    }

    pub async fn create(&self, transaction: &TransactionCreate) -> Result<Transaction, ApiError> {
        self.transport.post("/transactions/", transaction).await
    }

    pub async fn update(
        &self,
        id: i64,
        patch: &TransactionUpdate,
    ) -> Result<Transaction, ApiError> {
        self.transport.put(&format!("/transactions/{}", id), patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.transport.delete(&format!("/transactions/{}", id)).await
    }
}
