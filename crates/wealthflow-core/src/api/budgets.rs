use crate::models::{Budget, BudgetCreate, BudgetUpdate, BudgetWithSpending};

use super::{ApiError, Transport};

/// Reads come back with spending figures; writes return the bare budget.
pub struct BudgetsApi<'a> {
    transport: &'a Transport,
}

impl<'a> BudgetsApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<BudgetWithSpending>, ApiError> {
        self.transport.get("/budgets/").await
    }

    pub async fn get(&self, id: i64) -> Result<BudgetWithSpending, ApiError> {
        self.transport.get(&format!("/budgets/{}", id)).await
    }

    pub async fn create(&self, budget: &BudgetCreate) -> Result<Budget, ApiError> {
        self.transport.post("/budgets/", budget).await
    }

    pub async fn update(&self, id: i64, patch: &BudgetUpdate) -> Result<Budget, ApiError> {
        self.transport.put(&format!("/budgets/{}", id), patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.transport.delete(&format!("/budgets/{}", id)).await
    }
}
