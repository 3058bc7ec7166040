use crate::models::DashboardSummary;

use super::{ApiError, Transport};

/// Balances, budget totals, recent transactions and spend per category.
pub struct DashboardApi<'a> {
    transport: &'a Transport,
}

impl<'a> DashboardApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn summary(&self) -> Result<DashboardSummary, ApiError> {
        self.transport.get("/dashboard/summary").await
    }
}
