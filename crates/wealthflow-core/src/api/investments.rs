use crate::models::{
    Investment, InvestmentCreate, InvestmentUpdate, InvestmentWithRoi, PortfolioSummary,
};

use super::{ApiError, Transport};

pub struct InvestmentsApi<'a> {
    transport: &'a Transport,
}

impl<'a> InvestmentsApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<InvestmentWithRoi>, ApiError> {
        self.transport.get("/investments/").await
    }

    /// Portfolio totals grouped by asset type
    pub async fn summary(&self) -> Result<PortfolioSummary, ApiError> {
        self.transport.get("/investments/summary").await
    }

    pub async fn get(&self, id: i64) -> Result<InvestmentWithRoi, ApiError> {
        self.transport.get(&format!("/investments/{}", id)).await
    }

    pub async fn create(&self, investment: &InvestmentCreate) -> Result<Investment, ApiError> {
        self.transport.post("/investments/", investment).await
    }

    pub async fn update(&self, id: i64, patch: &InvestmentUpdate) -> Result<Investment, ApiError> {
        self.transport.put(&format!("/investments/{}", id), patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.transport.delete(&format!("/investments/{}", id)).await
    }
}
