use crate::models::Insight;

use super::{ApiError, Transport};

/// Textual insights generated server-side.
pub struct InsightsApi<'a> {
    transport: &'a Transport,
}

impl<'a> InsightsApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Insight>, ApiError> {
        self.transport.get("/insights/").await
    }
}
