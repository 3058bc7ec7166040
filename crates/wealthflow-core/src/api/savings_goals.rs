use crate::models::{SavingsGoal, SavingsGoalCreate, SavingsGoalUpdate, SavingsGoalWithProgress};

use super::{ApiError, Transport};

pub struct SavingsGoalsApi<'a> {
    transport: &'a Transport,
}

impl<'a> SavingsGoalsApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<SavingsGoalWithProgress>, ApiError> {
        self.transport.get("/savings-goals/").await
    }

    pub async fn get(&self, id: i64) -> Result<SavingsGoalWithProgress, ApiError> {
        self.transport.get(&format!("/savings-goals/{}", id)).await
    }

    pub async fn create(&self, goal: &SavingsGoalCreate) -> Result<SavingsGoal, ApiError> {
        self.transport.post("/savings-goals/", goal).await
    }

    pub async fn update(
        &self,
        id: i64,
        patch: &SavingsGoalUpdate,
    ) -> Result<SavingsGoal, ApiError> {
        self.transport.put(&format!("/savings-goals/{}", id), patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.transport.delete(&format!("/savings-goals/{}", id)).await
    }
}
