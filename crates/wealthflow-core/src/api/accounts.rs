use serde::Serialize;

use crate::models::{Account, AccountCreate, AccountUpdate};

use super::{ApiError, Transport};

/// Pass-through pagination for collection endpoints that accept it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Page {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }
}

pub struct AccountsApi<'a> {
    transport: &'a Transport,
}

impl<'a> AccountsApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Account>, ApiError> {
        self.transport.get("/accounts/").await
    }

    pub async fn list_page(&self, page: Page) -> Result<Vec<Account>, ApiError> {
        self.transport.get_with_query("/accounts/", &page).await
    }

    pub async fn get(&self, id: i64) -> Result<Account, ApiError> {
        self.transport.get(&format!("/accounts/{}", id)).await
    }

    pub async fn create(&self, account: &AccountCreate) -> Result<Account, ApiError> {
        self.transport.post("/accounts/", account).await
    }

    pub async fn update(&self, id: i64, patch: &AccountUpdate) -> Result<Account, ApiError> {
        self.transport.put(&format!("/accounts/{}", id), patch).await
    }

    pub async fn delete(&self, id: i64) -> Result<(), ApiError> {
        self.transport.delete(&format!("/accounts/{}", id)).await
    }
}
