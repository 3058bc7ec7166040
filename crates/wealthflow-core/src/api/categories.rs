use crate::models::Category;

use super::accounts::Page;
use super::{ApiError, Transport};

/// System categories plus the user's own. Read-only.
pub struct CategoriesApi<'a> {
    transport: &'a Transport,
}

impl<'a> CategoriesApi<'a> {
    pub fn new(transport: &'a Transport) -> Self {
        Self { transport }
    }

    pub async fn list(&self) -> Result<Vec<Category>, ApiError> {
        self.transport.get("/categories/").await
    }

    pub async fn list_page(&self, page: Page) -> Result<Vec<Category>, ApiError> {
        self.transport.get_with_query("/categories/", &page).await
    }
}
