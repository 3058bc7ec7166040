//! REST API client module for the WealthFlow backend.
//!
//! `Transport` is the single HTTP path: it signs requests with the stored
//! bearer token and resets the session when the backend answers 401.
//! Resource clients borrow it and map one call to one request:
//!
//! ```ignore
//! let accounts = transport.accounts().list().await?;
//! let recent = transport.transactions().list(&TransactionFilter::new().page(0, 10)).await?;
//! ```

pub mod accounts;
pub mod auth;
pub mod budgets;
pub mod categories;
pub mod dashboard;
pub mod error;
pub mod insights;
pub mod investments;
pub mod savings_goals;
pub mod transactions;
pub mod transport;

pub use accounts::{AccountsApi, Page};
pub use auth::AuthApi;
pub use budgets::BudgetsApi;
pub use categories::CategoriesApi;
pub use dashboard::DashboardApi;
pub use error::ApiError;
pub use insights::InsightsApi;
pub use investments::InvestmentsApi;
pub use savings_goals::SavingsGoalsApi;
pub use transactions::TransactionsApi;
pub use transport::{LoginRedirect, NoRedirect, Transport};

impl Transport {
    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn accounts(&self) -> AccountsApi<'_> {
        AccountsApi::new(self)
    }

    pub fn budgets(&self) -> BudgetsApi<'_> {
        BudgetsApi::new(self)
    }

    pub fn categories(&self) -> CategoriesApi<'_> {
        CategoriesApi::new(self)
    }

    pub fn transactions(&self) -> TransactionsApi<'_> {
        TransactionsApi::new(self)
    }

    pub fn investments(&self) -> InvestmentsApi<'_> {
        InvestmentsApi::new(self)
    }

    pub fn savings_goals(&self) -> SavingsGoalsApi<'_> {
        SavingsGoalsApi::new(self)
    }

    pub fn dashboard(&self) -> DashboardApi<'_> {
        DashboardApi::new(self)
    }

    pub fn insights(&self) -> InsightsApi<'_> {
        InsightsApi::new(self)
    }
}
