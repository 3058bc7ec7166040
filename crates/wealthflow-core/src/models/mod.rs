//! Data models for WealthFlow entities.
//!
//! Shapes mirror the backend schemas:
//!
//! - `User`, `TokenResponse`, `RegisterRequest`: authentication
//! - `Account`, `Category`, `Transaction`: ledger data
//! - `Budget`, `BudgetWithSpending`: budgets and their server-computed status
//! - `Investment`, `InvestmentWithRoi`, `PortfolioSummary`: holdings
//! - `SavingsGoal`, `SavingsGoalWithProgress`: goals
//! - `DashboardSummary`, `Insight`: read-only aggregates
//!
//! `*Create` types are POST bodies, `*Update` types are partial PUT bodies.

mod amount;

pub mod account;
pub mod budget;
pub mod category;
pub mod dashboard;
pub mod insight;
pub mod investment;
pub mod savings_goal;
pub mod transaction;
pub mod user;

pub use account::{Account, AccountCreate, AccountUpdate};
pub use budget::{Budget, BudgetCreate, BudgetStatus, BudgetUpdate, BudgetWithSpending};
pub use category::Category;
pub use dashboard::{DashboardSummary, ExpenseByCategory, RecentTransaction};
pub use insight::{Insight, InsightKind};
pub use investment::{
    AssetTypeTotals, Investment, InvestmentCreate, InvestmentUpdate, InvestmentWithRoi,
    PortfolioSummary,
};
pub use savings_goal::{SavingsGoal, SavingsGoalCreate, SavingsGoalUpdate, SavingsGoalWithProgress};
pub use transaction::{Transaction, TransactionCreate, TransactionFilter, TransactionUpdate};
pub use user::{RegisterRequest, TokenResponse, User};
