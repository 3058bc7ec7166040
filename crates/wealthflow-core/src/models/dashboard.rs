use serde::{Deserialize, Serialize};

use super::amount::deserialize_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct DashboardSummary {
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_balance: f64,
    pub total_accounts: i64,
    pub total_transactions: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_budget: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_spent: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub budget_remaining: f64,
    #[serde(default)]
    pub recent_transactions: Vec<RecentTransaction>,
    #[serde(default)]
    pub expense_by_category: Vec<ExpenseByCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct RecentTransaction {
    pub id: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub description: String,
    pub transaction_type: String,
    pub transaction_date: String,
    #[serde(default)]
    pub merchant: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct ExpenseByCategory {
    pub category_name: String,
    #[serde(default)]
    pub category_icon: String,
    #[serde(default)]
    pub category_color: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: f64,
}
