use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::amount::deserialize_amount;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Budget {
    pub id: i64,
    pub user_id: i64,
    pub category_id: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub amount: f64,
    pub period: String,
    pub alert_threshold: f64,
    pub start_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// Spending state computed by the backend against `alert_threshold`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    Ok,
    Warning,
    Exceeded,
}

impl std::fmt::Display for BudgetStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BudgetStatus::Ok => write!(f, "OK"),
            BudgetStatus::Warning => write!(f, "Warning"),
            BudgetStatus::Exceeded => write!(f, "Exceeded"),
        }
    }
}

/// `GET /budgets/` and `GET /budgets/{id}` return budgets with their spending.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BudgetWithSpending {
    #[serde(flatten)]
    pub budget: Budget,
    #[serde(deserialize_with = "deserialize_amount")]
    pub spent: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub remaining: f64,
    pub percentage: f64,
    pub status: BudgetStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BudgetCreate {
    pub category_id: i64,
    pub amount: f64,
    pub period: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<f64>,
    pub start_date: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct BudgetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alert_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDateTime>,
}
