use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::amount::{deserialize_amount, deserialize_optional_amount};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Investment {
    pub id: i64,
    pub user_id: i64,
    pub asset_type: String,
    pub symbol: String,
    #[serde(deserialize_with = "deserialize_amount")]
    pub quantity: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub purchase_price: f64,
    #[serde(default, deserialize_with = "deserialize_optional_amount")]
    pub current_price: Option<f64>,
    pub purchase_date: String,
    pub created_at: String,
    pub updated_at: String,
}

/// An investment with return figures computed by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct InvestmentWithRoi {
    #[serde(flatten)]
    pub investment: Investment,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_cost: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_value: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub profit_loss: f64,
    pub roi_percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct AssetTypeTotals {
    pub count: i64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct PortfolioSummary {
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_invested: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub current_value: f64,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total_profit_loss: f64,
    pub roi_percentage: f64,
    #[serde(default)]
    pub investments_by_type: HashMap<String, AssetTypeTotals>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct InvestmentCreate {
    pub asset_type: String,
    pub symbol: String,
    pub quantity: f64,
    pub purchase_price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<f64>,
    pub purchase_date: NaiveDateTime,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct InvestmentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asset_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_price: Option<f64>,
    /// `Some(None)` clears the price
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_price: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub purchase_date: Option<NaiveDateTime>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_portfolio_summary_groups() {
        let json = r#"{
            "total_invested": "1000.00",
            "current_value": 1100,
            "total_profit_loss": 100.0,
            "roi_percentage": 10.0,
            "investments_by_type": {
                "stock": {"count": 2, "total_value": 800.0},
                "crypto": {"count": 1, "total_value": "300.00"}
            }
        }"#;
        let summary: PortfolioSummary = serde_json::from_str(json).unwrap();
        assert_eq!(summary.total_invested, 1000.0);
        assert_eq!(summary.investments_by_type.len(), 2);
        assert_eq!(summary.investments_by_type["crypto"].total_value, 300.0);
    }

    #[test]
    fn test_investment_with_roi_missing_price() {
        let json = r#"{
            "id": 1, "user_id": 1, "asset_type": "stock", "symbol": "AAPL",
            "quantity": "10.00000000", "purchase_price": "150.00", "current_price": null,
            "purchase_date": "2024-01-01T00:00:00",
            "created_at": "2024-01-01T00:00:00", "updated_at": "2024-01-01T00:00:00",
            "total_cost": 1500.0, "current_value": 1500.0, "profit_loss": 0.0, "roi_percentage": 0.0
        }"#;
        let inv: InvestmentWithRoi = serde_json::from_str(json).unwrap();
        assert_eq!(inv.investment.quantity, 10.0);
        assert_eq!(inv.investment.current_price, None);
    }
}
