//! Money fields.
//!
//! The backend stores amounts as `Decimal`, which reaches the wire either as
//! a JSON number or as a decimal string depending on the serializer. Both are
//! accepted here and decoded into `f64`.

use serde::de;

struct AmountVisitor;

impl<'de> de::Visitor<'de> for AmountVisitor {
    type Value = f64;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("a number or a decimal string")
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E> {
        Ok(v)
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E> {
        Ok(v as f64)
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        v.trim()
            .parse::<f64>()
            .map_err(|_| E::invalid_value(de::Unexpected::Str(v), &self))
    }
}

struct OptionalAmountVisitor;

impl<'de> de::Visitor<'de> for OptionalAmountVisitor {
    type Value = Option<f64>;

    fn expecting(&self, formatter: &mut std::fmt::Formatter) -> std::fmt::Result {
        formatter.write_str("null, a number or a decimal string")
    }

    fn visit_none<E>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        deserializer.deserialize_any(AmountVisitor).map(Some)
    }
}

pub(crate) fn deserialize_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: de::Deserializer<'de>,
{
    deserializer.deserialize_any(AmountVisitor)
}

pub(crate) fn deserialize_optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: de::Deserializer<'de>,
{
    deserializer.deserialize_option(OptionalAmountVisitor)
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        #[serde(deserialize_with = "super::deserialize_amount")]
        amount: f64,
        #[serde(default, deserialize_with = "super::deserialize_optional_amount")]
        price: Option<f64>,
    }

    #[test]
    fn test_amount_from_number_or_string() {
        let row: Row = serde_json::from_str(r#"{"amount": 12.5, "price": "3.25"}"#).unwrap();
        assert_eq!(row.amount, 12.5);
        assert_eq!(row.price, Some(3.25));

        let row: Row = serde_json::from_str(r#"{"amount": "1500.00", "price": null}"#).unwrap();
        assert_eq!(row.amount, 1500.0);
        assert_eq!(row.price, None);

        let row: Row = serde_json::from_str(r#"{"amount": 7}"#).unwrap();
        assert_eq!(row.amount, 7.0);
        assert_eq!(row.price, None);
    }

    #[test]
    fn test_amount_rejects_garbage() {
        assert!(serde_json::from_str::<Row>(r#"{"amount": "twelve"}"#).is_err());
        assert!(serde_json::from_str::<Row>(r#"{"amount": true}"#).is_err());
    }
}
