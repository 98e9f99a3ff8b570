/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for public market data
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::TradeKind;

/// Response of the public `info` method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeInfo {
    pub server_time: i64,
    pub pairs: BTreeMap<String, PairInfo>,
}

impl ExchangeInfo {
    pub fn server_time_utc(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.server_time, 0)
    }
}

/// Trading limits and precision for one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PairInfo {
    pub decimal_places: u32,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub min_price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub max_price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub min_amount: Decimal,
    #[serde(default, with = "serde_helpers::int_bool")]
    pub hidden: bool,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub fee: Decimal,
}

/// 24h statistics for one pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ticker {
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub high: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub low: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub avg: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub vol: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub vol_cur: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub last: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub buy: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub sell: Decimal,
    pub updated: i64,
}

/// Order book level: `[price, amount]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel(
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub Decimal,
);

impl DepthLevel {
    pub fn price(&self) -> Decimal {
        self.0
    }

    pub fn amount(&self) -> Decimal {
        self.1
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Depth {
    #[serde(default)]
    pub asks: Vec<DepthLevel>,
    #[serde(default)]
    pub bids: Vec<DepthLevel>,
}

impl Depth {
    pub fn best_ask(&self) -> Option<&DepthLevel> {
        self.asks.first()
    }

    pub fn best_bid(&self) -> Option<&DepthLevel> {
        self.bids.first()
    }
}

/// Entry of the public trades feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicTrade {
    #[serde(rename = "type")]
    pub kind: TradeKind,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub price: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount: Decimal,
    pub tid: u64,
    pub timestamp: i64,
}

impl PublicTrade {
    pub fn executed_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }
}

pub(crate) mod serde_helpers {
    use super::Decimal;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;
    use std::str::FromStr;

    fn parse_decimal(raw: &str) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(raw).or_else(|_| Decimal::from_scientific(raw))
    }

    /// Accepts JSON numbers (the exchange's usual encoding) and numeric strings
    pub fn deserialize_decimal<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;

        if let Some(raw) = value.as_str() {
            return parse_decimal(raw.trim()).map_err(serde::de::Error::custom);
        }

        if value.is_number() {
            return parse_decimal(&value.to_string()).map_err(serde::de::Error::custom);
        }

        Err(serde::de::Error::custom("invalid decimal value"))
    }

    pub fn deserialize_optional_decimal<'de, D>(
        deserializer: D,
    ) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        match value {
            Value::Null => Ok(None),
            Value::String(raw) if raw.trim().is_empty() => Ok(None),
            Value::String(raw) => parse_decimal(raw.trim())
                .map(Some)
                .map_err(serde::de::Error::custom),
            Value::Number(number) => parse_decimal(&number.to_string())
                .map(Some)
                .map_err(serde::de::Error::custom),
            _ => Err(serde::de::Error::custom("invalid decimal value")),
        }
    }

    pub fn serialize_decimal<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.normalize().to_string())
    }

    pub fn serialize_optional_decimal<S>(
        value: &Option<Decimal>,
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(value) => serialize_decimal(value, serializer),
            None => serializer.serialize_none(),
        }
    }

    /// `0` / `1` flags, tolerating real booleans
    pub mod int_bool {
        use serde::{Deserialize, Deserializer, Serializer};
        use serde_json::Value;

        pub fn deserialize<'de, D>(deserializer: D) -> Result<bool, D::Error>
        where
            D: Deserializer<'de>,
        {
            match Value::deserialize(deserializer)? {
                Value::Bool(flag) => Ok(flag),
                Value::Number(number) => Ok(number.as_f64().is_some_and(|n| n != 0.0)),
                Value::Null => Ok(false),
                other => Err(serde::de::Error::custom(format!("invalid flag value {other}"))),
            }
        }

        pub fn serialize<S>(value: &bool, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_u8(u8::from(*value))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_exchange_info_server_time_utc() {
        let info: ExchangeInfo = serde_json::from_value(json!({
            "server_time": 1370814956,
            "pairs": {}
        }))
        .unwrap();
        assert_eq!(info.server_time, 1_370_814_956);
        assert_eq!(
            info.server_time_utc().map(|time| time.timestamp()),
            Some(1_370_814_956)
        );
    }

    #[test]
    fn test_pair_info_deserializes_numbers() {
        let info: PairInfo = serde_json::from_value(json!({
            "decimal_places": 3,
            "min_price": 0.1,
            "max_price": 400,
            "min_amount": 0.01,
            "hidden": 0,
            "fee": 0.2
        }))
        .unwrap();

        assert_eq!(info.decimal_places, 3);
        assert_eq!(info.min_price, Decimal::new(1, 1));
        assert_eq!(info.max_price, Decimal::from(400));
        assert_eq!(info.min_amount, Decimal::new(1, 2));
        assert!(!info.hidden);
        assert_eq!(info.fee, Decimal::new(2, 1));
    }

    #[test]
    fn test_decimal_accepts_scientific_notation() {
        let trade: PublicTrade = serde_json::from_value(json!({
            "type": "bid",
            "price": 1e-8,
            "amount": "2.5",
            "tid": 42,
            "timestamp": 1370818007
        }))
        .unwrap();

        assert_eq!(trade.kind, TradeKind::Bid);
        assert_eq!(trade.price, Decimal::new(1, 8));
        assert_eq!(trade.amount, Decimal::new(25, 1));
        assert_eq!(
            trade.executed_at().map(|t| t.timestamp()),
            Some(1_370_818_007)
        );
    }

    #[test]
    fn test_depth_levels_and_best_prices() {
        let depth: Depth = serde_json::from_value(json!({
            "asks": [[103.426, 0.01], [103.5, 15.0]],
            "bids": [[103.2, 2.48502251]]
        }))
        .unwrap();

        let ask = depth.best_ask().unwrap();
        assert_eq!(ask.price(), "103.426".parse::<Decimal>().unwrap());
        assert_eq!(ask.amount(), "0.01".parse::<Decimal>().unwrap());
        assert_eq!(
            depth.best_bid().map(DepthLevel::amount),
            Some("2.48502251".parse::<Decimal>().unwrap())
        );
    }

    #[test]
    fn test_depth_missing_side_defaults_empty() {
        let depth: Depth = serde_json::from_value(json!({ "asks": [] })).unwrap();
        assert!(depth.best_ask().is_none());
        assert!(depth.bids.is_empty());
    }

    #[test]
    fn test_decimal_serializes_as_string() {
        let level = DepthLevel(Decimal::new(10350, 2), Decimal::from(15));
        let value = serde_json::to_value(&level).unwrap();
        assert_eq!(value, json!(["103.5", "15"]));
    }
}
