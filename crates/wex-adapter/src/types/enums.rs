/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust enums with serialization support
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::fmt;

use serde::{Deserialize, Serialize};

/// Order direction for the trade API (`type` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "buy",
            Side::Sell => "sell",
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggressor side reported by the public trades feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeKind {
    Ask,
    Bid,
}

/// Sorting for history queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// Order state as reported by `ActiveOrders` / `OrderInfo`
///
/// Sent by the exchange as a bare integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum OrderStatus {
    Active,
    Executed,
    Cancelled,
    CancelledPartiallyExecuted,
}

impl OrderStatus {
    pub fn is_open(&self) -> bool {
        matches!(self, OrderStatus::Active)
    }
}

impl TryFrom<u8> for OrderStatus {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(OrderStatus::Active),
            1 => Ok(OrderStatus::Executed),
            2 => Ok(OrderStatus::Cancelled),
            3 => Ok(OrderStatus::CancelledPartiallyExecuted),
            other => Err(format!("unknown order status {other}")),
        }
    }
}

impl From<OrderStatus> for u8 {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Active => 0,
            OrderStatus::Executed => 1,
            OrderStatus::Cancelled => 2,
            OrderStatus::CancelledPartiallyExecuted => 3,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_status_from_integer() {
        let status: OrderStatus = serde_json::from_str("3").unwrap();
        assert_eq!(status, OrderStatus::CancelledPartiallyExecuted);
        assert!(serde_json::from_str::<OrderStatus>("7").is_err());
        assert_eq!(serde_json::to_string(&OrderStatus::Executed).unwrap(), "1");
    }

    #[test]
    fn test_sort_order_wire_format() {
        assert_eq!(serde_json::to_string(&SortOrder::Asc).unwrap(), "\"ASC\"");
        assert_eq!(SortOrder::default().as_str(), "DESC");
    }
}
