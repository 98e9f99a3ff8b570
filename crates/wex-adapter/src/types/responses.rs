/*
[INPUT]:  API schema definitions and serde requirements
[OUTPUT]: Typed Rust structs for trade API `return` payloads
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enums::{OrderStatus, Side};
use super::models::serde_helpers;

/// Balances keyed by lowercase currency code
pub type Funds = BTreeMap<String, Decimal>;

/// Open orders keyed by order id
pub type ActiveOrders = BTreeMap<u64, ActiveOrder>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rights {
    #[serde(with = "serde_helpers::int_bool")]
    pub info: bool,
    #[serde(with = "serde_helpers::int_bool")]
    pub trade: bool,
    #[serde(default, with = "serde_helpers::int_bool")]
    pub withdraw: bool,
}

/// `getInfo`: balances, key privileges and counters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountInfo {
    #[serde(default)]
    pub funds: Funds,
    pub rights: Rights,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub open_orders: u64,
    pub server_time: i64,
}

impl AccountInfo {
    pub fn balance(&self, currency: &str) -> Decimal {
        self.funds
            .get(&currency.to_ascii_lowercase())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// `Trade`: result of placing an order
///
/// `order_id` is 0 when the order was filled immediately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeResult {
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub received: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub remains: Decimal,
    pub order_id: u64,
    #[serde(default)]
    pub funds: Funds,
}

impl TradeResult {
    pub fn is_filled(&self) -> bool {
        self.order_id == 0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveOrder {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub rate: Decimal,
    pub timestamp_created: i64,
    pub status: OrderStatus,
}

impl ActiveOrder {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp_created, 0)
    }
}

/// `OrderInfo`: a single order, open or closed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderInfo {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub start_amount: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub rate: Decimal,
    pub timestamp_created: i64,
    pub status: OrderStatus,
}

impl OrderInfo {
    pub fn filled_amount(&self) -> Decimal {
        self.start_amount - self.amount
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CancelOrderResult {
    pub order_id: u64,
    #[serde(default)]
    pub funds: Funds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeHistoryEntry {
    pub pair: String,
    #[serde(rename = "type")]
    pub side: Side,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount: Decimal,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub rate: Decimal,
    pub order_id: u64,
    #[serde(default, with = "serde_helpers::int_bool")]
    pub is_your_order: bool,
    pub timestamp: i64,
}

/// Deposit, withdrawal or internal transfer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(rename = "type")]
    pub kind: u8,
    #[serde(
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount: Decimal,
    pub currency: String,
    #[serde(default)]
    pub desc: String,
    pub status: u8,
    pub timestamp: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepositAddress {
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WithdrawResult {
    #[serde(rename = "tId")]
    pub transaction_id: u64,
    #[serde(
        rename = "amountSent",
        deserialize_with = "serde_helpers::deserialize_decimal",
        serialize_with = "serde_helpers::serialize_decimal"
    )]
    pub amount_sent: Decimal,
    #[serde(default)]
    pub funds: Funds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponCreated {
    pub coupon: String,
    #[serde(rename = "transID")]
    pub transaction_id: u64,
    #[serde(default)]
    pub funds: Funds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CouponRedeemed {
    #[serde(
        rename = "couponAmount",
        default,
        deserialize_with = "serde_helpers::deserialize_optional_decimal",
        serialize_with = "serde_helpers::serialize_optional_decimal"
    )]
    pub coupon_amount: Option<Decimal>,
    #[serde(rename = "couponCurrency")]
    pub coupon_currency: String,
    #[serde(rename = "transID")]
    pub transaction_id: u64,
    #[serde(default)]
    pub funds: Funds,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_account_info_with_rights_flags() {
        let info: AccountInfo = serde_json::from_value(json!({
            "funds": {"usd": 325, "btc": 23.998, "ltc": 0},
            "rights": {"info": 1, "trade": 0, "withdraw": 0},
            "transaction_count": 0,
            "open_orders": 1,
            "server_time": 1371125234
        }))
        .unwrap();

        assert!(info.rights.info);
        assert!(!info.rights.trade);
        assert_eq!(info.open_orders, 1);
        assert_eq!(info.balance("BTC"), "23.998".parse::<Decimal>().unwrap());
        assert_eq!(info.balance("eur"), Decimal::ZERO);
    }

    #[test]
    fn test_active_orders_keyed_by_id() {
        let orders: ActiveOrders = serde_json::from_value(json!({
            "343152": {
                "pair": "btc_usd",
                "type": "sell",
                "amount": 12.345,
                "rate": 485,
                "timestamp_created": 1342448420,
                "status": 0
            }
        }))
        .unwrap();

        let order = orders.get(&343152).unwrap();
        assert_eq!(order.side, Side::Sell);
        assert_eq!(order.rate, Decimal::from(485));
        assert!(order.status.is_open());
        assert_eq!(
            order.created_at().map(|t| t.timestamp()),
            Some(1_342_448_420)
        );
    }

    #[test]
    fn test_order_info_filled_amount() {
        let order: OrderInfo = serde_json::from_value(json!({
            "pair": "btc_usd",
            "type": "sell",
            "start_amount": 13.345,
            "amount": 12.345,
            "rate": 485,
            "timestamp_created": 1342448420,
            "status": 3
        }))
        .unwrap();

        assert_eq!(order.filled_amount(), Decimal::ONE);
        assert_eq!(order.status, OrderStatus::CancelledPartiallyExecuted);
    }

    #[test]
    fn test_withdraw_and_coupon_renames() {
        let withdraw: WithdrawResult = serde_json::from_value(json!({
            "tId": 37832629,
            "amountSent": 0.009,
            "funds": {"btc": 1.5}
        }))
        .unwrap();
        assert_eq!(withdraw.transaction_id, 37_832_629);
        assert_eq!(withdraw.amount_sent, "0.009".parse::<Decimal>().unwrap());

        let redeemed: CouponRedeemed = serde_json::from_value(json!({
            "couponAmount": "1",
            "couponCurrency": "USD",
            "transID": 2864643,
            "funds": {}
        }))
        .unwrap();
        assert_eq!(redeemed.coupon_amount, Some(Decimal::ONE));
        assert_eq!(redeemed.coupon_currency, "USD");
    }

    #[test]
    fn test_coupon_created_and_transaction_renames() {
        let created: CouponCreated = serde_json::from_value(json!({
            "coupon": "WEXUSD-1234",
            "transID": 2864642,
            "funds": {"usd": 9}
        }))
        .unwrap();
        assert_eq!(created.transaction_id, 2_864_642);
        assert_eq!(created.funds.get("usd"), Some(&Decimal::from(9)));

        let transaction: Transaction = serde_json::from_value(json!({
            "type": 4,
            "amount": "0.25",
            "currency": "LTC",
            "status": 2,
            "timestamp": 1342448420
        }))
        .unwrap();
        assert_eq!(transaction.kind, 4);
        assert_eq!(transaction.amount, Decimal::new(25, 2));
        assert!(transaction.desc.is_empty());
    }

    #[test]
    fn test_trade_result_immediate_fill() {
        let result: TradeResult = serde_json::from_value(json!({
            "received": 0.1,
            "remains": 0,
            "order_id": 0,
            "funds": {"usd": 325, "btc": 2.498}
        }))
        .unwrap();
        assert!(result.is_filled());
        assert_eq!(result.received, Decimal::new(1, 1));
    }
}
