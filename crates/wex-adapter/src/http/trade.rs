/*
[INPUT]:  Trade API parameters, API key and HMAC-SHA512 body signature
[OUTPUT]: Account, order, history and funding results
[POS]:    HTTP layer - trade API endpoints (require key + signed body)
[UPDATE]: When adding new trading endpoints or changing order flow
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::info;

use crate::http::{Result, WexClient, WexError};
use crate::types::{
    AccountInfo, ActiveOrders, CancelOrderResult, CouponCreated, CouponRedeemed,
    DepositAddress, HistoryQuery, OrderInfo, Side, TradeHistoryEntry, TradeResult,
    Transaction, WithdrawResult,
};

/// Exchange message for an empty `ActiveOrders` result
const NO_ORDERS: &str = "no orders";

impl WexClient {
    /// Balances, key privileges, open order count and server time
    ///
    /// Method: getInfo (info privilege)
    pub async fn get_info(&self) -> Result<AccountInfo> {
        self.trade_call("getInfo", Vec::new()).await
    }

    /// Place a limit order
    ///
    /// Method: Trade (trade privilege). Market orders can be emulated with an
    /// aggressive rate.
    pub async fn trade(
        &self,
        pair: &str,
        side: Side,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<TradeResult> {
        if rate <= Decimal::ZERO || amount <= Decimal::ZERO {
            return Err(WexError::InvalidRequest(
                "rate and amount must be positive".to_string(),
            ));
        }

        let params = vec![
            ("pair", pair.to_string()),
            ("type", side.as_str().to_string()),
            ("rate", rate.normalize().to_string()),
            ("amount", amount.normalize().to_string()),
        ];
        let result: TradeResult = self.trade_call("Trade", params).await?;
        info!(
            pair,
            side = side.as_str(),
            order_id = result.order_id,
            received = %result.received,
            remains = %result.remains,
            "order placed"
        );
        Ok(result)
    }

    /// Open orders, optionally limited to one pair
    ///
    /// Method: ActiveOrders (info privilege). An account with no open orders
    /// yields an empty map rather than an error.
    pub async fn active_orders(&self, pair: Option<&str>) -> Result<ActiveOrders> {
        let params = pair
            .map(|pair| vec![("pair", pair.to_string())])
            .unwrap_or_default();

        match self.trade_call("ActiveOrders", params).await {
            Err(WexError::Api { message }) if message.eq_ignore_ascii_case(NO_ORDERS) => {
                Ok(BTreeMap::new())
            }
            other => other,
        }
    }

    /// A single order by id, open or closed
    ///
    /// Method: OrderInfo (info privilege)
    pub async fn order_info(&self, order_id: u64) -> Result<BTreeMap<u64, OrderInfo>> {
        self.trade_call("OrderInfo", vec![("order_id", order_id.to_string())])
            .await
    }

    /// Cancel an open order
    ///
    /// Method: CancelOrder (trade privilege)
    pub async fn cancel_order(&self, order_id: u64) -> Result<CancelOrderResult> {
        let result: CancelOrderResult = self
            .trade_call("CancelOrder", vec![("order_id", order_id.to_string())])
            .await?;
        info!(order_id = result.order_id, "order cancelled");
        Ok(result)
    }

    /// Own trades, keyed by trade id
    ///
    /// Method: TradeHistory (info privilege)
    pub async fn trade_history(
        &self,
        query: &HistoryQuery,
        pair: Option<&str>,
    ) -> Result<BTreeMap<u64, TradeHistoryEntry>> {
        let mut params = query.to_params();
        if let Some(pair) = pair {
            params.push(("pair", pair.to_string()));
        }
        self.trade_call("TradeHistory", params).await
    }

    /// Deposits, withdrawals and other balance movements, keyed by id
    ///
    /// Method: TransHistory (info privilege)
    pub async fn trans_history(&self, query: &HistoryQuery) -> Result<BTreeMap<u64, Transaction>> {
        self.trade_call("TransHistory", query.to_params()).await
    }

    /// Deposit address for a coin
    ///
    /// Method: CoinDepositAddress (info privilege). Fails if the address was
    /// never generated on the exchange side.
    pub async fn coin_deposit_address(&self, coin_name: &str) -> Result<DepositAddress> {
        self.trade_call(
            "CoinDepositAddress",
            vec![("coinName", coin_name.to_string())],
        )
        .await
    }

    /// Withdraw a coin to an external address
    ///
    /// Method: WithdrawCoin (withdraw privilege). No further confirmation is
    /// requested by the exchange.
    pub async fn withdraw_coin(
        &self,
        coin_name: &str,
        amount: Decimal,
        address: &str,
    ) -> Result<WithdrawResult> {
        let params = vec![
            ("coinName", coin_name.to_string()),
            ("amount", amount.normalize().to_string()),
            ("address", address.to_string()),
        ];
        let result: WithdrawResult = self.trade_call("WithdrawCoin", params).await?;
        info!(
            coin = coin_name,
            transaction_id = result.transaction_id,
            amount_sent = %result.amount_sent,
            "withdrawal submitted"
        );
        Ok(result)
    }

    /// Create a coupon redeemable by `receiver`
    ///
    /// Method: CreateCoupon (coupon privilege)
    pub async fn create_coupon(
        &self,
        currency: &str,
        amount: Decimal,
        receiver: &str,
    ) -> Result<CouponCreated> {
        let params = vec![
            ("currency", currency.to_string()),
            ("amount", amount.normalize().to_string()),
            ("receiver", receiver.to_string()),
        ];
        self.trade_call("CreateCoupon", params).await
    }

    /// Redeem a coupon code
    ///
    /// Method: RedeemCoupon (coupon privilege)
    pub async fn redeem_coupon(&self, coupon: &str) -> Result<CouponRedeemed> {
        self.trade_call("RedeemCoupon", vec![("coupon", coupon.to_string())])
            .await
    }
}
