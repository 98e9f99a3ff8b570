/*
[INPUT]:  Same calls as the async client, from synchronous code
[OUTPUT]: Blocking results backed by a private runtime
[POS]:    Facade layer - synchronous wrapper over http::WexClient
[UPDATE]: When async client endpoints are added or changed
*/

//! Blocking wrapper for callers without an async runtime.
//!
//! Each call drives the async client to completion on a private
//! current-thread Tokio runtime. Must not be used from inside another Tokio
//! runtime: `block_on` panics there.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tokio::runtime::{Builder, Runtime};

use crate::auth::Credentials;
use crate::http::{self, ClientConfig, Result, WexError};
use crate::types::{
    AccountInfo, ActiveOrders, CancelOrderResult, CouponCreated, CouponRedeemed, Depth,
    DepositAddress, ExchangeInfo, HistoryQuery, OrderInfo, PublicTrade, Side, Ticker,
    TradeHistoryEntry, TradeResult, Transaction, WithdrawResult,
};

/// Synchronous WEX client
#[derive(Debug)]
pub struct WexClient {
    inner: http::WexClient,
    runtime: Runtime,
}

impl WexClient {
    pub fn new() -> Result<Self> {
        Self::from_async(http::WexClient::new()?)
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::from_async(http::WexClient::with_config(config)?)
    }

    /// Wrap an already configured async client
    pub fn from_async(inner: http::WexClient) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| WexError::Config(format!("failed to start runtime: {e}")))?;
        Ok(Self { inner, runtime })
    }

    pub fn with_credentials(self, credentials: Credentials) -> Self {
        Self {
            inner: self.inner.with_credentials(credentials),
            runtime: self.runtime,
        }
    }

    /// The wrapped async client
    pub fn inner(&self) -> &http::WexClient {
        &self.inner
    }

    pub fn last_nonce(&self) -> u64 {
        self.runtime.block_on(self.inner.last_nonce())
    }

    pub fn info(&self) -> Result<ExchangeInfo> {
        self.runtime.block_on(self.inner.info())
    }

    pub fn ticker(&self, pairs: &[&str], ignore_invalid: bool) -> Result<BTreeMap<String, Ticker>> {
        self.runtime.block_on(self.inner.ticker(pairs, ignore_invalid))
    }

    pub fn depth(
        &self,
        pairs: &[&str],
        limit: Option<u32>,
        ignore_invalid: bool,
    ) -> Result<BTreeMap<String, Depth>> {
        self.runtime
            .block_on(self.inner.depth(pairs, limit, ignore_invalid))
    }

    pub fn trades(
        &self,
        pairs: &[&str],
        limit: Option<u32>,
        ignore_invalid: bool,
    ) -> Result<BTreeMap<String, Vec<PublicTrade>>> {
        self.runtime
            .block_on(self.inner.trades(pairs, limit, ignore_invalid))
    }

    pub fn get_info(&self) -> Result<AccountInfo> {
        self.runtime.block_on(self.inner.get_info())
    }

    pub fn trade(
        &self,
        pair: &str,
        side: Side,
        rate: Decimal,
        amount: Decimal,
    ) -> Result<TradeResult> {
        self.runtime
            .block_on(self.inner.trade(pair, side, rate, amount))
    }

    pub fn active_orders(&self, pair: Option<&str>) -> Result<ActiveOrders> {
        self.runtime.block_on(self.inner.active_orders(pair))
    }

    pub fn order_info(&self, order_id: u64) -> Result<BTreeMap<u64, OrderInfo>> {
        self.runtime.block_on(self.inner.order_info(order_id))
    }

    pub fn cancel_order(&self, order_id: u64) -> Result<CancelOrderResult> {
        self.runtime.block_on(self.inner.cancel_order(order_id))
    }

    pub fn trade_history(
        &self,
        query: &HistoryQuery,
        pair: Option<&str>,
    ) -> Result<BTreeMap<u64, TradeHistoryEntry>> {
        self.runtime
            .block_on(self.inner.trade_history(query, pair))
    }

    pub fn trans_history(&self, query: &HistoryQuery) -> Result<BTreeMap<u64, Transaction>> {
        self.runtime.block_on(self.inner.trans_history(query))
    }

    pub fn coin_deposit_address(&self, coin_name: &str) -> Result<DepositAddress> {
        self.runtime
            .block_on(self.inner.coin_deposit_address(coin_name))
    }

    pub fn withdraw_coin(
        &self,
        coin_name: &str,
        amount: Decimal,
        address: &str,
    ) -> Result<WithdrawResult> {
        self.runtime
            .block_on(self.inner.withdraw_coin(coin_name, amount, address))
    }

    pub fn create_coupon(
        &self,
        currency: &str,
        amount: Decimal,
        receiver: &str,
    ) -> Result<CouponCreated> {
        self.runtime
            .block_on(self.inner.create_coupon(currency, amount, receiver))
    }

    pub fn redeem_coupon(&self, coupon: &str) -> Result<CouponRedeemed> {
        self.runtime.block_on(self.inner.redeem_coupon(coupon))
    }
}
