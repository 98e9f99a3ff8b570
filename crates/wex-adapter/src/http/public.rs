/*
[INPUT]:  Pair identifiers and query parameters
[OUTPUT]: Market data (pair info, tickers, depth, trades)
[POS]:    HTTP layer - public market data endpoints (no auth required)
[UPDATE]: When adding new public endpoints or changing response format
*/

use std::collections::BTreeMap;

use crate::http::{Result, WexClient, WexError};
use crate::types::{Depth, ExchangeInfo, PublicTrade, Ticker};

/// Default number of depth levels / trades the exchange returns
pub const DEFAULT_LIMIT: u32 = 150;
/// Largest `limit` the exchange accepts
pub const MAX_LIMIT: u32 = 5000;

impl WexClient {
    /// Active pairs with precision, price bounds, minimum amount and fee
    ///
    /// GET /info
    pub async fn info(&self) -> Result<ExchangeInfo> {
        self.public_get("info", &[], &[]).await
    }

    /// 24h statistics per pair
    ///
    /// GET /ticker/{pairs}?ignore_invalid={0|1}
    pub async fn ticker(
        &self,
        pairs: &[&str],
        ignore_invalid: bool,
    ) -> Result<BTreeMap<String, Ticker>> {
        validate_pairs(pairs)?;
        let query = vec![("ignore_invalid", flag(ignore_invalid))];
        self.public_get("ticker", pairs, &query).await
    }

    /// Order book per pair
    ///
    /// GET /depth/{pairs}?limit={limit}&ignore_invalid={0|1}
    pub async fn depth(
        &self,
        pairs: &[&str],
        limit: Option<u32>,
        ignore_invalid: bool,
    ) -> Result<BTreeMap<String, Depth>> {
        validate_pairs(pairs)?;
        let query = limit_query(limit, ignore_invalid)?;
        self.public_get("depth", pairs, &query).await
    }

    /// Most recent trades per pair, newest first
    ///
    /// GET /trades/{pairs}?limit={limit}&ignore_invalid={0|1}
    pub async fn trades(
        &self,
        pairs: &[&str],
        limit: Option<u32>,
        ignore_invalid: bool,
    ) -> Result<BTreeMap<String, Vec<PublicTrade>>> {
        validate_pairs(pairs)?;
        let query = limit_query(limit, ignore_invalid)?;
        self.public_get("trades", pairs, &query).await
    }
}

fn flag(value: bool) -> String {
    u8::from(value).to_string()
}

fn validate_pairs(pairs: &[&str]) -> Result<()> {
    if pairs.is_empty() {
        return Err(WexError::InvalidRequest(
            "at least one pair is required".to_string(),
        ));
    }
    if let Some(bad) = pairs.iter().find(|pair| !is_pair_name(pair)) {
        return Err(WexError::InvalidRequest(format!("invalid pair name '{bad}'")));
    }
    Ok(())
}

/// Pair names are joined with `-` into a single path segment, so only
/// `[A-Za-z0-9_]` is allowed
fn is_pair_name(pair: &str) -> bool {
    !pair.is_empty()
        && pair
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_')
}

fn limit_query(limit: Option<u32>, ignore_invalid: bool) -> Result<Vec<(&'static str, String)>> {
    let limit = limit.unwrap_or(DEFAULT_LIMIT);
    if !(1..=MAX_LIMIT).contains(&limit) {
        return Err(WexError::InvalidRequest(format!(
            "limit must be between 1 and {MAX_LIMIT}, got {limit}"
        )));
    }
    Ok(vec![
        ("limit", limit.to_string()),
        ("ignore_invalid", flag(ignore_invalid)),
    ])
}
