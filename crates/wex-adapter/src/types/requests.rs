/*
[INPUT]:  Caller-supplied query options
[OUTPUT]: Trade API form parameters
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new types added
*/

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::enums::SortOrder;

/// Paging and time filters shared by `TradeHistory` and `TransHistory`
///
/// Every field is optional; the exchange applies its own defaults
/// (from 0, count 1000, `DESC`) for anything left unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order: Option<SortOrder>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub since: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<i64>,
}

impl HistoryQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records to skip
    pub fn from_offset(mut self, from: u64) -> Self {
        self.from = Some(from);
        self
    }

    pub fn count(mut self, count: u32) -> Self {
        self.count = Some(count);
        self
    }

    pub fn from_id(mut self, from_id: u64) -> Self {
        self.from_id = Some(from_id);
        self
    }

    pub fn end_id(mut self, end_id: u64) -> Self {
        self.end_id = Some(end_id);
        self
    }

    pub fn order(mut self, order: SortOrder) -> Self {
        self.order = Some(order);
        self
    }

    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since.timestamp());
        self
    }

    pub fn until(mut self, end: DateTime<Utc>) -> Self {
        self.end = Some(end.timestamp());
        self
    }

    /// Form parameters in the order the exchange documents them
    pub(crate) fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(from) = self.from {
            params.push(("from", from.to_string()));
        }
        if let Some(count) = self.count {
            params.push(("count", count.to_string()));
        }
        if let Some(from_id) = self.from_id {
            params.push(("from_id", from_id.to_string()));
        }
        if let Some(end_id) = self.end_id {
            params.push(("end_id", end_id.to_string()));
        }
        if let Some(order) = self.order {
            params.push(("order", order.as_str().to_string()));
        }
        if let Some(since) = self.since {
            params.push(("since", since.to_string()));
        }
        if let Some(end) = self.end {
            params.push(("end", end.to_string()));
        }
        params
    }
}
