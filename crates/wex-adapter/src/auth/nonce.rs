/*
[INPUT]:  Wall clock and previously issued nonces
[OUTPUT]: Strictly increasing nonces for trade API requests
[POS]:    Auth layer - replay protection counter
[UPDATE]: When the exchange changes nonce bounds or seeding rules
*/

use chrono::Utc;

use crate::http::{Result, WexError};

/// Largest nonce the trade API accepts
pub const MAX_NONCE: u64 = 4_294_967_294;

/// Tenths of a second since the epoch, folded below 1e9
fn clock_nonce() -> u64 {
    let tenths = Utc::now().timestamp_millis().max(0) as u64 / 100;
    tenths % 1_000_000_000
}

/// Issues nonces that strictly increase for the lifetime of the generator
///
/// Each value is the larger of the clock reading and the previous nonce + 1,
/// so a fresh process usually starts above the last run's nonces while rapid
/// calls within the same tick still never repeat. The generator is not
/// synchronized; the client keeps it behind a lock held across the request.
#[derive(Debug, Clone)]
pub struct NonceGenerator {
    last: u64,
    clock: fn() -> u64,
}

impl NonceGenerator {
    pub fn new() -> Self {
        Self::with_clock(clock_nonce)
    }

    /// Generator driven by a custom clock source
    pub fn with_clock(clock: fn() -> u64) -> Self {
        Self { last: 0, clock }
    }

    /// Continue after a nonce already used with this key
    pub fn starting_after(mut self, last: u64) -> Self {
        self.last = last;
        self
    }

    /// Most recently issued nonce (0 before the first call)
    pub fn last(&self) -> u64 {
        self.last
    }

    /// Next nonce, strictly greater than every previous one
    pub fn next_nonce(&mut self) -> Result<u64> {
        let candidate = (self.clock)().max(self.last.saturating_add(1));
        if candidate > MAX_NONCE {
            return Err(WexError::NonceExhausted { max: MAX_NONCE });
        }
        self.last = candidate;
        Ok(candidate)
    }

    /// Make the next nonce at least `expected`
    pub fn advance_to(&mut self, expected: u64) {
        let floor = expected.saturating_sub(1);
        if floor > self.last {
            self.last = floor;
        }
    }
}

impl Default for NonceGenerator {
    fn default() -> Self {
        Self::new()
    }
}
