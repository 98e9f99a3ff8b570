/*
[INPUT]:  API key, secret and wall clock
[OUTPUT]: Credential holder and replay-safe nonces
[POS]:    Auth layer - handles WEX trade API authentication state
[UPDATE]: When credential handling or nonce rules change
*/

pub mod credentials;
pub mod nonce;

pub use credentials::Credentials;
pub use nonce::{MAX_NONCE, NonceGenerator};
