/*
[INPUT]:  Crate modules and public type definitions
[OUTPUT]: Public WEX adapter crate surface
[POS]:    Crate root - module wiring
[UPDATE]: When public modules or exports change
*/

pub mod auth;
pub mod blocking;
pub mod http;
pub mod types;

// Re-export commonly used types from auth
pub use auth::{Credentials, MAX_NONCE, NonceGenerator};

// Re-export commonly used types from http
pub use http::{ClientConfig, RequestSigner, Result, WexClient, WexError};

// Re-export all types
pub use types::*;
