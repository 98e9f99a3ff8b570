/*
[INPUT]:  Error sources (HTTP, API envelope, serialization, credentials, nonce)
[OUTPUT]: Structured error types with transport / auth / API classification
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the WEX adapter
#[derive(Error, Debug)]
pub enum WexError {
    /// HTTP request failed before a response was received
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success HTTP status
    #[error("HTTP status {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// Exchange reported `success: 0`
    #[error("API error: {message}")]
    Api { message: String },

    /// Key, secret or signature rejected
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Exchange rejected the nonce as already used
    #[error("Stale nonce: {message}")]
    StaleNonce {
        message: String,
        expected: Option<u64>,
    },

    /// Private method called without a key/secret pair
    #[error("API key and secret must be provided to use private methods")]
    MissingCredentials,

    /// Nonce counter reached the exchange's upper bound
    #[error("Nonce exhausted: exchange accepts nonces up to {max}")]
    NonceExhausted { max: u64 },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Invalid response from server
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Arguments rejected before sending
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl WexError {
    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(
            self,
            WexError::Authentication { .. }
                | WexError::StaleNonce { .. }
                | WexError::MissingCredentials
        )
    }

    /// Check if the failure happened in the network/HTTP layer
    pub fn is_transport_error(&self) -> bool {
        matches!(
            self,
            WexError::Http(_)
                | WexError::HttpStatus { .. }
                | WexError::InvalidResponse(_)
                | WexError::Serialization(_)
        )
    }

    /// Check if the exchange rejected the request on business grounds
    pub fn is_api_error(&self) -> bool {
        matches!(self, WexError::Api { .. })
    }

    /// Classify the `error` text of a `success: 0` envelope
    ///
    /// Key, signature and permission messages become [`WexError::Authentication`],
    /// nonce messages become [`WexError::StaleNonce`] carrying the value the
    /// exchange asks for when it reports one.
    pub fn from_api_message(message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();

        if lower.contains("nonce") {
            let expected = expected_nonce(&lower);
            return WexError::StaleNonce { message, expected };
        }

        if lower.contains("invalid sign")
            || lower.contains("api key")
            || lower.contains("permission")
        {
            return WexError::Authentication { message };
        }

        WexError::Api { message }
    }

    /// Map a non-success HTTP status
    pub fn from_status(status: StatusCode, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => WexError::Authentication {
                message: format!("HTTP {}: {}", status.as_u16(), body),
            },
            _ => WexError::HttpStatus {
                status: status.as_u16(),
                body,
            },
        }
    }
}

/// Pulls N out of `"... you should send:N"`
fn expected_nonce(message: &str) -> Option<u64> {
    let (_, tail) = message.split_once("you should send:")?;
    let digits: String = tail
        .trim_start()
        .chars()
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Result type alias for WEX operations
pub type Result<T> = std::result::Result<T, WexError>;
