/*
[INPUT]:  API key and secret supplied by the caller
[OUTPUT]: Credential pair consumed by the trade API signer
[POS]:    Auth layer - key material holder
[UPDATE]: When credential sources or validation rules change
*/

use std::fmt;

use reqwest::header::HeaderValue;

use crate::http::{Result, WexError};

/// API key + secret for trade API calls
///
/// The secret is kept as raw bytes and never printed by `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    secret: Vec<u8>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>, secret: impl AsRef<[u8]>) -> Self {
        Self {
            api_key: api_key.into(),
            secret: secret.as_ref().to_vec(),
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn secret(&self) -> &[u8] {
        &self.secret
    }

    /// Both halves present
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && !self.secret.is_empty()
    }

    /// `Key` header value, rejecting keys that cannot travel in a header
    pub(crate) fn key_header(&self) -> Result<HeaderValue> {
        if !self.is_complete() {
            return Err(WexError::MissingCredentials);
        }

        let mut value = HeaderValue::from_str(self.api_key.trim()).map_err(|_| {
            WexError::Authentication {
                message: "API key contains characters not allowed in an HTTP header"
                    .to_string(),
            }
        })?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix: String = self.api_key.chars().take(8).collect();
        f.debug_struct("Credentials")
            .field("api_key", &format_args!("{prefix}..."))
            .field("secret", &"<redacted>")
            .finish()
    }
}
