/*
[INPUT]:  Form-encoded request body and API secret
[OUTPUT]: Signed request header (Sign)
[POS]:    HTTP layer - request signing for authenticated endpoints
[UPDATE]: When changing signing algorithm or header format
*/

use std::fmt;

use hmac::{Hmac, Mac};
use sha2::Sha512;

use crate::http::{Result, WexError};

type HmacSha512 = Hmac<Sha512>;

/// Signs trade API bodies with HMAC-SHA512 keyed by the API secret
#[derive(Clone)]
pub struct RequestSigner {
    mac: HmacSha512,
}

impl RequestSigner {
    /// Create a signer for the given secret
    pub fn new(secret: &[u8]) -> Result<Self> {
        let mac = HmacSha512::new_from_slice(secret).map_err(|e| WexError::Authentication {
            message: format!("unusable API secret: {e}"),
        })?;
        Ok(Self { mac })
    }

    /// Lowercase hex digest of `body`, sent as the `Sign` header
    pub fn sign(&self, body: &str) -> String {
        let mut mac = self.mac.clone();
        mac.update(body.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Recompute and compare in constant time
    pub fn verify(&self, body: &str, signature: &str) -> bool {
        let Ok(expected) = hex::decode(signature) else {
            return false;
        };
        let mut mac = self.mac.clone();
        mac.update(body.as_bytes());
        mac.verify_slice(&expected).is_ok()
    }
}

impl fmt::Debug for RequestSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSigner").finish_non_exhaustive()
    }
}
