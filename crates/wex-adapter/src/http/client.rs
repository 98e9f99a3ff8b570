/*
[INPUT]:  HTTP configuration (base URLs, timeouts, credentials)
[OUTPUT]: Configured reqwest client, request builders and envelope decoding
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::auth::{Credentials, NonceGenerator};
use crate::http::{RequestSigner, Result, WexError};

/// Base URLs for the WEX API
const PUBLIC_BASE_URL: &str = "https://wex.nz/api/3/";
const TRADE_API_URL: &str = "https://wex.nz/tapi";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

/// Main HTTP client for the WEX public and trade APIs
///
/// Public methods need no credentials. Trade methods sign each body with the
/// API secret and hold the nonce lock until the response arrives, so calls
/// sharing one client reach the exchange with strictly increasing nonces.
#[derive(Debug)]
pub struct WexClient {
    http_client: Client,
    public_base_url: Url,
    trade_url: Url,
    credentials: Option<Credentials>,
    nonce: Mutex<NonceGenerator>,
}

impl WexClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        Self::with_config_and_base_urls(config, PUBLIC_BASE_URL, TRADE_API_URL)
    }

    /// Create a client against alternate hosts (mirrors, mock servers)
    ///
    /// `public_base_url` is the public API v3 root; `trade_url` is the full
    /// trade API endpoint.
    pub fn with_config_and_base_urls(
        config: ClientConfig,
        public_base_url: &str,
        trade_url: &str,
    ) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;

        Ok(Self {
            http_client,
            public_base_url: parse_base_url(public_base_url)?,
            trade_url: Url::parse(trade_url)?,
            credentials: None,
            nonce: Mutex::new(NonceGenerator::new()),
        })
    }

    /// Attach credentials, consuming the client
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.set_credentials(credentials);
        self
    }

    /// Replace the nonce generator, e.g. to resume after a known nonce
    pub fn with_nonce_generator(self, generator: NonceGenerator) -> Self {
        Self {
            nonce: Mutex::new(generator),
            ..self
        }
    }

    /// Set credentials for authenticated requests
    pub fn set_credentials(&mut self, credentials: Credentials) {
        if !credentials.is_complete() {
            warn!("no API key and secret provided, private methods will be unavailable");
        }
        self.credentials = Some(credentials);
    }

    /// Get credentials if set
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Most recently issued trade API nonce
    pub async fn last_nonce(&self) -> u64 {
        self.nonce.lock().await.last()
    }

    /// Build the URL for a public method: `{base}/{method}/{pair-pair}?{query}`
    pub(crate) fn public_url(
        &self,
        method: &str,
        pairs: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url> {
        let endpoint = if pairs.is_empty() {
            method.to_string()
        } else {
            format!("{}/{}", method, pairs.join("-"))
        };

        let mut url = self.public_base_url.join(&endpoint)?;
        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }
        Ok(url)
    }

    /// GET a public method and decode its body
    pub(crate) async fn public_get<T: DeserializeOwned>(
        &self,
        method: &str,
        pairs: &[&str],
        query: &[(&str, String)],
    ) -> Result<T> {
        let url = self.public_url(method, pairs, query)?;
        debug!(method, url = %url, "public api request");

        let builder = self.http_client.get(url);
        let value = self.send_json(builder).await?;
        check_success(&value)?;
        Ok(serde_json::from_value(value)?)
    }

    /// POST a signed trade API call and decode its `return` payload
    ///
    /// Nonce allocation and the round trip run under one lock. A nonce
    /// rejection that names the expected value moves the generator forward
    /// for the next call.
    pub(crate) async fn trade_call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<(&'static str, String)>,
    ) -> Result<T> {
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(WexError::MissingCredentials)?;
        let key_header = credentials.key_header()?;
        let signer = RequestSigner::new(credentials.secret())?;

        let mut nonce = self.nonce.lock().await;
        let current = nonce.next_nonce()?;
        let body = encode_trade_body(method, current, &params);
        let signature = signer.sign(&body);

        debug!(method, nonce = current, "trade api request");

        let builder = self
            .http_client
            .post(self.trade_url.clone())
            .header("Key", key_header)
            .header("Sign", signature)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body);

        let result = match self.send_json(builder).await {
            Ok(value) => extract_return(value),
            Err(err) => Err(err),
        };

        if let Err(WexError::StaleNonce {
            expected: Some(expected),
            ..
        }) = &result
        {
            warn!(method, rejected = current, expected, "nonce rejected by exchange");
            nonce.advance_to(*expected);
        }

        result
    }

    /// Send a request and parse the body as JSON
    pub(crate) async fn send_json(&self, builder: RequestBuilder) -> Result<Value> {
        let response = builder.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "non-success HTTP status");
            return Err(WexError::from_status(status, text));
        }

        serde_json::from_str(&text).map_err(|e| {
            WexError::InvalidResponse(format!("body is not valid JSON ({e}): {}", snippet(&text)))
        })
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    if raw.ends_with('/') {
        Ok(Url::parse(raw)?)
    } else {
        Ok(Url::parse(&format!("{raw}/"))?)
    }
}

/// `method=<name>&nonce=<n>&<params>` in that order
pub(crate) fn encode_trade_body(method: &str, nonce: u64, params: &[(&str, String)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("method", method);
    serializer.append_pair("nonce", &nonce.to_string());
    for (key, value) in params {
        serializer.append_pair(key, value);
    }
    serializer.finish()
}

/// Fail on `success: 0` envelopes
pub(crate) fn check_success(value: &Value) -> Result<()> {
    let success = value
        .get("success")
        .and_then(|flag| flag.as_i64().or_else(|| flag.as_bool().map(i64::from)));

    if success == Some(0) {
        let message = value
            .get("error")
            .and_then(Value::as_str)
            .unwrap_or("Unknown API error");
        warn!(error = message, "exchange reported failure");
        return Err(WexError::from_api_message(message));
    }
    Ok(())
}

/// Unwrap the trade API envelope into its typed `return` payload
pub(crate) fn extract_return<T: DeserializeOwned>(mut value: Value) -> Result<T> {
    check_success(&value)?;
    let payload = value
        .get_mut("return")
        .map(Value::take)
        .ok_or_else(|| WexError::InvalidResponse("response has no `return` field".to_string()))?;
    Ok(serde_json::from_value(payload)?)
}

fn snippet(text: &str) -> String {
    text.chars().take(200).collect()
}
