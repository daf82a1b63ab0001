//! Market Mate HTTP client.

use crate::error::ClientError;
use crate::types::{ErrorBody, OtpRequest, RegisterRequest};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Path of the OTP request endpoint.
pub const OTP_REQUEST_PATH: &str = "/market-mate/user/otp/request";

/// Path of the registration endpoint.
pub const REGISTER_PATH: &str = "/market-mate/user/register";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Connection settings for [`MarketMateClient`].
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base address of the user service, e.g. `https://api.example.com`
    pub base_url: String,

    /// Per-request timeout
    pub timeout: Duration,

    /// Keep cookies set by the service and send them back on every request
    pub with_credentials: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            with_credentials: true,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_credentials(mut self, with_credentials: bool) -> Self {
        self.with_credentials = with_credentials;
        self
    }
}

/// Market Mate user service client.
///
/// Every request carries `Content-Type: application/json`, and with
/// credentials enabled a shared cookie store replays session cookies.
#[derive(Clone)]
pub struct MarketMateClient {
    client: Client,
    base_url: String,
}

impl MarketMateClient {
    /// Create a new client from its configuration.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .cookie_store(config.with_credentials)
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, base_url })
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Ask the service to email a one-time passcode.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn request_otp(&self, request: &OtpRequest) -> Result<(), ClientError> {
        self.post_json(OTP_REQUEST_PATH, request).await?;
        debug!("OTP request accepted");
        Ok(())
    }

    /// Submit a registration.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ClientError> {
        self.post_json(REGISTER_PATH, request).await?;
        debug!("Registration accepted");
        Ok(())
    }

    /// POST a JSON body to `path`, mapping any non-2xx status to [`ClientError::Api`].
    pub async fn post_json<B>(&self, path: &str, body: &B) -> Result<reqwest::Response, ClientError>
    where
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(url = %url, "Sending POST request");

        let response = self.client.post(&url).json(body).send().await?;

        if !response.status().is_success() {
            return Err(Self::extract_error(response).await);
        }

        Ok(response)
    }

    /// Extract error information from a failed response.
    async fn extract_error(response: reqwest::Response) -> ClientError {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let message = serde_json::from_str::<ErrorBody>(&body)
            .unwrap_or_default()
            .message
            .filter(|m| !m.is_empty());

        warn!(status = %status, message = ?message, "Request failed");

        ClientError::Api {
            status: status.as_u16(),
            message,
        }
    }
}
