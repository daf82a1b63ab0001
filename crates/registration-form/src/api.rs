//! Outgoing calls the form depends on.

use async_trait::async_trait;
use market_mate_client::{ClientError, MarketMateClient, OtpRequest, RegisterRequest};

/// The two registration endpoints of the user service.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RegistrationApi: Send + Sync + 'static {
    /// Ask the service to email a one-time passcode.
    async fn request_otp(&self, request: OtpRequest) -> Result<(), ClientError>;

    /// Submit the completed registration.
    async fn register(&self, request: RegisterRequest) -> Result<(), ClientError>;
}

#[async_trait]
impl RegistrationApi for MarketMateClient {
    async fn request_otp(&self, request: OtpRequest) -> Result<(), ClientError> {
        MarketMateClient::request_otp(self, &request).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<(), ClientError> {
        MarketMateClient::register(self, &request).await
    }
}
