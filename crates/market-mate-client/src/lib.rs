//! HTTP client for the Market Mate user service.

mod client;
mod error;
mod types;

pub use client::{ClientConfig, MarketMateClient, OTP_REQUEST_PATH, REGISTER_PATH};
pub use error::ClientError;
pub use types::*;
