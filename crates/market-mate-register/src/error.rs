//! Application error types.

use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] anyhow::Error),

    #[error("Client error: {0}")]
    Client(#[from] market_mate_client::ClientError),

    #[error("Form error: {0}")]
    Form(#[from] registration_form::FormError),

    #[error("Terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application errors.
pub type AppResult<T> = Result<T, AppError>;
