//! Registration form errors.

use thiserror::Error;

/// Client-side validation failures. The `Display` text is what the form shows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Email is required")]
    EmailRequired,

    #[error("Enter a valid email address")]
    InvalidEmail,

    #[error("Request an OTP before registering")]
    OtpNotRequested,

    #[error("All fields are required")]
    MissingFields,

    #[error("Password must be at least 8 characters with at least one letter and one number")]
    WeakPassword,

    #[error("OTP must be exactly 6 digits")]
    InvalidOtp,
}

/// Input refused by the form.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Email cannot be changed after the OTP has been sent")]
    EmailLocked,

    #[error("A request is already in progress")]
    Busy,
}
