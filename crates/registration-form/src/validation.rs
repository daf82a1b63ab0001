//! Client-side input validation.
//!
//! Every check runs before a request leaves the form, so a failure here never
//! reaches the network.

use crate::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Number of digits in a one-time passcode.
pub const OTP_LEN: usize = 6;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.[^\s@]+$";

static EMAIL_REGEX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(EMAIL_PATTERN).ok());

/// `local@domain.tld` with no whitespace and a single `@`.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.as_ref().map_or(false, |re| re.is_match(email))
}

/// Check the email submitted with an OTP request.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::EmailRequired);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

/// At least eight characters, one ASCII letter and one ASCII digit.
/// Any other characters are allowed.
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let long_enough = password.chars().count() >= MIN_PASSWORD_LEN;
    let has_letter = password.chars().any(|c| c.is_ascii_alphabetic());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());

    if long_enough && has_letter && has_digit {
        Ok(())
    } else {
        Err(ValidationError::WeakPassword)
    }
}

/// Exactly six ASCII digits.
pub fn validate_otp(otp: &str) -> Result<(), ValidationError> {
    if otp.len() == OTP_LEN && otp.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidOtp)
    }
}

/// Check a registration submission. The first failing rule wins.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    otp: &str,
) -> Result<(), ValidationError> {
    if name.is_empty() || email.is_empty() || password.is_empty() || otp.is_empty() {
        return Err(ValidationError::MissingFields);
    }
    validate_password(password)?;
    validate_otp(otp)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_err, assert_ok};

    #[test]
    fn test_valid_emails() {
        for email in ["user@example.com", "a@b.c", "first.last+tag@sub.domain.org"] {
            assert_ok!(validate_email(email), "{email} should be accepted");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "not-an-email",
            "user@example",
            "@example.com",
            "user@.com",
            "user@example.",
            "us er@example.com",
            "user@@example.com",
            "user@exa mple.com",
            " user@example.com",
        ] {
            assert_eq!(
                validate_email(email),
                Err(ValidationError::InvalidEmail),
                "{email} should be rejected"
            );
        }
    }

    #[test]
    fn test_email_pattern_compiles() {
        assert!(EMAIL_REGEX.is_some());
    }

    #[test]
    fn test_empty_email() {
        assert_eq!(validate_email(""), Err(ValidationError::EmailRequired));
    }

    #[test]
    fn test_password_rules() {
        assert_ok!(validate_password("abc12345"));
        assert_ok!(validate_password("Passw0rd!"));
        assert_ok!(validate_password("a1 b2 c3 d4"));

        assert_err!(validate_password("short1"));
        assert_err!(validate_password("abcdefgh"));
        assert_err!(validate_password("12345678"));
        assert_err!(validate_password("!!!!!!!!1"));
        assert_err!(validate_password("a1!"));
    }

    #[test]
    fn test_password_length_counts_characters() {
        // Seven characters, more than eight bytes.
        assert_err!(validate_password("ééééé1a"));
        assert_ok!(validate_password("éééééé1a"));
    }

    #[test]
    fn test_otp_rules() {
        assert_ok!(validate_otp("123456"));
        assert_ok!(validate_otp("000000"));

        for otp in ["12a456", "12345", "1234567", "", " 12345", "١٢٣٤٥٦"] {
            assert_eq!(validate_otp(otp), Err(ValidationError::InvalidOtp), "{otp:?}");
        }
    }

    #[test]
    fn test_registration_order() {
        assert_eq!(
            validate_registration("", "user@example.com", "abc12345", "123456"),
            Err(ValidationError::MissingFields)
        );
        // Missing fields wins over every other rule.
        assert_eq!(
            validate_registration("Bob", "user@example.com", "short", ""),
            Err(ValidationError::MissingFields)
        );
        // Password is checked before the OTP.
        assert_eq!(
            validate_registration("Bob", "user@example.com", "short1", "12a456"),
            Err(ValidationError::WeakPassword)
        );
        assert_eq!(
            validate_registration("Bob", "user@example.com", "abc12345", "12a456"),
            Err(ValidationError::InvalidOtp)
        );
        assert_ok!(validate_registration("Bob", "user@example.com", "abc12345", "123456"));
    }

    #[test]
    fn test_messages() {
        assert_eq!(ValidationError::EmailRequired.to_string(), "Email is required");
        assert_eq!(ValidationError::InvalidEmail.to_string(), "Enter a valid email address");
        assert_eq!(ValidationError::MissingFields.to_string(), "All fields are required");
        assert_eq!(ValidationError::InvalidOtp.to_string(), "OTP must be exactly 6 digits");
    }
}
