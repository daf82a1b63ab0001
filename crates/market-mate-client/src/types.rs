//! Request and response bodies for the Market Mate user service.

use secrecy::{ExposeSecret, SecretString};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};

/// Purpose tag attached to OTP and registration requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Register,
}

/// Body of `POST /market-mate/user/otp/request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OtpRequest {
    pub email: String,
    pub purpose: Purpose,
}

impl OtpRequest {
    /// Request an OTP for account registration.
    pub fn register(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            purpose: Purpose::Register,
        }
    }
}

/// Body of `POST /market-mate/user/register`.
///
/// Password and OTP are held as secrets so they never show up in `Debug`
/// output; they are only exposed while the body is serialized.
#[derive(Debug)]
pub struct RegisterRequest {
    pub email: String,
    pub name: String,
    pub password: SecretString,
    pub otp: SecretString,
    pub purpose: Purpose,
}

impl RegisterRequest {
    pub fn new(
        email: impl Into<String>,
        name: impl Into<String>,
        password: SecretString,
        otp: SecretString,
    ) -> Self {
        Self {
            email: email.into(),
            name: name.into(),
            password,
            otp,
            purpose: Purpose::Register,
        }
    }
}

impl Serialize for RegisterRequest {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RegisterRequest", 5)?;
        state.serialize_field("email", &self.email)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("password", self.password.expose_secret())?;
        state.serialize_field("otp", self.otp.expose_secret())?;
        state.serialize_field("purpose", &self.purpose)?;
        state.end()
    }
}

/// Error body returned by the service on non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
}
