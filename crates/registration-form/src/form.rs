//! Form record, workflow phase and UI status.

use secrecy::{ExposeSecret, SecretString};

/// Position in the two-step registration flow.
///
/// The only transition is `AwaitingOtpRequest -> AwaitingRegistration`;
/// nothing moves a form back.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WorkflowPhase {
    /// Collecting the email, waiting for an OTP to be requested.
    #[default]
    AwaitingOtpRequest,
    /// OTP issued; collecting name, password and OTP.
    AwaitingRegistration,
}

impl WorkflowPhase {
    /// Whether the email field accepts edits in this phase.
    pub fn email_editable(self) -> bool {
        matches!(self, WorkflowPhase::AwaitingOtpRequest)
    }
}

/// Transient status shown next to the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiStatus {
    /// True only while a network call is in flight.
    pub loading: bool,
    pub error: Option<String>,
    pub success_message: Option<String>,
}

/// Field values for one page visit.
///
/// Password and OTP are secrets: redacted in `Debug` and zeroized when
/// replaced or dropped.
#[derive(Debug)]
pub struct RegistrationForm {
    name: String,
    email: String,
    password: SecretString,
    otp: SecretString,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            password: empty_secret(),
            otp: empty_secret(),
        }
    }
}

impl RegistrationForm {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &SecretString {
        &self.password
    }

    pub fn otp(&self) -> &SecretString {
        &self.otp
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_email(&mut self, email: String) {
        self.email = email;
    }

    pub(crate) fn set_password(&mut self, password: SecretString) {
        self.password = password;
    }

    pub(crate) fn set_otp(&mut self, otp: SecretString) {
        self.otp = otp;
    }

    /// Drop every field value. Replaced secrets are zeroized.
    pub(crate) fn clear(&mut self) {
        *self = Self::default();
    }
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

/// Read-only view of a form for renderers. Never carries secret values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub phase: WorkflowPhase,
    pub name: String,
    pub email: String,
    pub email_editable: bool,
    pub password_set: bool,
    pub otp_set: bool,
    pub status: UiStatus,
}

impl FormSnapshot {
    pub(crate) fn capture(form: &RegistrationForm, phase: WorkflowPhase, status: UiStatus) -> Self {
        Self {
            phase,
            name: form.name.clone(),
            email: form.email.clone(),
            email_editable: phase.email_editable(),
            password_set: !form.password.expose_secret().is_empty(),
            otp_set: !form.otp.expose_secret().is_empty(),
            status,
        }
    }
}
