//! Registration form controller.

use crate::api::RegistrationApi;
use crate::error::{FormError, ValidationError};
use crate::form::{FormSnapshot, RegistrationForm, UiStatus, WorkflowPhase};
use crate::navigation::{Navigator, Redirect, LOGIN_ROUTE, REDIRECT_DELAY};
use crate::validation::{validate_email, validate_registration};
use market_mate_client::{OtpRequest, RegisterRequest};
use secrecy::{ExposeSecret, SecretString};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, instrument, warn};

pub const OTP_SENT_MESSAGE: &str = "OTP sent successfully to your email";
pub const OTP_FAILED_MESSAGE: &str = "Failed to send OTP. Try again.";
pub const REGISTERED_MESSAGE: &str = "Registration successful! Redirecting...";
pub const REGISTRATION_FAILED_MESSAGE: &str = "Registration failed. Try again.";

/// Controller settings injected at construction.
#[derive(Debug, Clone)]
pub struct ControllerSettings {
    /// Delay between a successful registration and the redirect
    pub redirect_delay: Duration,

    /// Route to navigate to once registered
    pub login_route: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            redirect_delay: REDIRECT_DELAY,
            login_route: LOGIN_ROUTE.to_string(),
        }
    }
}

/// Result of a submit attempt. The same outcome is mirrored in [`UiStatus`].
#[derive(Debug)]
pub enum Submission {
    /// Another request from this form is still in flight; nothing was done.
    Busy,
    /// Rejected locally; no request was sent.
    Rejected(ValidationError),
    /// The service refused or could not be reached.
    Failed(String),
    /// OTP issued; the form is now in the registration phase.
    OtpSent,
    /// Account created; navigation to login is scheduled.
    Registered(Redirect),
}

struct FormState {
    form: RegistrationForm,
    phase: WorkflowPhase,
    error: Option<String>,
    success_message: Option<String>,
}

impl FormState {
    fn clear_messages(&mut self) {
        self.error = None;
        self.success_message = None;
    }
}

/// Holds the form's in-flight flag for the duration of one request.
///
/// The flag is released on drop, so it also clears when the submitting
/// future is dropped before the call settles.
struct InFlight {
    flag: Arc<AtomicBool>,
}

impl InFlight {
    fn acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Drives the two-phase OTP registration workflow for one form.
///
/// Clones share the same form, so a renderer can hand one clone to each
/// control.
pub struct RegistrationController<A> {
    api: Arc<A>,
    navigator: Arc<dyn Navigator>,
    settings: ControllerSettings,
    state: Arc<RwLock<FormState>>,
    loading: Arc<AtomicBool>,
}

impl<A> Clone for RegistrationController<A> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            navigator: self.navigator.clone(),
            settings: self.settings.clone(),
            state: self.state.clone(),
            loading: self.loading.clone(),
        }
    }
}

impl<A: RegistrationApi> RegistrationController<A> {
    /// Create a controller with an empty form.
    pub fn new(api: A, navigator: Arc<dyn Navigator>, settings: ControllerSettings) -> Self {
        Self {
            api: Arc::new(api),
            navigator,
            settings,
            state: Arc::new(RwLock::new(FormState {
                form: RegistrationForm::default(),
                phase: WorkflowPhase::default(),
                error: None,
                success_message: None,
            })),
            loading: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Route the form redirects to, also used for the "already registered" link.
    pub fn login_route(&self) -> &str {
        &self.settings.login_route
    }

    /// Whether a request is in flight.
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    pub async fn phase(&self) -> WorkflowPhase {
        self.state.read().await.phase
    }

    /// Current observable state.
    pub async fn snapshot(&self) -> FormSnapshot {
        let state = self.state.read().await;
        let status = UiStatus {
            loading: self.is_loading(),
            error: state.error.clone(),
            success_message: state.success_message.clone(),
        };
        FormSnapshot::capture(&state.form, state.phase, status)
    }

    pub async fn set_name(&self, name: impl Into<String>) -> Result<(), FormError> {
        let mut state = self.editable_state().await?;
        state.form.set_name(name.into());
        Ok(())
    }

    /// Edit the email. Refused once the OTP has been sent.
    pub async fn set_email(&self, email: impl Into<String>) -> Result<(), FormError> {
        let mut state = self.editable_state().await?;
        if !state.phase.email_editable() {
            return Err(FormError::EmailLocked);
        }
        state.form.set_email(email.into());
        Ok(())
    }

    pub async fn set_password(&self, password: impl Into<String>) -> Result<(), FormError> {
        let mut state = self.editable_state().await?;
        state.form.set_password(SecretString::new(password.into()));
        Ok(())
    }

    pub async fn set_otp(&self, otp: impl Into<String>) -> Result<(), FormError> {
        let mut state = self.editable_state().await?;
        state.form.set_otp(SecretString::new(otp.into()));
        Ok(())
    }

    /// Request an OTP for the current email. In the registration phase this
    /// is the "resend" action and leaves the phase unchanged.
    #[instrument(skip(self))]
    pub async fn request_otp(&self) -> Submission {
        let (_in_flight, request, resend) = {
            let mut state = self.state.write().await;
            let Some(in_flight) = InFlight::acquire(&self.loading) else {
                return Submission::Busy;
            };
            state.clear_messages();

            if let Err(e) = validate_email(state.form.email()) {
                state.error = Some(e.to_string());
                return Submission::Rejected(e);
            }

            let resend = state.phase == WorkflowPhase::AwaitingRegistration;
            (in_flight, OtpRequest::register(state.form.email()), resend)
        };

        info!(email = %request.email, resend, "Requesting OTP");

        let result = self.api.request_otp(request).await;

        let mut state = self.state.write().await;
        match result {
            Ok(()) => {
                state.phase = WorkflowPhase::AwaitingRegistration;
                state.success_message = Some(OTP_SENT_MESSAGE.to_string());
                info!("OTP sent");
                Submission::OtpSent
            }
            Err(e) => {
                warn!(error = %e, "OTP request failed");
                let message = e.server_message().unwrap_or(OTP_FAILED_MESSAGE).to_string();
                state.error = Some(message.clone());
                Submission::Failed(message)
            }
        }
    }

    /// Submit the registration. Only accepted once an OTP has been sent.
    /// On success the form is cleared and the redirect to login is scheduled.
    #[instrument(skip(self))]
    pub async fn register(&self) -> Submission {
        let (_in_flight, request) = {
            let mut state = self.state.write().await;
            let Some(in_flight) = InFlight::acquire(&self.loading) else {
                return Submission::Busy;
            };
            state.clear_messages();

            if state.phase != WorkflowPhase::AwaitingRegistration {
                let e = ValidationError::OtpNotRequested;
                state.error = Some(e.to_string());
                return Submission::Rejected(e);
            }

            let validation = validate_registration(
                state.form.name(),
                state.form.email(),
                state.form.password().expose_secret(),
                state.form.otp().expose_secret(),
            );
            if let Err(e) = validation {
                state.error = Some(e.to_string());
                return Submission::Rejected(e);
            }

            let form = &state.form;
            let request = RegisterRequest::new(
                form.email(),
                form.name(),
                SecretString::new(form.password().expose_secret().clone()),
                SecretString::new(form.otp().expose_secret().clone()),
            );
            (in_flight, request)
        };

        info!(email = %request.email, "Submitting registration");

        let result = self.api.register(request).await;

        let mut state = self.state.write().await;
        match result {
            Ok(()) => {
                state.success_message = Some(REGISTERED_MESSAGE.to_string());
                state.form.clear();
                info!("Registration complete");

                Submission::Registered(Redirect::schedule(
                    self.navigator.clone(),
                    self.settings.login_route.clone(),
                    self.settings.redirect_delay,
                ))
            }
            Err(e) => {
                warn!(error = %e, "Registration failed");
                let message = e
                    .server_message()
                    .unwrap_or(REGISTRATION_FAILED_MESSAGE)
                    .to_string();
                state.error = Some(message.clone());
                Submission::Failed(message)
            }
        }
    }

    /// Write access to the form, refused while a request is in flight.
    async fn editable_state(&self) -> Result<tokio::sync::RwLockWriteGuard<'_, FormState>, FormError> {
        let state = self.state.write().await;
        if self.is_loading() {
            return Err(FormError::Busy);
        }
        Ok(state)
    }
}
