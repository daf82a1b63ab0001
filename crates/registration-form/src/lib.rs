//! Market Mate registration form.
//!
//! A two-phase workflow: request a one-time passcode for an email, then
//! submit name, password and passcode to create the account. The controller
//! owns the form state and validation and talks to the user service through
//! [`RegistrationApi`]; rendering and navigation are left to the caller.

pub mod api;
pub mod controller;
pub mod error;
pub mod form;
pub mod navigation;
pub mod validation;

pub use api::RegistrationApi;
pub use controller::{ControllerSettings, RegistrationController, Submission};
pub use error::{FormError, ValidationError};
pub use form::{FormSnapshot, RegistrationForm, UiStatus, WorkflowPhase};
pub use navigation::{Navigator, Redirect, LOGIN_ROUTE, REDIRECT_DELAY};
