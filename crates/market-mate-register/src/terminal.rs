//! Line-oriented terminal rendering of the registration form.

use crate::error::AppResult;
use registration_form::{
    FormSnapshot, Redirect, RegistrationApi, RegistrationController, Submission, WorkflowPhase,
};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

/// Typed at the OTP prompt to request a new passcode.
pub const RESEND_COMMAND: &str = "resend";

/// Input is read line by line from the terminal, so the password is echoed.
pub const PASSWORD_PROMPT: &str = "Password (visible as you type): ";

/// Renders the form on a terminal and feeds typed lines into the controller.
pub struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R, W> Terminal<R, W>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    pub fn new(input: R, out: W) -> Self {
        Self {
            lines: input.lines(),
            out,
        }
    }

    /// Run the form until the account is created or input ends.
    ///
    /// Returns the pending redirect when registration succeeded.
    pub async fn run<A: RegistrationApi>(
        &mut self,
        controller: &RegistrationController<A>,
    ) -> AppResult<Option<Redirect>> {
        self.print("Register\nCreate your account to get started.\n").await?;
        self.print(&format!(
            "Already have an account? Login: {}\n\n",
            controller.login_route()
        ))
        .await?;

        loop {
            match controller.phase().await {
                WorkflowPhase::AwaitingOtpRequest => {
                    let Some(email) = self.prompt("Email: ").await? else {
                        return Ok(None);
                    };
                    controller.set_email(email).await?;

                    self.print("Requesting OTP...\n").await?;
                    controller.request_otp().await;
                    self.render_status(&controller.snapshot().await).await?;
                }
                WorkflowPhase::AwaitingRegistration => {
                    let snapshot = controller.snapshot().await;
                    self.print(&format!("Email: {} (locked)\n", snapshot.email)).await?;

                    let Some(name) = self.prompt("Username: ").await? else {
                        return Ok(None);
                    };
                    let Some(password) = self.prompt(PASSWORD_PROMPT).await? else {
                        return Ok(None);
                    };
                    let Some(otp) = self
                        .prompt(&format!("Enter 6-digit OTP (or '{RESEND_COMMAND}'): "))
                        .await?
                    else {
                        return Ok(None);
                    };

                    controller.set_name(name).await?;
                    controller.set_password(password).await?;

                    if otp.trim() == RESEND_COMMAND {
                        self.print("Requesting OTP...\n").await?;
                        controller.request_otp().await;
                        self.render_status(&controller.snapshot().await).await?;
                        continue;
                    }

                    controller.set_otp(otp).await?;

                    self.print("Creating account...\n").await?;
                    let outcome = controller.register().await;
                    self.render_status(&controller.snapshot().await).await?;

                    if let Submission::Registered(redirect) = outcome {
                        return Ok(Some(redirect));
                    }
                }
            }
        }
    }

    async fn prompt(&mut self, label: &str) -> AppResult<Option<String>> {
        self.print(label).await?;
        let line = self.lines.next_line().await?;
        if line.is_none() {
            debug!("Input closed");
        }
        Ok(line)
    }

    async fn render_status(&mut self, snapshot: &FormSnapshot) -> AppResult<()> {
        if let Some(error) = &snapshot.status.error {
            self.print(&format!("error: {}\n", error)).await?;
        }
        if let Some(message) = &snapshot.status.success_message {
            self.print(&format!("{}\n", message)).await?;
        }
        Ok(())
    }

    async fn print(&mut self, text: &str) -> AppResult<()> {
        self.out.write_all(text.as_bytes()).await?;
        self.out.flush().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use market_mate_client::{ClientConfig, MarketMateClient, OTP_REQUEST_PATH, REGISTER_PATH};
    use registration_form::{ControllerSettings, Navigator, LOGIN_ROUTE};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_controller(
        mock_server: &MockServer,
        visited: Arc<Mutex<Vec<String>>>,
    ) -> RegistrationController<MarketMateClient> {
        let client = MarketMateClient::new(
            ClientConfig::new(mock_server.uri()).with_timeout(Duration::from_secs(5)),
        )
        .unwrap();
        let navigator: Arc<dyn Navigator> =
            Arc::new(move |route: &str| visited.lock().unwrap().push(route.to_string()));
        let settings = ControllerSettings {
            redirect_delay: Duration::from_millis(10),
            ..ControllerSettings::default()
        };
        RegistrationController::new(client, navigator, settings)
    }

    async fn run_with_input(
        controller: &RegistrationController<MarketMateClient>,
        input: &str,
    ) -> (Option<Redirect>, String) {
        let mut out = Vec::new();
        let redirect = Terminal::new(input.as_bytes(), &mut out)
            .run(controller)
            .await
            .unwrap();
        (redirect, String::from_utf8(out).unwrap())
    }

    #[tokio::test]
    async fn test_register_from_terminal() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(OTP_REQUEST_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .and(path(REGISTER_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let visited = Arc::new(Mutex::new(Vec::new()));
        let controller = test_controller(&mock_server, visited.clone());

        let (redirect, output) =
            run_with_input(&controller, "user@example.com\nBob\nabc12345\n123456\n").await;

        assert!(output.contains("Already have an account? Login: /market-mate/login"));
        assert!(output.contains("OTP sent successfully to your email"));
        assert!(output.contains("Email: user@example.com (locked)"));
        assert!(output.contains("Registration successful! Redirecting..."));
        assert!(output.contains(PASSWORD_PROMPT));
        assert!(!output.contains("abc12345"));

        redirect.expect("registration should succeed").wait().await;
        assert_eq!(*visited.lock().unwrap(), vec![LOGIN_ROUTE.to_string()]);
    }

    #[tokio::test]
    async fn test_errors_are_rendered_and_input_end_stops() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let controller = test_controller(&mock_server, Arc::new(Mutex::new(Vec::new())));

        let (redirect, output) = run_with_input(&controller, "not-an-email\n").await;

        assert!(redirect.is_none());
        assert!(output.contains("error: Enter a valid email address"));
    }

    #[tokio::test]
    async fn test_resend_from_otp_prompt() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(OTP_REQUEST_PATH))
            .respond_with(ResponseTemplate::new(200))
            .expect(2)
            .mount(&mock_server)
            .await;

        let controller = test_controller(&mock_server, Arc::new(Mutex::new(Vec::new())));

        let (redirect, output) =
            run_with_input(&controller, "user@example.com\nBob\nabc12345\nresend\n").await;

        assert!(redirect.is_none());
        assert_eq!(output.matches("OTP sent successfully to your email").count(), 2);
        assert_eq!(controller.phase().await, WorkflowPhase::AwaitingRegistration);
    }
}
