//! Common test utilities for integration tests.

use market_mate_client::{ClientConfig, MarketMateClient};
use registration_form::{ControllerSettings, Navigator, RegistrationController};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::MockServer;

/// Records every route it is asked to navigate to.
#[derive(Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn visited(&self) -> Vec<String> {
        self.visited.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        self.visited.lock().unwrap().push(route.to_string());
    }
}

/// Create a controller talking to a mock user service.
pub fn test_controller(
    mock_server: &MockServer,
    redirect_delay: Duration,
) -> (RegistrationController<MarketMateClient>, Arc<RecordingNavigator>) {
    let client = MarketMateClient::new(
        ClientConfig::new(mock_server.uri()).with_timeout(Duration::from_secs(5)),
    )
    .unwrap();
    let navigator = Arc::new(RecordingNavigator::default());
    let settings = ControllerSettings {
        redirect_delay,
        ..ControllerSettings::default()
    };

    (
        RegistrationController::new(client, navigator.clone(), settings),
        navigator,
    )
}
