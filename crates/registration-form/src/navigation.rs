//! Hand-off to the navigation collaborator after registration.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use tracing::{info, warn};

/// Route of the login page.
pub const LOGIN_ROUTE: &str = "/market-mate/login";

/// Delay between a successful registration and the redirect to login.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(2000);

/// Moves the user to another page.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

impl<F> Navigator for F
where
    F: Fn(&str) + Send + Sync,
{
    fn navigate(&self, route: &str) {
        self(route)
    }
}

/// A navigation scheduled after a fixed delay.
///
/// Dropping the handle does not cancel the navigation.
#[derive(Debug)]
pub struct Redirect {
    route: String,
    handle: JoinHandle<()>,
}

impl Redirect {
    pub(crate) fn schedule(navigator: Arc<dyn Navigator>, route: String, delay: Duration) -> Self {
        let target = route.clone();
        let handle = tokio::spawn(async move {
            sleep(delay).await;
            info!(route = %target, "Redirecting");
            navigator.navigate(&target);
        });

        Self { route, handle }
    }

    /// Destination of the redirect.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Wait until the navigation has happened.
    pub async fn wait(self) {
        if let Err(e) = self.handle.await {
            warn!("Redirect task failed: {}", e);
        }
    }
}
