//! Market Mate registration - terminal entry point.

mod config;
mod error;
mod terminal;

use crate::config::Config;
use crate::error::AppResult;
use crate::terminal::Terminal;
use anyhow::Context;
use market_mate_client::MarketMateClient;
use registration_form::{Navigator, RegistrationController};
use std::sync::Arc;
use tokio::io::{stdin, stdout, BufReader};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    info!("Starting Market Mate registration");
    info!("User service: {}", config.api.base_url);

    let client = MarketMateClient::new(config.client_config())?;

    let navigator: Arc<dyn Navigator> = Arc::new(|route: &str| {
        println!("Opening {}", route);
    });

    let controller = RegistrationController::new(client, navigator, config.controller_settings());
    let mut terminal = Terminal::new(BufReader::new(stdin()), stdout());

    tokio::select! {
        result = terminal.run(&controller) => {
            match result? {
                Some(redirect) => {
                    info!("Registration complete, redirecting to {}", redirect.route());
                    redirect.wait().await;
                }
                None => info!("Input closed before registration completed"),
            }
        }
        _ = signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
