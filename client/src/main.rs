//! Gym Tracker command-line client
//!
//! Logs in against the configured backend and prints the user's dashboard
//! as JSON.
//!
//! ## Usage
//!
//! ```text
//! GT__API__MODE=server GT__API__BASE_URL=https://gym.example.com/api \
//! GYM_TRACKER_EMAIL=teacher@gym.com GYM_TRACKER_PASSWORD=secret gym-tracker
//! ```

use std::env;

use anyhow::Result;
use chrono::Local;
use gym_tracker_client::api::build_api;
use gym_tracker_client::config::{self, BackendMode};
use gym_tracker_client::services::DashboardService;
use gym_tracker_client::storage;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_EMAIL: &str = "student@gym.com";
const DEFAULT_PASSWORD: &str = "demo";

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    init_tracing();

    let config = config::AppConfig::load()?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        env = if config::AppConfig::is_production() { "production" } else { "development" },
        mode = ?config.api.mode,
        "Starting Gym Tracker client"
    );

    if config::AppConfig::is_production() {
        validate_production_config(&config)?;
    }

    let storage = storage::open(&config.storage);
    let api = build_api(&config, storage)?;

    let email = env::var("GYM_TRACKER_EMAIL").unwrap_or_else(|_| DEFAULT_EMAIL.to_string());
    let password =
        env::var("GYM_TRACKER_PASSWORD").unwrap_or_else(|_| DEFAULT_PASSWORD.to_string());

    let user = match api.login(&email, &password).await {
        Ok(user) => user,
        Err(err) => {
            error!(status = err.status(), "Login failed: {}", err);
            anyhow::bail!(err.user_message());
        }
    };

    let dashboard = match DashboardService::new(api.clone())
        .load(&user, &[], &Local::now())
        .await
    {
        Ok(dashboard) => dashboard,
        Err(err) => {
            error!(status = err.status(), "Failed to load dashboard: {}", err);
            anyhow::bail!(err.user_message());
        }
    };

    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if config::AppConfig::is_production() {
            "gym_tracker_client=info".into()
        } else {
            "gym_tracker_client=debug,gym_tracker=debug,reqwest=warn".into()
        }
    });

    // stdout carries only the dashboard JSON
    let subscriber = tracing_subscriber::registry().with(env_filter);

    if config::AppConfig::is_production() {
        subscriber
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        subscriber
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init();
    }
}

/// Validate configuration for production deployment
fn validate_production_config(config: &config::AppConfig) -> Result<()> {
    let mut errors = Vec::new();

    match config.api.mode {
        BackendMode::Server => {
            if !config.api.base_url.starts_with("https://") {
                errors.push("api.base_url must use https in production");
            }
        }
        BackendMode::Mock => {
            warn!("Mock backend selected in production - data is local sample data only");
        }
    }

    if config.api.timeout_ms == 0 {
        errors.push("api.timeout_ms must be greater than zero");
    }

    if !errors.is_empty() {
        for err in &errors {
            error!("Configuration error: {}", err);
        }
        anyhow::bail!("Invalid production configuration");
    }

    Ok(())
}
