// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Lead Intake Service
//!
//! Accepts lead submissions from the website's quote form on
//! `POST /api/lead`, rate-limits them per client, validates and sanitizes
//! them, and forwards each accepted lead as an email notification.
//!
//! ## Configuration
//!
//! Configuration is loaded from environment variables (a `.env` file is
//! read if present):
//!
//! - `BIND_ADDR`: Server bind address (default: 0.0.0.0:8080)
//! - `LEAD_RATE_LIMIT`: Submissions per window per client (default: 5)
//! - `LEAD_RATE_WINDOW_MS`: Window length in milliseconds (default: 60000)
//! - `LEAD_SWEEP_INTERVAL_SECS`: Expired window sweep interval, 0 disables (default: 60)
//! - `RESEND_API_KEY`, `LEAD_FROM_EMAIL`, `LEAD_TO_EMAIL`: Email transport;
//!   if any is missing, leads are only logged
//! - `RESEND_API_URL`: Email API endpoint (default: https://api.resend.com/emails)
//! - `NOTIFY_TIMEOUT_SECS`: Email API timeout (default: 10)
//! - `METRICS_ENABLED`: Expose `/metrics` (default: true)

use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lead_intake::{
    config::Config,
    handlers::{router, AppState},
    limiter::RateLimiter,
    metrics::Metrics,
    notifier::{Notifier, ResendTransport},
    validator::LeadValidator,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before reading anything from the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer().json())
        .with(
            EnvFilter::builder()
                .with_default_directive(Level::INFO.into())
                .from_env_lossy(),
        )
        .init();

    // Load configuration
    let config = Config::from_env();
    info!(
        bind_addr = %config.bind_addr,
        max_requests = config.rate_limit.max_requests,
        window_ms = config.rate_limit.window_ms,
        "Starting lead intake service"
    );

    // Create application state
    let notifier = match config.notifier.transport() {
        Some(settings) => {
            let transport = ResendTransport::new(
                &config.notifier.api_url,
                &settings.api_key,
                config.notifier.timeout(),
            )?;
            info!(to = %settings.to, "Lead notifications enabled");
            Notifier::new(transport, &settings)
        }
        None => {
            warn!("Email transport not configured, leads will only be logged");
            Notifier::log_only()
        }
    };

    let state = Arc::new(AppState {
        limiter: RateLimiter::new(config.rate_limit.clone()),
        validator: LeadValidator::new(),
        notifier,
        metrics: Metrics::new()?,
        config: config.clone(),
    });

    // Spawn sweep task
    if let Some(period) = config.rate_limit.sweep_interval() {
        let limiter = state.limiter.clone();
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            loop {
                interval.tick().await;
                limiter.sweep().await;
            }
        });
    }

    // Build router
    let app = router(state);

    // Start server
    let addr: SocketAddr = config.bind_addr.parse()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %addr, "Server listening");

    axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await?;

    Ok(())
}
