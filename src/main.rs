// SPDX-License-Identifier: MIT

//! VolleyGo API Server
//!
//! Serves merged TPVL/TVL volleyball match data with favorites, comments
//! and email reminders on top of Supabase, plus weather and video widgets.

use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use volleygo_api::{
    config::Config,
    db::SupabaseDb,
    services::{CwaClient, MatchCatalog, ResendClient, YoutubeClient},
    AppState,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize structured JSON logging
    init_logging();

    // Load configuration from environment
    let config = Config::from_env().expect("Failed to load configuration");
    tracing::info!(port = config.port, "Starting VolleyGo API");

    // Supabase client (PostgREST + GoTrue admin)
    let db = SupabaseDb::new(&config.supabase_url, &config.supabase_service_role_key);
    tracing::info!(url = %config.supabase_url, "Supabase client initialized");

    let catalog = MatchCatalog::new(db.clone());

    let email = config
        .resend_api_key
        .clone()
        .map(|key| ResendClient::new(key, config.email_from.clone()));
    if email.is_none() {
        tracing::warn!("RESEND_API_KEY not set; reminder dispatch will fail until configured");
    }

    let weather = config.cwa_api_key.clone().map(CwaClient::new);
    let youtube = config.youtube_api_key.clone().map(YoutubeClient::new);

    // Build shared state
    let state = Arc::new(AppState {
        config: config.clone(),
        db,
        catalog,
        email,
        weather,
        youtube,
    });

    // Build router
    let app = volleygo_api::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("volleygo_api=debug".parse().unwrap())
                .add_directive("info".parse().unwrap()),
        )
        .with(format)
        .init();
}
