// SPDX-License-Identifier: MIT

use std::sync::Arc;
use volleygo_api::config::Config;
use volleygo_api::db::SupabaseDb;
use volleygo_api::routes::create_router;
use volleygo_api::services::{MatchCatalog, ResendClient};
use volleygo_api::AppState;

/// Create a mock database connection (offline).
#[allow(dead_code)]
pub fn test_db_offline() -> SupabaseDb {
    SupabaseDb::new_mock()
}

/// Create a test app with offline mock dependencies.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let catalog = MatchCatalog::new(db.clone());
    let email = config
        .resend_api_key
        .clone()
        .map(|key| ResendClient::new(key, config.email_from.clone()));

    let state = Arc::new(AppState {
        config,
        db,
        catalog,
        email,
        weather: None,
        youtube: None,
    });

    (create_router(state.clone()), state)
}

/// Same as `create_test_app` but without an email provider configured.
#[allow(dead_code)]
pub fn create_test_app_without_email() -> (axum::Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db_offline();
    let catalog = MatchCatalog::new(db.clone());

    let state = Arc::new(AppState {
        config,
        db,
        catalog,
        email: None,
        weather: None,
        youtube: None,
    });

    (create_router(state.clone()), state)
}
