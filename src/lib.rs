// SPDX-License-Identifier: MIT

//! VolleyGo: Taiwanese volleyball schedules, results and reminders
//!
//! This crate provides the backend API for the VolleyGo web app: merged
//! TPVL/TVL match listings, per-user favorites and email reminders,
//! comments, and weather/video lookups. A scheduler-triggered batch job
//! emails due reminders.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use db::SupabaseDb;
use services::{CwaClient, MatchCatalog, ResendClient, YoutubeClient};

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: SupabaseDb,
    pub catalog: MatchCatalog,
    /// None when RESEND_API_KEY is absent; the cron route reports the gap
    pub email: Option<ResendClient>,
    pub weather: Option<CwaClient>,
    pub youtube: Option<YoutubeClient>,
}
