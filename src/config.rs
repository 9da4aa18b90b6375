// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.
//!
//! Everything is read once at startup. Optional provider keys (Resend, CWA,
//! YouTube) may be absent; the routes that need them report an error at
//! request time instead of failing startup.

use std::env;

/// Maximum number of reminders processed per dispatch invocation.
/// Bounds a single run's email volume.
pub const REMINDER_BATCH_SIZE: usize = 50;

/// Pause between consecutive reminder emails, to stay under the
/// email provider's rate limit.
pub const SEND_PACING_MS: u64 = 600;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Supabase project URL (e.g. https://xyz.supabase.co)
    pub supabase_url: String,
    /// Supabase service-role key (server-side only, bypasses RLS)
    pub supabase_service_role_key: String,
    /// Supabase JWT secret used to verify user access tokens (raw bytes)
    pub supabase_jwt_secret: Vec<u8>,
    /// Shared secret the external scheduler must present on /cron routes
    pub cron_secret: String,
    /// Frontend URL for CORS and email links
    pub frontend_url: String,
    /// Server port
    pub port: u16,

    // --- Optional provider keys ---
    /// Resend API key for reminder emails
    pub resend_api_key: Option<String>,
    /// Sender address for reminder emails
    pub email_from: String,
    /// CWA open-data API key (weather forecasts)
    pub cwa_api_key: Option<String>,
    /// YouTube Data API v3 key (video search)
    pub youtube_api_key: Option<String>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            supabase_url: env::var("SUPABASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_URL"))?,
            supabase_service_role_key: env::var("SUPABASE_SERVICE_ROLE_KEY")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("SUPABASE_SERVICE_ROLE_KEY"))?,
            supabase_jwt_secret: env::var("SUPABASE_JWT_SECRET")
                .map_err(|_| ConfigError::Missing("SUPABASE_JWT_SECRET"))?
                .into_bytes(),
            cron_secret: env::var("CRON_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("CRON_SECRET"))?,
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),

            resend_api_key: env::var("RESEND_API_KEY")
                .ok()
                .map(|v| v.trim().to_string()),
            email_from: env::var("EMAIL_FROM")
                .unwrap_or_else(|_| "VolleyGo <onboarding@resend.dev>".to_string()),
            cwa_api_key: env::var("CWA_API_KEY").ok().map(|v| v.trim().to_string()),
            youtube_api_key: env::var("YOUTUBE_API_KEY")
                .ok()
                .map(|v| v.trim().to_string()),
        })
    }

    /// Default config for tests only.
    pub fn test_default() -> Self {
        Self {
            supabase_url: "http://localhost:54321".to_string(),
            supabase_service_role_key: "test_service_role_key".to_string(),
            supabase_jwt_secret: b"test_jwt_secret_32_bytes_minimum".to_vec(),
            cron_secret: "test_cron_secret".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            port: 8080,
            resend_api_key: Some("re_test_key".to_string()),
            email_from: "VolleyGo <onboarding@resend.dev>".to_string(),
            cwa_api_key: None,
            youtube_api_key: None,
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        env::set_var("SUPABASE_URL", "https://test.supabase.co/");
        env::set_var("SUPABASE_SERVICE_ROLE_KEY", "service_key");
        env::set_var("SUPABASE_JWT_SECRET", "test_jwt_secret_32_bytes_minimum");
        env::set_var("CRON_SECRET", "cron_secret");
        env::remove_var("PORT");

        let config = Config::from_env().expect("Config should load");

        // Trailing slash is stripped so URL joins stay predictable
        assert_eq!(config.supabase_url, "https://test.supabase.co");
        assert_eq!(config.supabase_service_role_key, "service_key");
        assert_eq!(config.cron_secret, "cron_secret");
        assert_eq!(config.port, 8080);
    }
}
