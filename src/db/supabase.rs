// SPDX-License-Identifier: MIT

//! Supabase client wrapper with typed operations.
//!
//! Talks to PostgREST (`/rest/v1/...`) for table access and to the GoTrue
//! admin API (`/auth/v1/admin/users`) for the user directory, using the
//! service-role key. Row-level security does not apply to this client, so
//! every operation scopes its filters explicitly.

use crate::db::tables;
use crate::error::AppError;
use crate::models::matches::{TpvlMatchRow, TpvlTeamRow, TvlMatchRow};
use crate::models::{Comment, DirectoryUser, Favorite, MatchSnapshot, Reminder};
use crate::time_utils::format_utc_rfc3339;
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Supabase database client.
#[derive(Clone)]
pub struct SupabaseDb {
    http: reqwest::Client,
    /// None in offline mock mode: every operation returns an error.
    base_url: Option<String>,
    service_key: String,
}

impl SupabaseDb {
    /// Create a new Supabase client using the service-role key.
    pub fn new(base_url: &str, service_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: Some(base_url.trim_end_matches('/').to_string()),
            service_key: service_key.to_string(),
        }
    }

    /// Create a mock client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: None,
            service_key: String::new(),
        }
    }

    /// Helper to get the base URL or return an error if offline.
    fn base_url(&self) -> Result<&str, AppError> {
        self.base_url
            .as_deref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }

    fn rest_url(&self, table: &str) -> Result<String, AppError> {
        Ok(format!("{}/rest/v1/{}", self.base_url()?, table))
    }

    /// Attach the service-role credentials PostgREST/GoTrue expect.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        req.header("apikey", &self.service_key)
            .bearer_auth(&self.service_key)
    }

    /// Check response status, returning the response or a database error.
    async fn check(&self, response: reqwest::Response) -> Result<reqwest::Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        Err(AppError::Database(format!(
            "Supabase returned {}: {}",
            status, body
        )))
    }

    async fn check_json<T: DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, AppError> {
        self.check(response)
            .await?
            .json()
            .await
            .map_err(|e| AppError::Database(format!("Invalid Supabase response: {}", e)))
    }

    /// Insert a row and return the created record
    /// (PostgREST responds with an array under `return=representation`).
    async fn insert_returning<T: DeserializeOwned>(
        &self,
        table: &str,
        body: serde_json::Value,
    ) -> Result<T, AppError> {
        let response = self
            .authorize(self.http.post(self.rest_url(table)?))
            .header("Prefer", "return=representation")
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut rows: Vec<T> = self.check_json(response).await?;
        rows.pop()
            .ok_or_else(|| AppError::Database(format!("Insert into {} returned no row", table)))
    }

    // ─── Reminder Operations ─────────────────────────────────────

    /// Query unsent reminders that are due at `now`, capped at `limit`.
    /// No ordering is requested; the batch cap bounds email volume per run.
    pub async fn due_reminders(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Reminder>, AppError> {
        let due_filter = format!("lte.{}", format_utc_rfc3339(now));
        let limit = limit.to_string();
        let response = self
            .authorize(self.http.get(self.rest_url(tables::EMAIL_REMINDERS)?))
            .query(&[
                ("select", "*"),
                ("sent", "eq.false"),
                ("remind_at", due_filter.as_str()),
                ("limit", limit.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_json(response).await
    }

    /// Mark a reminder sent. `sent` only ever transitions false -> true.
    pub async fn mark_reminder_sent(
        &self,
        id: i64,
        sent_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let response = self
            .authorize(self.http.patch(self.rest_url(tables::EMAIL_REMINDERS)?))
            .query(&[("id", &format!("eq.{}", id))])
            .json(&serde_json::json!({
                "sent": true,
                "sent_at": format_utc_rfc3339(sent_at),
            }))
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check(response).await?;
        Ok(())
    }

    /// Find a user's active (unsent) reminder for a match, if any.
    pub async fn find_unsent_reminder(
        &self,
        user_id: &str,
        match_id: &str,
    ) -> Result<Option<Reminder>, AppError> {
        let user_filter = format!("eq.{}", user_id);
        let match_filter = format!("eq.{}", match_id);
        let response = self
            .authorize(self.http.get(self.rest_url(tables::EMAIL_REMINDERS)?))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("match_id", match_filter.as_str()),
                ("sent", "eq.false"),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut rows: Vec<Reminder> = self.check_json(response).await?;
        Ok(rows.pop())
    }

    /// Create a reminder (unsent).
    pub async fn insert_reminder(
        &self,
        user_id: &str,
        match_id: &str,
        match_data: &MatchSnapshot,
        remind_at: DateTime<Utc>,
    ) -> Result<Reminder, AppError> {
        self.insert_returning(
            tables::EMAIL_REMINDERS,
            serde_json::json!({
                "user_id": user_id,
                "match_id": match_id,
                "match_data": match_data,
                "remind_at": format_utc_rfc3339(remind_at),
                "sent": false,
            }),
        )
        .await
    }

    /// Cancel a user's unsent reminder for a match. Sent reminders are
    /// history and stay untouched.
    pub async fn delete_unsent_reminder(
        &self,
        user_id: &str,
        match_id: &str,
    ) -> Result<(), AppError> {
        let user_filter = format!("eq.{}", user_id);
        let match_filter = format!("eq.{}", match_id);
        let response = self
            .authorize(self.http.delete(self.rest_url(tables::EMAIL_REMINDERS)?))
            .query(&[
                ("user_id", user_filter.as_str()),
                ("match_id", match_filter.as_str()),
                ("sent", "eq.false"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check(response).await?;
        Ok(())
    }

    // ─── Favorite Operations ─────────────────────────────────────

    /// Get a user's favorites, newest first.
    pub async fn favorites_for_user(&self, user_id: &str) -> Result<Vec<Favorite>, AppError> {
        let user_filter = format!("eq.{}", user_id);
        let response = self
            .authorize(self.http.get(self.rest_url(tables::FAVORITES)?))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("order", "created_at.desc"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_json(response).await
    }

    pub async fn find_favorite(
        &self,
        user_id: &str,
        match_id: &str,
    ) -> Result<Option<Favorite>, AppError> {
        let user_filter = format!("eq.{}", user_id);
        let match_filter = format!("eq.{}", match_id);
        let response = self
            .authorize(self.http.get(self.rest_url(tables::FAVORITES)?))
            .query(&[
                ("select", "*"),
                ("user_id", user_filter.as_str()),
                ("match_id", match_filter.as_str()),
                ("limit", "1"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut rows: Vec<Favorite> = self.check_json(response).await?;
        Ok(rows.pop())
    }

    pub async fn insert_favorite(
        &self,
        user_id: &str,
        match_id: &str,
        match_data: &MatchSnapshot,
    ) -> Result<Favorite, AppError> {
        self.insert_returning(
            tables::FAVORITES,
            serde_json::json!({
                "user_id": user_id,
                "match_id": match_id,
                "match_data": match_data,
            }),
        )
        .await
    }

    pub async fn delete_favorite(&self, user_id: &str, match_id: &str) -> Result<(), AppError> {
        let user_filter = format!("eq.{}", user_id);
        let match_filter = format!("eq.{}", match_id);
        let response = self
            .authorize(self.http.delete(self.rest_url(tables::FAVORITES)?))
            .query(&[
                ("user_id", user_filter.as_str()),
                ("match_id", match_filter.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check(response).await?;
        Ok(())
    }

    // ─── Comment Operations ──────────────────────────────────────

    /// Get comments for a match, oldest first.
    pub async fn comments_for_match(&self, post_id: &str) -> Result<Vec<Comment>, AppError> {
        let post_filter = format!("eq.{}", post_id);
        let response = self
            .authorize(self.http.get(self.rest_url(tables::COMMENTS)?))
            .query(&[
                ("select", "*"),
                ("post_id", post_filter.as_str()),
                ("order", "created_at.asc"),
            ])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_json(response).await
    }

    /// Count comments for a match without fetching rows.
    pub async fn comment_count(&self, post_id: &str) -> Result<u64, AppError> {
        let response = self
            .authorize(self.http.get(self.rest_url(tables::COMMENTS)?))
            .query(&[
                ("select", "id"),
                ("post_id", format!("eq.{}", post_id).as_str()),
            ])
            .header("Prefer", "count=exact")
            .header("Range", "0-0")
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let response = self.check(response).await?;
        // Total comes back as "content-range: 0-0/<total>" (or "*/0" when empty)
        let total = response
            .headers()
            .get("content-range")
            .and_then(|h| h.to_str().ok())
            .and_then(|range| range.rsplit('/').next())
            .and_then(|total| total.parse().ok())
            .unwrap_or(0);
        Ok(total)
    }

    pub async fn insert_comment(
        &self,
        user_id: &str,
        post_id: &str,
        author_name: Option<&str>,
        content: &str,
    ) -> Result<Comment, AppError> {
        self.insert_returning(
            tables::COMMENTS,
            serde_json::json!({
                "user_id": user_id,
                "post_id": post_id,
                "author_name": author_name,
                "content": content,
            }),
        )
        .await
    }

    pub async fn get_comment(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let response = self
            .authorize(self.http.get(self.rest_url(tables::COMMENTS)?))
            .query(&[("select", "*"), ("id", format!("eq.{}", id).as_str())])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let mut rows: Vec<Comment> = self.check_json(response).await?;
        Ok(rows.pop())
    }

    pub async fn delete_comment(&self, id: i64) -> Result<(), AppError> {
        let response = self
            .authorize(self.http.delete(self.rest_url(tables::COMMENTS)?))
            .query(&[("id", &format!("eq.{}", id))])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check(response).await?;
        Ok(())
    }

    // ─── Match Operations ────────────────────────────────────────

    pub async fn tpvl_teams(&self) -> Result<Vec<TpvlTeamRow>, AppError> {
        let response = self
            .authorize(self.http.get(self.rest_url(tables::TPVL_TEAMS)?))
            .query(&[("select", "id,name")])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_json(response).await
    }

    pub async fn tpvl_matches(&self) -> Result<Vec<TpvlMatchRow>, AppError> {
        let response = self
            .authorize(self.http.get(self.rest_url(tables::TPVL_MATCHES)?))
            .query(&[("select", "*"), ("order", "match_date.desc")])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_json(response).await
    }

    pub async fn tvl_matches(&self) -> Result<Vec<TvlMatchRow>, AppError> {
        let response = self
            .authorize(self.http.get(self.rest_url(tables::TVL_MATCHES)?))
            .query(&[("select", "*"), ("order", "match_date.desc")])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        self.check_json(response).await
    }

    // ─── User Directory ──────────────────────────────────────────

    /// Bulk listing of auth users via the GoTrue admin API.
    /// Used to build an id -> email map; no per-user lookup is performed.
    pub async fn list_users(&self) -> Result<Vec<DirectoryUser>, AppError> {
        #[derive(Deserialize)]
        struct UsersPage {
            users: Vec<DirectoryUser>,
        }

        let url = format!("{}/auth/v1/admin/users", self.base_url()?);
        let response = self
            .authorize(self.http.get(url))
            .query(&[("per_page", "1000")])
            .send()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let page: UsersPage = self.check_json(response).await?;
        Ok(page.users)
    }
}
