// SPDX-License-Identifier: MIT

//! Email reminder model.
//!
//! A reminder is a user's request to be emailed before a match starts.
//! `sent` only ever moves false -> true; the dispatch job is the sole writer.

use crate::models::matches::{Gender, League};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Denormalized match snapshot embedded in reminders and favorites.
///
/// Captured at creation time so the reminder email renders even if the
/// source match row changes or disappears.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchSnapshot {
    pub home_team: String,
    pub away_team: String,
    /// Local date "YYYY-MM-DD"
    pub date: String,
    /// Local time "HH:MM"
    pub time: Option<String>,
    pub location: Option<String>,
    pub league: League,
    pub gender: Gender,
    pub url: Option<String>,
}

/// Row from `email_reminders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub user_id: String,
    pub match_id: String,
    pub match_data: MatchSnapshot,
    pub remind_at: DateTime<Utc>,
    pub sent: bool,
    pub sent_at: Option<DateTime<Utc>>,
}
