// SPDX-License-Identifier: MIT

//! Match model merged from the two league tables.
//!
//! TPVL rows reference teams by id (resolved through `tpvl_teams`); TVL rows
//! carry team names inline. Merged matches are namespaced `tpvl_<n>` /
//! `tvl_<n>` so ids stay unique across leagues.

use serde::{Deserialize, Serialize};

/// League a match belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum League {
    #[serde(rename = "TPVL")]
    Tpvl,
    #[serde(rename = "TVL")]
    Tvl,
}

/// Division within a league.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Upcoming,
    Finished,
}

/// A match as served to clients (read-only, sourced from Supabase).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    /// Namespaced id, e.g. "tpvl_12"
    pub id: String,
    pub league: League,
    pub gender: Gender,
    pub home_team: String,
    pub away_team: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    /// Local date "YYYY-MM-DD"
    pub date: String,
    /// Local time "HH:MM", if scheduled
    pub time: Option<String>,
    pub location: Option<String>,
    pub status: MatchStatus,
    pub set_scores: Option<Vec<String>>,
    pub url: Option<String>,
}

// ─── Raw Supabase rows ───────────────────────────────────────

/// Row from `tpvl_teams`.
#[derive(Debug, Clone, Deserialize)]
pub struct TpvlTeamRow {
    pub id: i64,
    pub name: String,
}

/// Row from `tpvl_matches`.
#[derive(Debug, Clone, Deserialize)]
pub struct TpvlMatchRow {
    pub id: i64,
    pub home_team_id: i64,
    pub away_team_id: i64,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub match_date: String,
    pub match_time: Option<String>,
    pub venue: Option<String>,
    pub status: String,
}

/// Row from `tvl_matches`.
#[derive(Debug, Clone, Deserialize)]
pub struct TvlMatchRow {
    pub id: i64,
    pub gender: Gender,
    pub home_team_name: String,
    pub away_team_name: String,
    pub home_score: Option<i32>,
    pub away_score: Option<i32>,
    pub match_date: String,
    pub match_time: Option<String>,
    /// Comma-separated set scores, e.g. "25-20, 25-23, 22-25"
    pub set_scores: Option<String>,
    pub status: String,
    pub url: Option<String>,
}
