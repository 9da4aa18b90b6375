// SPDX-License-Identifier: MIT

//! Match catalog: merges the two league tables into one client-facing list.

use crate::db::SupabaseDb;
use crate::error::AppError;
use crate::models::matches::{TpvlMatchRow, TvlMatchRow};
use crate::models::{Gender, League, Match, MatchStatus};
use crate::time_utils::match_start_utc;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;

const UNKNOWN_TEAM: &str = "Unknown team";

/// Window used by the "upcoming" filter.
const UPCOMING_WINDOW_DAYS: i64 = 7;

/// Read-only catalog over the league tables.
#[derive(Clone)]
pub struct MatchCatalog {
    db: SupabaseDb,
}

impl MatchCatalog {
    pub fn new(db: SupabaseDb) -> Self {
        Self { db }
    }

    /// All matches from both leagues, newest first.
    pub async fn all_matches(&self) -> Result<Vec<Match>, AppError> {
        let (teams, tpvl, tvl) = tokio::try_join!(
            self.db.tpvl_teams(),
            self.db.tpvl_matches(),
            self.db.tvl_matches(),
        )?;

        let team_names: HashMap<i64, String> =
            teams.into_iter().map(|t| (t.id, t.name)).collect();

        let mut matches: Vec<Match> = tpvl
            .into_iter()
            .map(|row| tpvl_match(row, &team_names))
            .chain(tvl.into_iter().map(tvl_match))
            .collect();

        // Newest first; ties keep fetch order
        matches.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(matches)
    }
}

fn tpvl_match(row: TpvlMatchRow, team_names: &HashMap<i64, String>) -> Match {
    let team = |id: i64| {
        team_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| UNKNOWN_TEAM.to_string())
    };

    Match {
        id: format!("tpvl_{}", row.id),
        league: League::Tpvl,
        // TPVL fields only a men's league
        gender: Gender::Male,
        home_team: team(row.home_team_id),
        away_team: team(row.away_team_id),
        home_score: row.home_score,
        away_score: row.away_score,
        date: row.match_date,
        time: row.match_time,
        location: row.venue,
        status: if row.status == "completed" {
            MatchStatus::Finished
        } else {
            MatchStatus::Upcoming
        },
        set_scores: None,
        url: None,
    }
}

fn tvl_match(row: TvlMatchRow) -> Match {
    Match {
        id: format!("tvl_{}", row.id),
        league: League::Tvl,
        gender: row.gender,
        home_team: row.home_team_name,
        away_team: row.away_team_name,
        home_score: row.home_score,
        away_score: row.away_score,
        date: row.match_date,
        time: row.match_time,
        location: None,
        status: if row.status == "finished" {
            MatchStatus::Finished
        } else {
            MatchStatus::Upcoming
        },
        set_scores: row
            .set_scores
            .map(|s| s.split(", ").map(String::from).collect()),
        url: row.url,
    }
}

/// Upcoming matches starting within the next week.
pub fn upcoming_within_week(matches: &[Match], now: DateTime<Utc>) -> Vec<Match> {
    let window_end = now + Duration::days(UPCOMING_WINDOW_DAYS);
    matches
        .iter()
        .filter(|m| m.status == MatchStatus::Upcoming)
        .filter(|m| {
            let time = m.time.as_deref().unwrap_or("00:00");
            match match_start_utc(&m.date, time) {
                Some(start) => start >= now && start <= window_end,
                None => false,
            }
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upcoming(id: &str, date: &str, time: &str) -> Match {
        Match {
            id: id.to_string(),
            league: League::Tvl,
            gender: Gender::Female,
            home_team: "A".to_string(),
            away_team: "B".to_string(),
            home_score: None,
            away_score: None,
            date: date.to_string(),
            time: Some(time.to_string()),
            location: None,
            status: MatchStatus::Upcoming,
            set_scores: None,
            url: None,
        }
    }

    #[test]
    fn test_upcoming_window_excludes_past_and_far_future() {
        let now = "2025-11-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let matches = vec![
            upcoming("past", "2025-10-30", "19:00"),
            upcoming("in_window", "2025-11-03", "19:00"),
            upcoming("far", "2025-11-20", "19:00"),
        ];

        let filtered = upcoming_within_week(&matches, now);
        let ids: Vec<&str> = filtered.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["in_window"]);
    }

    #[test]
    fn test_upcoming_window_skips_finished() {
        let now = "2025-11-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
        let mut m = upcoming("done", "2025-11-03", "19:00");
        m.status = MatchStatus::Finished;

        assert!(upcoming_within_week(&[m], now).is_empty());
    }

    #[test]
    fn test_tpvl_mapping_resolves_team_names() {
        let mut names = HashMap::new();
        names.insert(1, "Taipei Kings".to_string());

        let row = TpvlMatchRow {
            id: 7,
            home_team_id: 1,
            away_team_id: 99,
            home_score: Some(3),
            away_score: Some(1),
            match_date: "2025-10-12".to_string(),
            match_time: Some("17:00".to_string()),
            venue: Some("Taipei Arena".to_string()),
            status: "completed".to_string(),
        };

        let m = tpvl_match(row, &names);
        assert_eq!(m.id, "tpvl_7");
        assert_eq!(m.home_team, "Taipei Kings");
        assert_eq!(m.away_team, UNKNOWN_TEAM);
        assert_eq!(m.status, MatchStatus::Finished);
        assert_eq!(m.gender, Gender::Male);
    }

    #[test]
    fn test_tvl_mapping_splits_set_scores() {
        let row = TvlMatchRow {
            id: 3,
            gender: Gender::Female,
            home_team_name: "A".to_string(),
            away_team_name: "B".to_string(),
            home_score: Some(3),
            away_score: Some(2),
            match_date: "2025-10-12".to_string(),
            match_time: None,
            set_scores: Some("25-20, 23-25, 15-10".to_string()),
            status: "finished".to_string(),
            url: Some("https://example.com/m/3".to_string()),
        };

        let m = tvl_match(row);
        assert_eq!(m.id, "tvl_3");
        assert_eq!(
            m.set_scores,
            Some(vec![
                "25-20".to_string(),
                "23-25".to_string(),
                "15-10".to_string()
            ])
        );
    }
}
