// SPDX-License-Identifier: MIT

//! Favorite model.

use crate::models::reminder::MatchSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row from `favorites`. Created/deleted by user action, immutable otherwise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Favorite {
    pub id: i64,
    pub user_id: String,
    pub match_id: String,
    pub match_data: MatchSnapshot,
    pub created_at: DateTime<Utc>,
}
