// SPDX-License-Identifier: MIT

//! Comment model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Row from `comments`. `post_id` is the namespaced match id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: String,
    pub user_id: String,
    pub author_name: Option<String>,
    pub content: String,
    pub created_at: DateTime<Utc>,
}
