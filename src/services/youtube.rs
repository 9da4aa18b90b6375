// SPDX-License-Identifier: MIT

//! YouTube Data API v3 client for highlight and match videos.
//!
//! Searches are windowed by publish date and the results are title-filtered,
//! since the raw search regularly returns practice footage and interviews.

use crate::error::AppError;
use crate::time_utils::format_utc_rfc3339;
use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

const YOUTUBE_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Query used for the highlights page.
const HIGHLIGHT_QUERY: &str = "TPVL 好球集錦";
/// Titles must contain one of these to count as a highlight reel.
const HIGHLIGHT_KEYWORDS: [&str; 4] = ["好球集錦", "精華", "highlights", "super spike"];
/// Non-match footage excluded from team searches.
const EXCLUDE_KEYWORDS: [&str; 5] = ["訓練", "練習", "專訪", "採訪", "幕後"];

/// A video search result served to clients.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub thumbnail: String,
    pub channel_title: String,
    pub published_at: String,
    pub url: String,
}

/// YouTube Data API client.
#[derive(Clone)]
pub struct YoutubeClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl YoutubeClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: YOUTUBE_BASE_URL.to_string(),
            api_key,
        }
    }

    /// Override the provider URL (for tests against a local stub).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Recent TPVL highlight reels (last two months, title-filtered).
    pub async fn highlight_videos(&self, max_results: u32) -> Result<Vec<Video>, AppError> {
        let items = self
            .search(HIGHLIGHT_QUERY, max_results, Duration::days(60))
            .await?;
        Ok(items.into_iter().filter(is_highlight).collect())
    }

    /// Recent videos for a team, excluding practice/interview footage.
    pub async fn team_videos(
        &self,
        team_name: &str,
        max_results: u32,
    ) -> Result<Vec<Video>, AppError> {
        // Over-fetch so the exclusion filter still leaves enough results
        let fetch = (max_results * 2).min(20);
        let query = format!("{} 排球", team_name);
        let items = self.search(&query, fetch, Duration::days(90)).await?;

        Ok(items
            .into_iter()
            .filter(|v| is_team_match(v, team_name))
            .take(max_results as usize)
            .collect())
    }

    /// Free-text search within the last three months.
    pub async fn search_videos(
        &self,
        query: &str,
        max_results: u32,
    ) -> Result<Vec<Video>, AppError> {
        self.search(query, max_results, Duration::days(90)).await
    }

    async fn search(
        &self,
        query: &str,
        max_results: u32,
        window: Duration,
    ) -> Result<Vec<Video>, AppError> {
        let published_after = format_utc_rfc3339(Utc::now() - window);
        let max_results = max_results.to_string();
        let url = format!("{}/search", self.base_url);

        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("q", query),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("order", "date"),
                ("publishedAfter", published_after.as_str()),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::YoutubeApi(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::YoutubeApi(format!(
                "YouTube returned {}",
                response.status()
            )));
        }

        let page: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::YoutubeApi(format!("Invalid YouTube response: {}", e)))?;

        Ok(page.items.into_iter().filter_map(to_video).collect())
    }
}

fn to_video(item: SearchItem) -> Option<Video> {
    let id = item.id.video_id?;
    let url = format!("https://www.youtube.com/watch?v={}", id);
    Some(Video {
        id,
        title: item.snippet.title,
        description: item.snippet.description,
        thumbnail: item.snippet.thumbnails.medium.url,
        channel_title: item.snippet.channel_title,
        published_at: item.snippet.published_at,
        url,
    })
}

fn is_highlight(video: &Video) -> bool {
    let title = video.title.to_lowercase();
    HIGHLIGHT_KEYWORDS.iter().any(|kw| title.contains(kw))
}

fn is_team_match(video: &Video, team_name: &str) -> bool {
    let title = video.title.to_lowercase();
    if !title.contains(&team_name.to_lowercase()) {
        return false;
    }
    !EXCLUDE_KEYWORDS.iter().any(|kw| title.contains(kw))
}

// ─── YouTube response shapes ─────────────────────────────────

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Snippet,
}

#[derive(Deserialize)]
struct SearchItemId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct Snippet {
    title: String,
    description: String,
    thumbnails: Thumbnails,
    #[serde(rename = "channelTitle")]
    channel_title: String,
    #[serde(rename = "publishedAt")]
    published_at: String,
}

#[derive(Deserialize)]
struct Thumbnails {
    medium: Thumbnail,
}

#[derive(Deserialize)]
struct Thumbnail {
    url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn video(title: &str) -> Video {
        Video {
            id: "abc123".to_string(),
            title: title.to_string(),
            description: String::new(),
            thumbnail: String::new(),
            channel_title: "VolleyTV".to_string(),
            published_at: "2025-10-01T00:00:00Z".to_string(),
            url: String::new(),
        }
    }

    #[test]
    fn test_highlight_filter() {
        assert!(is_highlight(&video("TPVL 第三週 好球集錦")));
        assert!(is_highlight(&video("Week 3 HIGHLIGHTS")));
        assert!(!is_highlight(&video("球員專訪：舉球員的一天")));
    }

    #[test]
    fn test_team_filter_requires_name_and_excludes_practice() {
        assert!(is_team_match(&video("台北鯨華 vs 桃園雲豹 全場"), "台北鯨華"));
        assert!(!is_team_match(&video("桃園雲豹 全場"), "台北鯨華"));
        assert!(!is_team_match(&video("台北鯨華 訓練直擊"), "台北鯨華"));
    }
}
