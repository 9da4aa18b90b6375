// SPDX-License-Identifier: MIT

//! Resend email client for reminder notifications.
//!
//! One transactional email per call; success is any 2xx from the provider.
//! The provider's error message is surfaced verbatim so it lands in the
//! dispatch report.

use crate::error::AppError;
use crate::models::{Gender, League, MatchSnapshot};
use crate::services::dispatch::ReminderMailer;
use async_trait::async_trait;
use serde::Deserialize;

const RESEND_BASE_URL: &str = "https://api.resend.com";

/// Resend API client.
#[derive(Clone)]
pub struct ResendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    from: String,
}

impl ResendClient {
    pub fn new(api_key: String, from: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: RESEND_BASE_URL.to_string(),
            api_key,
            from,
        }
    }

    /// Override the provider URL (for tests against a local stub).
    #[allow(dead_code)]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Submit one email. `{from, to, subject, html}`, 2xx = success.
    pub async fn send(&self, to: &str, subject: &str, html: &str) -> Result<(), AppError> {
        let url = format!("{}/emails", self.base_url);
        let body = serde_json::json!({
            "from": self.from,
            "to": [to],
            "subject": subject,
            "html": html,
        });

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::EmailProvider(e.to_string()))?;

        if response.status().is_success() {
            return Ok(());
        }

        let status = response.status();
        let message = match response.json::<ResendError>().await {
            Ok(err) => err.message,
            Err(_) => format!("provider returned {}", status),
        };
        Err(AppError::EmailProvider(message))
    }
}

#[derive(Deserialize)]
struct ResendError {
    message: String,
}

#[async_trait]
impl ReminderMailer for ResendClient {
    async fn send_match_reminder(
        &self,
        to: &str,
        match_data: &MatchSnapshot,
    ) -> Result<(), AppError> {
        let subject = reminder_subject(match_data);
        let html = reminder_html(match_data);
        self.send(to, &subject, &html).await
    }
}

fn league_label(league: League) -> &'static str {
    match league {
        League::Tpvl => "Taiwan Professional Volleyball League (TPVL)",
        League::Tvl => "Enterprise Volleyball League (TVL)",
    }
}

fn gender_label(gender: Gender) -> &'static str {
    match gender {
        Gender::Male => "Men's division",
        Gender::Female => "Women's division",
    }
}

/// Subject line for a reminder email.
pub fn reminder_subject(m: &MatchSnapshot) -> String {
    format!("Match reminder: {} vs {}", m.home_team, m.away_team)
}

/// HTML body for a reminder email.
pub fn reminder_html(m: &MatchSnapshot) -> String {
    let time = m.time.as_deref().unwrap_or("TBA");
    let location = m.location.as_deref().unwrap_or("TBA");
    let url = m.url.as_deref().unwrap_or("https://volleygo.tw/matches");

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <style>
    body {{ font-family: Arial, sans-serif; line-height: 1.6; color: #333; }}
    .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
    .header {{ background: #003366; color: white; padding: 30px; text-align: center; border-radius: 10px 10px 0 0; }}
    .content {{ background: #f9f9f9; padding: 30px; border-radius: 0 0 10px 10px; }}
    .match-info {{ background: white; padding: 20px; border-radius: 8px; margin: 20px 0; border-left: 4px solid #39ff14; }}
    .team-vs {{ font-size: 24px; font-weight: bold; text-align: center; margin: 20px 0; color: #003366; }}
    .cta-button {{ display: inline-block; background: #39ff14; color: #003366; padding: 12px 30px; text-decoration: none; border-radius: 5px; font-weight: bold; margin-top: 20px; }}
  </style>
</head>
<body>
  <div class="container">
    <div class="header"><h1>VolleyGo match reminder</h1></div>
    <div class="content">
      <p>A match you saved is about to start:</p>
      <div class="match-info">
        <div class="team-vs">{home} <span style="color: #999;">VS</span> {away}</div>
        <p><strong>When:</strong> {date} {time}</p>
        <p><strong>Where:</strong> {location}</p>
        <p><strong>League:</strong> {league}</p>
        <p><strong>Division:</strong> {gender}</p>
      </div>
      <p style="text-align: center;"><a href="{url}" class="cta-button">Match details</a></p>
      <p style="margin-top: 30px; color: #666; font-size: 14px;">Enjoy the game!</p>
    </div>
  </div>
</body>
</html>"#,
        home = m.home_team,
        away = m.away_team,
        date = m.date,
        time = time,
        location = location,
        league = league_label(m.league),
        gender = gender_label(m.gender),
        url = url,
    )
}
