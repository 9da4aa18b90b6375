// SPDX-License-Identifier: MIT

//! Reminder dispatch job.
//!
//! Invoked by an external scheduler via `/cron/send-reminders`. One run:
//! 1. Fetch up to `REMINDER_BATCH_SIZE` unsent reminders due now.
//! 2. Resolve recipient emails from the bulk user listing.
//! 3. Send sequentially, pausing `SEND_PACING_MS` between send attempts
//!    to respect the email provider's rate limit.
//! 4. Mark each sent reminder; failures stay unsent and are retried on the
//!    next run by virtue of the `sent=false` query.
//!
//! A single item's failure never aborts the batch. Overlapping runs are not
//! mutually excluded; two runs reading the same unsent reminder can double
//! send. A claim step (sent=false -> processing) would close that window.

use crate::config::{REMINDER_BATCH_SIZE, SEND_PACING_MS};
use crate::db::SupabaseDb;
use crate::error::AppError;
use crate::models::{DirectoryUser, MatchSnapshot, Reminder};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;

/// Store of reminder records, queryable by due-time and sent-flag.
#[async_trait]
pub trait ReminderStore: Send + Sync {
    async fn due_reminders(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Reminder>, AppError>;

    async fn mark_sent(&self, id: i64, sent_at: DateTime<Utc>) -> Result<(), AppError>;
}

/// Resolves user ids to email addresses.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, AppError>;
}

/// Submits a single reminder email.
#[async_trait]
pub trait ReminderMailer: Send + Sync {
    async fn send_match_reminder(
        &self,
        to: &str,
        match_data: &MatchSnapshot,
    ) -> Result<(), AppError>;
}

#[async_trait]
impl ReminderStore for SupabaseDb {
    async fn due_reminders(
        &self,
        now: DateTime<Utc>,
        limit: usize,
    ) -> Result<Vec<Reminder>, AppError> {
        SupabaseDb::due_reminders(self, now, limit).await
    }

    async fn mark_sent(&self, id: i64, sent_at: DateTime<Utc>) -> Result<(), AppError> {
        self.mark_reminder_sent(id, sent_at).await
    }
}

#[async_trait]
impl UserDirectory for SupabaseDb {
    async fn list_users(&self) -> Result<Vec<DirectoryUser>, AppError> {
        SupabaseDb::list_users(self).await
    }
}

/// Outcome for one reminder in a dispatch run.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchOutcome {
    pub id: i64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate report for one dispatch run.
#[derive(Debug, Clone, Serialize)]
pub struct DispatchReport {
    pub message: String,
    pub success_count: usize,
    pub failed_count: usize,
    pub results: Vec<DispatchOutcome>,
}

/// Orchestrates one dispatch run over its three collaborators.
pub struct ReminderDispatcher<S, D, M> {
    store: S,
    directory: D,
    mailer: M,
    pacing: Duration,
}

impl<S, D, M> ReminderDispatcher<S, D, M>
where
    S: ReminderStore,
    D: UserDirectory,
    M: ReminderMailer,
{
    pub fn new(store: S, directory: D, mailer: M) -> Self {
        Self {
            store,
            directory,
            mailer,
            pacing: Duration::from_millis(SEND_PACING_MS),
        }
    }

    #[cfg(test)]
    fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Run one dispatch invocation.
    ///
    /// Returns Err only for job-level failures (store query or directory
    /// lookup), in which case nothing has been sent. Per-item failures are
    /// recorded in the report.
    pub async fn run(&self) -> Result<DispatchReport, AppError> {
        let now = Utc::now();
        let due = self.store.due_reminders(now, REMINDER_BATCH_SIZE).await?;

        tracing::info!(count = due.len(), "Checked for due reminders");

        if due.is_empty() {
            return Ok(DispatchReport {
                message: "no pending reminders".to_string(),
                success_count: 0,
                failed_count: 0,
                results: Vec::new(),
            });
        }

        let email_by_user: HashMap<String, String> = self
            .directory
            .list_users()
            .await?
            .into_iter()
            .filter_map(|u| u.email.map(|email| (u.id, email)))
            .collect();

        let mut results = Vec::with_capacity(due.len());
        let mut attempted_send = false;

        // Strictly sequential: the pacing between sends is the rate limiter.
        for reminder in &due {
            let Some(email) = email_by_user.get(&reminder.user_id) else {
                tracing::warn!(
                    reminder_id = reminder.id,
                    user_id = %reminder.user_id,
                    "No email for reminder user"
                );
                results.push(DispatchOutcome {
                    id: reminder.id,
                    success: false,
                    error: Some("no email".to_string()),
                });
                continue;
            };

            if attempted_send {
                tokio::time::sleep(self.pacing).await;
            }
            attempted_send = true;

            results.push(self.dispatch_one(reminder, email).await);
        }

        let success_count = results.iter().filter(|r| r.success).count();
        let failed_count = results.len() - success_count;

        tracing::info!(
            processed = results.len(),
            success = success_count,
            failed = failed_count,
            "Dispatch run complete"
        );

        Ok(DispatchReport {
            message: format!("processed {} reminders", results.len()),
            success_count,
            failed_count,
            results,
        })
    }

    /// Send one reminder and mark it sent. Any failure leaves `sent=false`
    /// so the next invocation retries it.
    async fn dispatch_one(&self, reminder: &Reminder, email: &str) -> DispatchOutcome {
        if let Err(e) = self
            .mailer
            .send_match_reminder(email, &reminder.match_data)
            .await
        {
            tracing::error!(reminder_id = reminder.id, error = %e, "Reminder send failed");
            return DispatchOutcome {
                id: reminder.id,
                success: false,
                error: Some(e.to_string()),
            };
        }

        if let Err(e) = self.store.mark_sent(reminder.id, Utc::now()).await {
            // Email went out but the flag didn't stick; the next run will
            // re-send. Surface it as a failure so the report is honest.
            tracing::error!(reminder_id = reminder.id, error = %e, "Failed to mark reminder sent");
            return DispatchOutcome {
                id: reminder.id,
                success: false,
                error: Some(e.to_string()),
            };
        }

        tracing::info!(reminder_id = reminder.id, "Reminder sent");
        DispatchOutcome {
            id: reminder.id,
            success: true,
            error: None,
        }
    }
}
