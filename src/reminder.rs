use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::sync::RwLock;
use tokio_cron_scheduler::{Job, JobScheduler, JobSchedulerError};
use tracing::{debug, error, info};
use uuid::Uuid;

use crate::slack;

#[derive(Error, Debug)]
pub enum ReminderError {
    #[error("scheduler error: {0}")]
    Scheduler(#[from] JobSchedulerError),
    #[error("schedule time is in the past")]
    PastScheduleTime,
}

pub struct ReminderScheduler {
    scheduler: JobScheduler,
    slack: Arc<slack::Client>,
    // channel id -> active job ids, so a team's reminders can be cancelled together
    jobs: Arc<RwLock<HashMap<String, Vec<Uuid>>>>,
}

impl ReminderScheduler {
    pub async fn new(slack: Arc<slack::Client>) -> Result<ReminderScheduler, ReminderError> {
        let scheduler = JobScheduler::new().await?;
        scheduler.start().await?;

        Ok(ReminderScheduler {
            scheduler,
            slack,
            jobs: Arc::new(RwLock::new(HashMap::new())),
        })
    }

    /// One-shot reminder posted to the channel at an absolute time.
    pub async fn schedule_at(
        &self,
        channel: &str,
        text: &str,
        when: DateTime<Utc>,
    ) -> Result<Uuid, ReminderError> {
        let delay = (when - Utc::now())
            .to_std()
            .map_err(|_| ReminderError::PastScheduleTime)?;

        let slack = Arc::clone(&self.slack);
        let channel_id = channel.to_string();
        let message = text.to_string();

        let job = Job::new_one_shot_at_instant_async(Instant::now() + delay, move |_uuid, _lock| {
            let slack = Arc::clone(&slack);
            let channel_id = channel_id.clone();
            let message = message.clone();

            Box::pin(async move {
                match slack.send_message(&message, &channel_id).await {
                    Ok(()) => info!(channel = %channel_id, "reminder sent"),
                    Err(e) => error!(channel = %channel_id, "failed to send reminder: {}", e),
                }
            })
        })?;

        self.register(channel, job).await
    }

    /// Recurring reminder from a cron expression.
    pub async fn schedule_cron(
        &self,
        channel: &str,
        text: &str,
        expr: &str,
    ) -> Result<Uuid, ReminderError> {
        // promote 5-field crontab expressions to the 6-field form with seconds
        let expr = if expr.split_whitespace().count() == 5 {
            format!("0 {}", expr)
        } else {
            expr.to_string()
        };

        let slack = Arc::clone(&self.slack);
        let channel_id = channel.to_string();
        let message = text.to_string();

        let job = Job::new_async(expr.as_str(), move |_uuid, _lock| {
            let slack = Arc::clone(&slack);
            let channel_id = channel_id.clone();
            let message = message.clone();

            Box::pin(async move {
                match slack.send_message(&message, &channel_id).await {
                    Ok(()) => info!(channel = %channel_id, "reminder sent"),
                    Err(e) => error!(channel = %channel_id, "failed to send reminder: {}", e),
                }
            })
        })?;

        self.register(channel, job).await
    }

    /// Drop every tracked job for the channel. Returns how many were tracked.
    pub async fn cancel_channel(&self, channel: &str) -> usize {
        let ids = self.jobs.write().await.remove(channel).unwrap_or_default();

        for id in &ids {
            if let Err(e) = self.scheduler.remove(id).await {
                // one-shot jobs that already fired may be gone from the scheduler
                debug!(job = %id, "job already removed: {}", e);
            }
        }

        ids.len()
    }

    pub async fn active_jobs(&self, channel: &str) -> usize {
        self.jobs
            .read()
            .await
            .get(channel)
            .map(|ids| ids.len())
            .unwrap_or(0)
    }

    async fn register(&self, channel: &str, job: Job) -> Result<Uuid, ReminderError> {
        let id = job.guid();
        self.scheduler.add(job).await?;

        self.jobs
            .write()
            .await
            .entry(channel.to_string())
            .or_default()
            .push(id);

        Ok(id)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Duration;

    async fn test_scheduler() -> ReminderScheduler {
        // reminders under test never fire, the client never sees traffic
        let slack = Arc::new(slack::Client::with_api_url("xoxb-test", "http://127.0.0.1:9"));
        ReminderScheduler::new(slack).await.unwrap()
    }

    #[tokio::test]
    async fn tracks_jobs_per_channel() {
        let reminders = test_scheduler().await;

        reminders
            .schedule_cron("C0AAA111", "standup time", "0 0 9 * * 1-5")
            .await
            .unwrap();
        reminders
            .schedule_cron("C0AAA111", "retro time", "0 0 17 * * 5")
            .await
            .unwrap();
        reminders
            .schedule_cron("C0BBB222", "standup time", "0 0 9 * * 1-5")
            .await
            .unwrap();

        assert_eq!(reminders.active_jobs("C0AAA111").await, 2);
        assert_eq!(reminders.active_jobs("C0BBB222").await, 1);
    }

    #[tokio::test]
    async fn cancel_channel_removes_all_tracked_jobs() {
        let reminders = test_scheduler().await;

        reminders
            .schedule_cron("C0AAA111", "standup time", "0 0 9 * * 1-5")
            .await
            .unwrap();
        reminders
            .schedule_at("C0AAA111", "one off", Utc::now() + Duration::hours(6))
            .await
            .unwrap();
        reminders
            .schedule_cron("C0BBB222", "standup time", "0 0 9 * * 1-5")
            .await
            .unwrap();

        assert_eq!(reminders.cancel_channel("C0AAA111").await, 2);
        assert_eq!(reminders.active_jobs("C0AAA111").await, 0);
        assert_eq!(reminders.active_jobs("C0BBB222").await, 1);
    }

    #[tokio::test]
    async fn cancel_unknown_channel_is_a_noop() {
        let reminders = test_scheduler().await;

        assert_eq!(reminders.cancel_channel("C0NOPE").await, 0);
    }

    #[tokio::test]
    async fn rejects_schedule_time_in_the_past() {
        let reminders = test_scheduler().await;
        let past = Utc::now() - Duration::hours(1);

        let result = reminders.schedule_at("C0AAA111", "too late", past).await;

        assert!(matches!(result, Err(ReminderError::PastScheduleTime)));
    }

    #[tokio::test]
    async fn five_field_cron_is_promoted_and_accepted() {
        let reminders = test_scheduler().await;

        reminders
            .schedule_cron("C0AAA111", "standup time", "30 9 * * 1-5")
            .await
            .unwrap();

        assert_eq!(reminders.active_jobs("C0AAA111").await, 1);
    }
}
