pub mod handle;
pub mod models;
pub mod reminder;
pub mod schema;
pub mod slack;

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize, Debug)]
pub struct SlackEvent {
    pub token: Option<String>,
    pub challenge: Option<String>,
    pub event: Option<EventDetails>,
}

#[derive(Deserialize, Debug)]
pub struct EventDetails {
    pub text: String,
    pub user: String,
    pub channel: String,
    pub r#type: String,
    pub bot_id: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct CreateTeam {
    pub name: String,
    pub timezone: String,
    pub schedule: Option<String>,
}

#[derive(Deserialize, Debug)]
pub struct AddMember {
    pub name: String,
    pub slack_id: String,
}

#[derive(Deserialize, Debug)]
pub struct QuestionSpec {
    pub text: String,
    pub answer: Value,
}

#[derive(Deserialize, Debug)]
pub struct ConfigureQuestions {
    pub questions: Vec<QuestionSpec>,
}

#[derive(Deserialize, Debug)]
pub struct SubmitStandup {
    pub answers: Value,
}

#[derive(Deserialize, Debug)]
pub struct TeamReminder {
    pub channel: String,
    pub text: String,
    pub schedule_time: DateTime<Utc>,
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_url_verification_payload() {
        let event: SlackEvent = serde_json::from_str(
            r#"{ "token": "t0ken", "challenge": "abc123", "type": "url_verification" }"#,
        )
        .unwrap();

        assert_eq!(event.challenge.as_deref(), Some("abc123"));
        assert!(event.event.is_none());
    }

    #[test]
    fn parses_message_event_payload() {
        let event: SlackEvent = serde_json::from_str(
            r#"{
                "token": "t0ken",
                "event": {
                    "type": "message",
                    "text": "hi",
                    "user": "U0USER123",
                    "channel": "C0ABC123"
                }
            }"#,
        )
        .unwrap();

        let details = event.event.unwrap();
        assert_eq!(details.r#type, "message");
        assert!(details.bot_id.is_none());
    }

    #[test]
    fn parses_team_reminder_payload() {
        let reminder: TeamReminder = serde_json::from_str(
            r#"{
                "channel": "C0ABC123",
                "text": "Standup in 10 minutes",
                "schedule_time": "2026-08-06T09:00:00Z"
            }"#,
        )
        .unwrap();

        assert_eq!(reminder.channel, "C0ABC123");
    }
}
