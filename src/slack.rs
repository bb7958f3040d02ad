use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::env;
use thiserror::Error;
use tracing::debug;

const DEFAULT_API_URL: &str = "https://slack.com/api";

#[derive(Error, Debug)]
pub enum SlackError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("slack api error: {0}")]
    Api(String),
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Channel {
    pub id: String,
    pub name: String,
}

#[derive(Deserialize, Debug)]
pub struct UserProfile {
    pub real_name: String,
    pub image_48: Option<String>,
}

#[derive(Deserialize)]
struct UserResponse {
    user: UserInfo,
}

#[derive(Deserialize)]
struct UserInfo {
    profile: UserProfile,
}

pub struct Client {
    http: reqwest::Client,
    token: String,
    api_url: String,
}

impl Client {
    pub fn new(token: &str) -> Client {
        Client::with_api_url(token, DEFAULT_API_URL)
    }

    pub fn with_api_url(token: &str, api_url: &str) -> Client {
        Client {
            http: reqwest::Client::new(),
            token: token.to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_env() -> Result<Client, SlackError> {
        let token = env::var("SLACK_TOKEN")
            .map_err(|_| SlackError::Config("SLACK_TOKEN is a required env variable".to_string()))?;
        Ok(Client::new(&token))
    }

    pub async fn send_message(&self, message: &str, channel: &str) -> Result<(), SlackError> {
        let payload = json!({
            "channel": channel,
            "text": message,
        });

        self.call("chat.postMessage", &payload).await?;

        Ok(())
    }

    pub async fn create_channel(&self, name: &str) -> Result<Channel, SlackError> {
        let payload = json!({
            "name": name,
            "is_private": false,
        });

        let body = self.call("conversations.create", &payload).await?;
        let channel: Channel = serde_json::from_value(body["channel"].clone())?;

        Ok(channel)
    }

    pub async fn archive_channel(&self, channel: &str) -> Result<(), SlackError> {
        self.call("conversations.archive", &json!({ "channel": channel }))
            .await?;

        Ok(())
    }

    pub async fn list_channels(&self) -> Result<Value, SlackError> {
        let payload = json!({ "types": "public_channel,private_channel" });
        let body = self.call("conversations.list", &payload).await?;

        Ok(body["channels"].clone())
    }

    pub async fn invite_member(&self, channel: &str, user: &str) -> Result<(), SlackError> {
        let payload = json!({
            "channel": channel,
            "users": user,
        });

        self.call("conversations.invite", &payload).await?;

        Ok(())
    }

    pub async fn get_user_details(&self, user: &str) -> Result<UserProfile, SlackError> {
        let body = self.call("users.info", &json!({ "user": user })).await?;
        let response: UserResponse = serde_json::from_value(body)?;

        Ok(response.user.profile)
    }

    async fn call(&self, method: &str, payload: &Value) -> Result<Value, SlackError> {
        debug!(method, "slack api call");

        let body: Value = self
            .http
            .post(format!("{}/{}", self.api_url, method))
            .header(AUTHORIZATION, format!("Bearer {}", self.token))
            .json(payload)
            .send()
            .await?
            .json()
            .await?;

        if body["ok"].as_bool().unwrap_or(false) {
            Ok(body)
        } else {
            let code = body["error"].as_str().unwrap_or("unknown_error");
            Err(SlackError::Api(format!("{}: {}", method, code)))
        }
    }
}
