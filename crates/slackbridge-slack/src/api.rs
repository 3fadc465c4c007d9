//! Minimal Slack Web API client: Socket Mode handshake and chat messages.

use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::blocks::Block;
use crate::error::SlackError;

const API_BASE: &str = "https://slack.com/api";

#[derive(Debug, Deserialize)]
struct ChatResponse {
    ok: bool,
    error: Option<String>,
    ts: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ConnectionsOpenResponse {
    ok: bool,
    error: Option<String>,
    url: Option<String>,
}

fn api_error(error: Option<String>) -> SlackError {
    SlackError::Api(error.unwrap_or_else(|| "unknown error".into()))
}

/// Web API handle holding both tokens.
///
/// The bot token (`xoxb-`) posts messages; the app-level token (`xapp-`)
/// only opens Socket Mode connections.
#[derive(Clone)]
pub struct SlackApi {
    client: Client,
    bot_token: String,
    app_token: String,
}

impl std::fmt::Debug for SlackApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SlackApi").finish_non_exhaustive()
    }
}

impl SlackApi {
    pub fn new(bot_token: impl Into<String>, app_token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            bot_token: bot_token.into(),
            app_token: app_token.into(),
        }
    }

    /// Ask Slack for a fresh Socket Mode WebSocket URL.
    pub async fn open_connection(&self) -> Result<String, SlackError> {
        let resp = self
            .client
            .post(format!("{API_BASE}/apps.connections.open"))
            .bearer_auth(&self.app_token)
            .send()
            .await?;

        let parsed: ConnectionsOpenResponse = resp.json().await?;
        if !parsed.ok {
            return Err(api_error(parsed.error));
        }
        parsed
            .url
            .ok_or_else(|| SlackError::Api("missing url".into()))
    }

    /// Post a message; returns its `ts` when Slack reports one.
    pub async fn post_message(
        &self,
        channel: &str,
        text: &str,
        blocks: Option<&[Block]>,
    ) -> Result<Option<String>, SlackError> {
        let body = message_body(channel, text, blocks)?;
        self.chat("chat.postMessage", &body).await
    }

    /// Replace the content of an existing message.
    pub async fn update_message(
        &self,
        channel: &str,
        ts: &str,
        text: &str,
        blocks: Option<&[Block]>,
    ) -> Result<(), SlackError> {
        let mut body = message_body(channel, text, blocks)?;
        body["ts"] = Value::String(ts.to_string());
        // An empty list clears the buttons of the message being replaced.
        if blocks.is_none() {
            body["blocks"] = json!([]);
        }
        self.chat("chat.update", &body).await.map(|_| ())
    }

    async fn chat(&self, method: &str, body: &Value) -> Result<Option<String>, SlackError> {
        let resp = self
            .client
            .post(format!("{API_BASE}/{method}"))
            .bearer_auth(&self.bot_token)
            .json(body)
            .send()
            .await?;

        let parsed: ChatResponse = resp.json().await?;
        if !parsed.ok {
            return Err(api_error(parsed.error));
        }
        Ok(parsed.ts)
    }
}

fn message_body(channel: &str, text: &str, blocks: Option<&[Block]>) -> Result<Value, SlackError> {
    let mut body = json!({
        "channel": channel,
        "text": text,
    });
    if let Some(blocks) = blocks {
        body["blocks"] = serde_json::to_value(blocks)?;
    }
    Ok(body)
}
