use thiserror::Error;

/// Errors talking to Slack.
#[derive(Debug, Error)]
pub enum SlackError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    Api(String),

    #[error("WebSocket error: {0}")]
    WebSocket(#[from] tokio_tungstenite::tungstenite::Error),

    #[error("invalid payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("event receiver dropped")]
    Shutdown,
}
