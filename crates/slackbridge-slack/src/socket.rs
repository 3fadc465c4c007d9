//! Socket Mode connection loop.

use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message;

use crate::api::SlackApi;
use crate::error::SlackError;
use crate::events::{Frame, SocketEvent};

/// Delay before reopening a dropped connection.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Why a single connection ended.
enum SessionEnd {
    /// Slack asked us to reconnect or closed the socket.
    Reconnect,
    /// Nobody is listening for events any more.
    Shutdown,
}

/// Receives Socket Mode events and forwards the routable ones.
///
/// Every envelope is acknowledged before it is forwarded, so Slack never
/// redelivers an event the bridge already saw.
pub struct SocketModeClient {
    api: SlackApi,
    reconnect_delay: Duration,
}

impl SocketModeClient {
    pub fn new(api: SlackApi) -> Self {
        Self {
            api,
            reconnect_delay: RECONNECT_DELAY,
        }
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    /// Connect and forward message and click events to `events` until the
    /// receiver is dropped. Connection failures are retried forever.
    pub async fn run(&self, events: mpsc::Sender<SocketEvent>) -> Result<(), SlackError> {
        loop {
            match self.session(&events).await {
                Ok(SessionEnd::Shutdown) => return Err(SlackError::Shutdown),
                Ok(SessionEnd::Reconnect) => {
                    tracing::info!("Socket Mode connection closed, reconnecting");
                }
                Err(e) => {
                    tracing::warn!(error = %e, delay = ?self.reconnect_delay, "Socket Mode connection failed");
                    tokio::time::sleep(self.reconnect_delay).await;
                }
            }
        }
    }

    async fn session(&self, events: &mpsc::Sender<SocketEvent>) -> Result<SessionEnd, SlackError> {
        let url = self.api.open_connection().await?;
        let (ws_stream, _) = tokio_tungstenite::connect_async(url.as_str()).await?;
        let (mut writer, mut reader) = ws_stream.split();
        tracing::debug!("Socket Mode WebSocket connection established");

        while let Some(msg) = reader.next().await {
            let text = match msg? {
                Message::Text(t) => t.as_str().to_owned(),
                Message::Binary(b) => match String::from_utf8(b.to_vec()) {
                    Ok(s) => s,
                    Err(_) => continue,
                },
                Message::Close(_) => {
                    tracing::info!("WebSocket closed by remote");
                    return Ok(SessionEnd::Reconnect);
                }
                _ => continue,
            };

            let frame = match Frame::parse(&text) {
                Ok(frame) => frame,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to parse Socket Mode frame");
                    if let Some(ack) = Frame::raw_ack(&text) {
                        writer.send(Message::Text(ack.into())).await?;
                    }
                    continue;
                }
            };

            if let Some(ack) = frame.ack() {
                writer.send(Message::Text(ack.into())).await?;
            }

            match frame.event {
                SocketEvent::Hello => tracing::info!("Connected to Slack"),
                SocketEvent::Disconnect { reason } => {
                    tracing::info!(reason = reason.as_deref().unwrap_or("unknown"), "Slack requested disconnect");
                    return Ok(SessionEnd::Reconnect);
                }
                SocketEvent::Other => {}
                event => {
                    if events.send(event).await.is_err() {
                        return Ok(SessionEnd::Shutdown);
                    }
                }
            }
        }

        Ok(SessionEnd::Reconnect)
    }
}
