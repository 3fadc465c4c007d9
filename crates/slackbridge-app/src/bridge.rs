//! Event loop wiring the Socket Mode client to the router.

use std::sync::Arc;

use anyhow::{Context, Result};
use slackbridge_core::Router;
use slackbridge_slack::{deliver, SlackApi, SlackError, SocketEvent, SocketModeClient};
use tokio::sync::mpsc;

/// Buffered events between the socket reader and the handlers.
const EVENT_BUFFER: usize = 64;

/// Run until the socket client stops.
///
/// Each event is handled on its own task so a slow tmux call never holds up
/// the socket reader or other events.
pub async fn run(api: SlackApi, router: Arc<Router>) -> Result<()> {
    let (tx, mut rx) = mpsc::channel(EVENT_BUFFER);
    let client = SocketModeClient::new(api.clone());
    let reader = tokio::spawn(async move { client.run(tx).await });

    while let Some(event) = rx.recv().await {
        let api = api.clone();
        let router = Arc::clone(&router);
        tokio::spawn(async move {
            if let Err(e) = handle_event(&api, &router, event).await {
                tracing::warn!(error = %e, "Failed to deliver reply");
            }
        });
    }

    match reader.await.context("Socket Mode task panicked")? {
        Ok(()) | Err(SlackError::Shutdown) => Ok(()),
        Err(e) => Err(e).context("Socket Mode client stopped"),
    }
}

async fn handle_event(api: &SlackApi, router: &Router, event: SocketEvent) -> Result<(), SlackError> {
    match event {
        SocketEvent::Message { channel, message } => {
            if let Some(reply) = router.handle_message(&message).await {
                deliver(api, &channel, None, &reply).await?;
            }
        }
        SocketEvent::Click {
            channel,
            message_ts,
            click,
        } => {
            if let Some(reply) = router.handle_click(&click).await {
                deliver(api, &channel, message_ts.as_deref(), &reply).await?;
            }
        }
        SocketEvent::Hello | SocketEvent::Disconnect { .. } | SocketEvent::Other => {}
    }
    Ok(())
}
