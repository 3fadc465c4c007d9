//! Slack Socket Mode transport for the bridge.
//!
//! [`SocketModeClient`] turns Socket Mode envelopes into [`SocketEvent`]s and
//! [`deliver`] posts the router's replies back as Block Kit messages.

pub mod api;
pub mod blocks;
mod error;
pub mod events;
mod socket;

pub use api::SlackApi;
pub use error::SlackError;
pub use events::{Frame, SocketEvent};
pub use socket::{SocketModeClient, RECONNECT_DELAY};

use slackbridge_core::Reply;

/// Send `reply` to `channel`.
///
/// A reply that replaces the original is applied with `chat.update` to the
/// message at `message_ts`; without one it is posted as a new message.
pub async fn deliver(
    api: &SlackApi,
    channel: &str,
    message_ts: Option<&str>,
    reply: &Reply,
) -> Result<(), SlackError> {
    let blocks = blocks::render(reply);
    match message_ts.filter(|_| reply.replace_original) {
        Some(ts) => {
            api.update_message(channel, ts, &reply.text, blocks.as_deref())
                .await
        }
        None => api
            .post_message(channel, &reply.text, blocks.as_deref())
            .await
            .map(|_| ()),
    }
}
