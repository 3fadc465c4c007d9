//! Socket Mode envelope parsing.
//!
//! Slack wraps every event in an envelope carrying an `envelope_id` that must
//! be acknowledged. Only the pieces the bridge routes on are decoded; the rest
//! of each payload is ignored.

use serde::Deserialize;
use slackbridge_core::{ButtonClick, InboundMessage};

use crate::error::SlackError;

#[derive(Debug, Deserialize)]
struct Envelope {
    #[serde(rename = "type")]
    kind: String,
    envelope_id: Option<String>,
    #[serde(default)]
    payload: serde_json::Value,
    reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EventsApiPayload {
    event: MessageEvent,
}

#[derive(Debug, Deserialize)]
struct MessageEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    user: String,
    #[serde(default)]
    text: String,
    #[serde(default)]
    channel: String,
    #[serde(default)]
    channel_type: String,
    ts: Option<String>,
    bot_id: Option<String>,
    subtype: Option<String>,
}

#[derive(Debug, Deserialize)]
struct InteractivePayload {
    #[serde(rename = "type")]
    kind: String,
    user: IdField,
    channel: Option<IdField>,
    container: Option<Container>,
    message: Option<MessageRef>,
    #[serde(default)]
    actions: Vec<ActionPayload>,
}

#[derive(Debug, Deserialize)]
struct IdField {
    id: String,
}

#[derive(Debug, Deserialize)]
struct Container {
    message_ts: Option<String>,
    channel_id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageRef {
    ts: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ActionPayload {
    action_id: String,
    value: Option<String>,
}

/// A decoded Socket Mode frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SocketEvent {
    /// A message event, with the channel to reply in.
    Message {
        channel: String,
        message: InboundMessage,
    },
    /// A button click, with the message holding the button when known.
    Click {
        channel: String,
        message_ts: Option<String>,
        click: ButtonClick,
    },
    Hello,
    /// Slack is about to close the socket; reconnect.
    Disconnect { reason: Option<String> },
    /// Anything the bridge does not route on.
    Other,
}

/// A frame plus the envelope id to acknowledge, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub envelope_id: Option<String>,
    pub event: SocketEvent,
}

impl Frame {
    /// Decode one text frame.
    pub fn parse(raw: &str) -> Result<Self, SlackError> {
        let envelope: Envelope = serde_json::from_str(raw)?;
        let event = match envelope.kind.as_str() {
            "hello" => SocketEvent::Hello,
            "disconnect" => SocketEvent::Disconnect {
                reason: envelope.reason,
            },
            "events_api" => parse_events_api(envelope.payload)?,
            "interactive" => parse_interactive(envelope.payload)?,
            _ => SocketEvent::Other,
        };
        Ok(Self {
            envelope_id: envelope.envelope_id,
            event,
        })
    }

    /// The acknowledgement Slack expects for this frame.
    pub fn ack(&self) -> Option<String> {
        self.envelope_id.as_deref().map(ack_text)
    }

    /// Acknowledgement for a frame whose payload did not decode, read from
    /// the raw JSON so Slack does not redeliver it.
    pub fn raw_ack(raw: &str) -> Option<String> {
        let value: serde_json::Value = serde_json::from_str(raw).ok()?;
        value.get("envelope_id")?.as_str().map(ack_text)
    }
}

fn ack_text(envelope_id: &str) -> String {
    serde_json::json!({ "envelope_id": envelope_id }).to_string()
}

fn parse_events_api(payload: serde_json::Value) -> Result<SocketEvent, SlackError> {
    let payload: EventsApiPayload = serde_json::from_value(payload)?;
    let event = payload.event;
    if event.kind != "message" {
        return Ok(SocketEvent::Other);
    }
    Ok(SocketEvent::Message {
        channel: event.channel,
        message: InboundMessage {
            user: event.user,
            text: event.text,
            channel_type: event.channel_type,
            ts: event.ts,
            bot_id: event.bot_id,
            subtype: event.subtype,
        },
    })
}

fn parse_interactive(payload: serde_json::Value) -> Result<SocketEvent, SlackError> {
    let payload: InteractivePayload = serde_json::from_value(payload)?;
    if payload.kind != "block_actions" {
        return Ok(SocketEvent::Other);
    }
    let Some(action) = payload.actions.into_iter().next() else {
        return Ok(SocketEvent::Other);
    };

    let channel = payload
        .channel
        .map(|c| c.id)
        .or_else(|| payload.container.as_ref().and_then(|c| c.channel_id.clone()))
        .unwrap_or_default();
    let message_ts = payload
        .container
        .and_then(|c| c.message_ts)
        .or_else(|| payload.message.and_then(|m| m.ts));

    Ok(SocketEvent::Click {
        channel,
        message_ts,
        click: ButtonClick {
            user: payload.user.id,
            action_id: action.action_id,
            value: action.value,
        },
    })
}
