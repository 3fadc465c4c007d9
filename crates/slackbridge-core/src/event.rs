//! Inbound events as the router sees them.

/// Conversation kind of a direct message; nothing else is routed.
pub const DIRECT_MESSAGE: &str = "im";

/// A chat message delivered by the transport
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InboundMessage {
    pub user: String,
    pub text: String,
    pub channel_type: String,
    pub ts: Option<String>,
    /// Set when a bot (including this one) authored the message
    pub bot_id: Option<String>,
    /// Set for edits, joins and other non-plain messages
    pub subtype: Option<String>,
}

impl InboundMessage {
    /// A plain direct message from `user`
    pub fn direct(user: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            text: text.into(),
            channel_type: DIRECT_MESSAGE.to_string(),
            ..Default::default()
        }
    }

    pub fn with_ts(mut self, ts: impl Into<String>) -> Self {
        self.ts = Some(ts.into());
        self
    }

    /// Bot-authored and subtyped messages are never handled
    pub fn is_ignored_kind(&self) -> bool {
        self.bot_id.is_some() || self.subtype.is_some()
    }

    pub fn is_direct(&self) -> bool {
        self.channel_type == DIRECT_MESSAGE
    }
}

/// A click on one of the bridge's controls
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonClick {
    pub user: String,
    pub action_id: String,
    pub value: Option<String>,
}

impl ButtonClick {
    pub fn new(user: impl Into<String>, action_id: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            action_id: action_id.into(),
            value: None,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    /// The carried value when present and non-empty
    pub fn target(&self) -> Option<&str> {
        self.value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }
}
