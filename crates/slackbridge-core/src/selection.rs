//! Control protocol: action ids carried by buttons and the selection value codec.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix of the per-candidate buttons in a session picker.
pub const SELECT_SESSION_PREFIX: &str = "send_to_";
pub const QUICK_APPROVE: &str = "quick_y";
pub const QUICK_DENY: &str = "quick_n";
pub const QUICK_STATUS: &str = "quick_status";
pub const QUICK_SESSIONS: &str = "quick_sessions";
pub const QUICK_MENU: &str = "quick_menu";
pub const SESSION_APPROVE_PREFIX: &str = "quick_session_y_";
pub const SESSION_DENY_PREFIX: &str = "quick_session_n_";
pub const SESSION_STATUS_PREFIX: &str = "quick_session_status_";
/// Sent by notification hooks outside the bridge.
pub const HOOK_APPROVE: &str = "hook_approve";
pub const HOOK_DENY: &str = "hook_deny";

/// Errors decoding a picker button value.
#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("selection value is missing")]
    Missing,

    #[error("selection value is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("selection value has an empty `{0}` field")]
    EmptyField(&'static str),
}

/// Value carried by a picker button: which pending id, which session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionValue {
    pub msg_id: String,
    pub session: String,
}

impl SelectionValue {
    pub fn new(msg_id: impl Into<String>, session: impl Into<String>) -> Self {
        Self {
            msg_id: msg_id.into(),
            session: session.into(),
        }
    }

    /// Compact JSON form, e.g. `{"msg_id":"U1_1_0","session":"worker1"}`
    pub fn encode(&self) -> String {
        serde_json::json!({
            "msg_id": self.msg_id,
            "session": self.session,
        })
        .to_string()
    }

    pub fn decode(raw: Option<&str>) -> Result<Self, SelectionError> {
        let raw = raw.ok_or(SelectionError::Missing)?;
        let value: Self = serde_json::from_str(raw)?;
        if value.msg_id.is_empty() {
            return Err(SelectionError::EmptyField("msg_id"));
        }
        if value.session.is_empty() {
            return Err(SelectionError::EmptyField("session"));
        }
        Ok(value)
    }
}

/// Keystroke sent by approve/deny controls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuickKey {
    Approve,
    Deny,
}

impl QuickKey {
    /// Literal text typed into the session
    pub fn token(self) -> &'static str {
        match self {
            Self::Approve => "y",
            Self::Deny => "n",
        }
    }
}

/// What a clicked control asks the bridge to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Picker button; session and pending id live in the value
    SelectSession,
    /// Menu approve/deny with no fixed target
    Quick(QuickKey),
    QuickStatus,
    QuickSessions,
    QuickMenu,
    /// Per-session approve/deny; target is the value
    SessionKey(QuickKey),
    /// Per-session status; target is the value
    SessionStatus,
    /// Hook approve/deny; target is the value or the default session
    Hook(QuickKey),
}

impl Action {
    /// Map an action id back to an action, `None` for ids the bridge never issues.
    pub fn parse(action_id: &str) -> Option<Self> {
        let action = match action_id {
            QUICK_APPROVE => Self::Quick(QuickKey::Approve),
            QUICK_DENY => Self::Quick(QuickKey::Deny),
            QUICK_STATUS => Self::QuickStatus,
            QUICK_SESSIONS => Self::QuickSessions,
            QUICK_MENU => Self::QuickMenu,
            HOOK_APPROVE => Self::Hook(QuickKey::Approve),
            HOOK_DENY => Self::Hook(QuickKey::Deny),
            id if id.starts_with(SELECT_SESSION_PREFIX) => Self::SelectSession,
            id if id.starts_with(SESSION_APPROVE_PREFIX) => Self::SessionKey(QuickKey::Approve),
            id if id.starts_with(SESSION_DENY_PREFIX) => Self::SessionKey(QuickKey::Deny),
            id if id.starts_with(SESSION_STATUS_PREFIX) => Self::SessionStatus,
            _ => return None,
        };
        Some(action)
    }
}

/// Action id of the picker button for `session`
pub fn select_session_action_id(msg_id: &str, session: &str) -> String {
    format!("{SELECT_SESSION_PREFIX}{msg_id}_{session}")
}

/// Action id of a per-session approve/deny button
pub fn session_key_action_id(key: QuickKey, session: &str) -> String {
    match key {
        QuickKey::Approve => format!("{SESSION_APPROVE_PREFIX}{session}"),
        QuickKey::Deny => format!("{SESSION_DENY_PREFIX}{session}"),
    }
}

/// Action id of a per-session status button
pub fn session_status_action_id(session: &str) -> String {
    format!("{SESSION_STATUS_PREFIX}{session}")
}
