//! Routing engine: decides which session receives an instruction.

use slackbridge_logging::safe_truncate;
use slackbridge_terminal::SessionRegistry;
use tracing::{debug, info, warn};

use crate::commands;
use crate::event::{ButtonClick, InboundMessage};
use crate::parser::{parse_mention, strip_command_prefix, Command};
use crate::pending::{PendingTable, DEFAULT_PENDING_CAPACITY};
use crate::reply::{
    Control, ControlRow, Reply, EMPTY_MESSAGE, NO_SESSIONS, SELECTION_ERROR, SELECTION_EXPIRED,
};
use crate::selection::{select_session_action_id, Action, QuickKey, SelectionValue};

/// Characters of user text written to the log.
const LOG_TEXT_CHARS: usize = 80;

/// Startup settings the router needs
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// The only user whose messages and clicks are acted on
    pub allowed_user: String,
    /// Target of hook approve/deny controls that name no session
    pub default_session: String,
    pub pending_capacity: usize,
}

impl RouterConfig {
    pub fn new(allowed_user: impl Into<String>, default_session: impl Into<String>) -> Self {
        Self {
            allowed_user: allowed_user.into(),
            default_session: default_session.into(),
            pending_capacity: DEFAULT_PENDING_CAPACITY,
        }
    }
}

/// Session router for a single operator.
///
/// Owns the pending-selection table; share it behind an `Arc` to handle
/// events concurrently.
#[derive(Debug)]
pub struct Router {
    sessions: SessionRegistry,
    pending: PendingTable,
    config: RouterConfig,
}

impl Router {
    pub fn new(sessions: SessionRegistry, config: RouterConfig) -> Self {
        Self {
            sessions,
            pending: PendingTable::new(config.pending_capacity),
            config,
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn pending(&self) -> &PendingTable {
        &self.pending
    }

    pub fn default_session(&self) -> &str {
        &self.config.default_session
    }

    /// Check if the user is authorized
    pub fn is_allowed(&self, user: &str) -> bool {
        !user.is_empty() && user == self.config.allowed_user
    }

    /// Handle one inbound chat message, returning the reply to post (if any).
    pub async fn handle_message(&self, message: &InboundMessage) -> Option<Reply> {
        if message.is_ignored_kind() {
            debug!(
                bot_id = ?message.bot_id,
                subtype = ?message.subtype,
                "ignoring bot or subtyped message"
            );
            return None;
        }

        info!(
            user = %message.user,
            channel_type = %message.channel_type,
            text = %safe_truncate(&message.text, LOG_TEXT_CHARS),
            "message received"
        );

        if !message.is_direct() {
            return None;
        }
        if !self.is_allowed(&message.user) {
            warn!(user = %message.user, "unauthorized user");
            return None;
        }

        let prompt = strip_command_prefix(&message.text);
        if prompt.is_empty() {
            return Some(Reply::text(EMPTY_MESSAGE));
        }

        if let Some(command) = Command::parse(prompt) {
            return Some(self.run_command(command).await);
        }

        if let (Some(session), payload) = parse_mention(prompt) {
            return Some(self.dispatch(session, payload).await);
        }

        let prefix = format!(
            "{}_{}",
            message.user,
            message.ts.as_deref().unwrap_or_default()
        );
        Some(self.route(&prefix, prompt, PickerStyle::Instruction).await)
    }

    /// Handle a click on one of the bridge's controls.
    pub async fn handle_click(&self, click: &ButtonClick) -> Option<Reply> {
        if !self.is_allowed(&click.user) {
            warn!(user = %click.user, action_id = %click.action_id, "unauthorized click");
            return None;
        }

        let Some(action) = Action::parse(&click.action_id) else {
            debug!(action_id = %click.action_id, "ignoring unknown action");
            return None;
        };

        let reply = match action {
            Action::SelectSession => self.resolve_selection(click).await,
            Action::Quick(key) => self.quick_send(click.target(), key).await,
            Action::QuickStatus => commands::status_summary(&self.sessions).await,
            Action::QuickSessions => commands::list_sessions(&self.sessions).await,
            Action::QuickMenu => commands::menu(&self.sessions).await,
            Action::SessionKey(key) => self.quick_send(click.target(), key).await,
            Action::SessionStatus => match click.target() {
                Some(session) => commands::status_detail(&self.sessions, session).await,
                None => commands::status_summary(&self.sessions).await,
            },
            Action::Hook(key) => self.hook_send(click.target(), key).await,
        };
        Some(reply)
    }

    async fn run_command(&self, command: Command) -> Reply {
        match command {
            Command::Status(None) => commands::status_summary(&self.sessions).await,
            Command::Status(Some(session)) => {
                commands::status_detail(&self.sessions, &session).await
            }
            Command::Sessions => commands::list_sessions(&self.sessions).await,
            Command::Menu => commands::menu(&self.sessions).await,
        }
    }

    /// Send `payload` to a named session, re-checking that it exists.
    pub async fn dispatch(&self, session: &str, payload: &str) -> Reply {
        if !self.sessions.session_exists(session).await {
            info!(session, "dispatch target not found");
            return Reply::not_found(session);
        }

        if self.sessions.send_text(session, payload).await {
            info!(session, text = %safe_truncate(payload, LOG_TEXT_CHARS), "sent to session");
            Reply::sent(session, payload)
        } else {
            warn!(session, text = %safe_truncate(payload, LOG_TEXT_CHARS), "send failed");
            Reply::send_failed(session)
        }
    }

    /// Pick the target from the live session set: none, the only one, or ask.
    async fn route(&self, id_prefix: &str, payload: &str, style: PickerStyle) -> Reply {
        let mut sessions = self.sessions.list_sessions().await;
        match sessions.len() {
            0 => Reply::text(NO_SESSIONS),
            1 => {
                let session = sessions.remove(0);
                self.dispatch(&session, payload).await
            }
            _ => {
                let msg_id = self.pending.insert(id_prefix, payload.to_string()).await;
                debug!(msg_id = %msg_id, candidates = sessions.len(), "awaiting session selection");
                picker(&msg_id, payload, &sessions, style)
            }
        }
    }

    async fn resolve_selection(&self, click: &ButtonClick) -> Reply {
        let selection = match SelectionValue::decode(click.value.as_deref()) {
            Ok(selection) => selection,
            Err(e) => {
                warn!(user = %click.user, action_id = %click.action_id, error = %e, "bad selection value");
                return Reply::text(SELECTION_ERROR);
            }
        };

        let Some(payload) = self.pending.take(&selection.msg_id).await else {
            info!(user = %click.user, msg_id = %selection.msg_id, "selection expired");
            return Reply::text(SELECTION_EXPIRED);
        };

        self.dispatch(&selection.session, &payload)
            .await
            .replacing_original()
    }

    /// Approve/deny with an explicit target, or auto-detected like an instruction
    async fn quick_send(&self, target: Option<&str>, key: QuickKey) -> Reply {
        match target {
            Some(session) => self.dispatch(session, key.token()).await,
            None => {
                let prefix = format!("quick_{}", key.token());
                self.route(&prefix, key.token(), PickerStyle::Quick).await
            }
        }
    }

    /// Approve/deny raised by an external notification hook
    async fn hook_send(&self, target: Option<&str>, key: QuickKey) -> Reply {
        let session = target.unwrap_or(&self.config.default_session);
        if !self.sessions.send_text(session, key.token()).await {
            warn!(session, "hook response could not be delivered");
            return Reply::text(format!(":x: Failed to send to `{session}`"));
        }

        info!(session, token = key.token(), "hook response sent");
        match key {
            QuickKey::Approve => Reply::text(format!(":white_check_mark: Approved `{session}`")),
            QuickKey::Deny => Reply::text(format!(":no_entry_sign: Denied `{session}`")),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum PickerStyle {
    /// Free-text instruction; the payload is quoted in the prompt
    Instruction,
    /// Approve/deny keystroke
    Quick,
}

/// Interactive prompt with one button per candidate session
fn picker(msg_id: &str, payload: &str, sessions: &[String], style: PickerStyle) -> Reply {
    let controls = sessions
        .iter()
        .map(|session| {
            let label = match style {
                PickerStyle::Instruction => format!(":computer: {session}"),
                PickerStyle::Quick => session.clone(),
            };
            Control::new(label, select_session_action_id(msg_id, session))
                .with_value(SelectionValue::new(msg_id, session.as_str()).encode())
        })
        .collect();

    let (heading, fallback) = match style {
        PickerStyle::Instruction => (
            format!(
                ":arrow_right: *Select target session:*\n> {}",
                safe_truncate(payload, crate::reply::ECHO_CHARS)
            ),
            "Select target session",
        ),
        PickerStyle::Quick => (format!("*Select target for `{payload}`:*"), "Select target"),
    };

    Reply::with_rows(fallback, vec![ControlRow::new(heading, controls)])
}
