//! Transport-neutral outbound replies.

use slackbridge_logging::safe_truncate;

pub const EMPTY_MESSAGE: &str = "Message is empty. Please type an instruction.";
pub const NO_SESSIONS: &str = ":x: No tmux sessions found.";
pub const SELECTION_ERROR: &str = ":x: Error. Please send the message again.";
pub const SELECTION_EXPIRED: &str = ":warning: Message expired. Please send it again.";

/// Characters of payload echoed back in a send confirmation.
pub const ECHO_CHARS: usize = 500;

/// Visual emphasis of a control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlStyle {
    #[default]
    Default,
    Primary,
    Danger,
}

/// A clickable control (a button)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    pub action_id: String,
    pub label: String,
    pub value: Option<String>,
    pub style: ControlStyle,
}

impl Control {
    pub fn new(label: impl Into<String>, action_id: impl Into<String>) -> Self {
        Self {
            action_id: action_id.into(),
            label: label.into(),
            value: None,
            style: ControlStyle::Default,
        }
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn primary(mut self) -> Self {
        self.style = ControlStyle::Primary;
        self
    }

    pub fn danger(mut self) -> Self {
        self.style = ControlStyle::Danger;
        self
    }
}

/// A row of controls with an optional heading shown above it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlRow {
    pub heading: Option<String>,
    pub controls: Vec<Control>,
}

impl ControlRow {
    pub fn new(heading: impl Into<String>, controls: Vec<Control>) -> Self {
        Self {
            heading: Some(heading.into()),
            controls,
        }
    }
}

/// A reply to the operator.
///
/// `text` is the whole message for plain replies and the notification
/// fallback when `rows` are present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub rows: Vec<ControlRow>,
    /// Edit the message whose control was clicked instead of posting anew
    pub replace_original: bool,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            rows: Vec::new(),
            replace_original: false,
        }
    }

    pub fn with_rows(text: impl Into<String>, rows: Vec<ControlRow>) -> Self {
        Self {
            text: text.into(),
            rows,
            replace_original: false,
        }
    }

    pub fn replacing_original(mut self) -> Self {
        self.replace_original = true;
        self
    }

    /// Every control across all rows
    pub fn controls(&self) -> impl Iterator<Item = &Control> {
        self.rows.iter().flat_map(|row| row.controls.iter())
    }

    pub fn not_found(session: &str) -> Self {
        Self::text(format!(":x: `{session}` not found."))
    }

    pub fn send_failed(session: &str) -> Self {
        Self::text(format!(":x: Failed to send to `{session}`."))
    }

    pub fn sent(session: &str, payload: &str) -> Self {
        Self::text(format!(
            ":arrow_right: Sent to `{session}`:\n> {}",
            safe_truncate(payload, ECHO_CHARS)
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sent_echo_is_truncated_for_display() {
        let payload = "x".repeat(ECHO_CHARS * 2);
        let reply = Reply::sent("claude", &payload);

        assert!(reply.text.starts_with(":arrow_right: Sent to `claude`:\n> "));
        assert!(reply.text.ends_with("..."));
        assert!(reply.text.chars().count() < ECHO_CHARS + 40);
    }

    #[test]
    fn test_controls_flatten_rows() {
        let reply = Reply::with_rows(
            "menu",
            vec![
                ControlRow::new("a", vec![Control::new("y", "quick_y").primary()]),
                ControlRow::new("b", vec![Control::new("n", "quick_n").danger()]),
            ],
        );
        let ids: Vec<&str> = reply.controls().map(|c| c.action_id.as_str()).collect();
        assert_eq!(ids, vec!["quick_y", "quick_n"]);
        assert!(!reply.replace_original);
        assert!(reply.replacing_original().replace_original);
    }
}
