//! Instruction parsing: command prefix, `@session` mentions and bridge commands.

/// Optional marker in front of an instruction, matched case-insensitively.
pub const COMMAND_PREFIX: &str = "cc:";

/// Remove the optional `cc:` marker and surrounding whitespace.
///
/// An empty result means the operator sent nothing to route.
pub fn strip_command_prefix(text: &str) -> &str {
    let trimmed = text.trim();
    match trimmed.get(..COMMAND_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(COMMAND_PREFIX) => {
            trimmed[COMMAND_PREFIX.len()..].trim()
        }
        _ => trimmed,
    }
}

/// Split a leading `@session` mention from the rest of the instruction.
///
/// The mention must be `@` plus at least one non-whitespace character,
/// followed by whitespace (spaces, tabs or newlines) and some content. When
/// that shape is absent the whole text is returned untouched, so a bare
/// `@worker1` is a payload, not a mention.
///
/// ```
/// use slackbridge_core::parser::parse_mention;
///
/// assert_eq!(parse_mention("@worker1 run tests"), (Some("worker1"), "run tests"));
/// assert_eq!(parse_mention("@worker1"), (None, "@worker1"));
/// ```
pub fn parse_mention(text: &str) -> (Option<&str>, &str) {
    let Some(rest) = text.strip_prefix('@') else {
        return (None, text);
    };
    let Some(token_end) = rest.find(char::is_whitespace) else {
        return (None, text);
    };

    let session = &rest[..token_end];
    let payload = rest[token_end..].trim();
    if session.is_empty() || payload.is_empty() {
        return (None, text);
    }

    (Some(session), payload)
}

/// Commands handled by the bridge itself instead of being routed to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// `status` summarises every session, `status <name>` shows one screen
    Status(Option<String>),
    /// `sessions` / `ls`
    Sessions,
    /// `menu` / `m`
    Menu,
}

impl Command {
    /// Recognise a bridge command in an already prefix-stripped payload.
    pub fn parse(payload: &str) -> Option<Self> {
        let payload = payload.trim();
        let lowered = payload.to_lowercase();

        match lowered.as_str() {
            "sessions" | "ls" => return Some(Self::Sessions),
            "menu" | "m" => return Some(Self::Menu),
            _ => {}
        }

        let first = payload.split_whitespace().next()?;
        if !first.eq_ignore_ascii_case("status") {
            return None;
        }

        let target = payload[first.len()..].trim();
        if target.is_empty() {
            Some(Self::Status(None))
        } else {
            Some(Self::Status(Some(target.to_string())))
        }
    }
}
