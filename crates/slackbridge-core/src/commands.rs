//! Bridge commands that never go through session selection.

use slackbridge_logging::safe_truncate;
use slackbridge_terminal::{SessionRegistry, EMPTY_PLACEHOLDER};

use crate::reply::{Control, ControlRow, Reply, NO_SESSIONS};
use crate::selection::{
    session_key_action_id, session_status_action_id, QuickKey, QUICK_APPROVE, QUICK_DENY,
    QUICK_SESSIONS, QUICK_STATUS,
};

/// Width of the last-line preview in the status summary.
pub const SUMMARY_LINE_CHARS: usize = 80;
/// Characters of screen shown by `status <name>`, counted from the end.
pub const DETAIL_SCREEN_CHARS: usize = 2500;

/// `status`: one line per live session with its last non-blank screen line
pub async fn status_summary(sessions: &SessionRegistry) -> Reply {
    let names = sessions.list_sessions().await;
    if names.is_empty() {
        return Reply::text(NO_SESSIONS);
    }

    let mut lines = Vec::with_capacity(names.len());
    for name in &names {
        let screen = sessions.capture_screen(name).await;
        let last_line = screen
            .lines()
            .rev()
            .find(|line| !line.trim().is_empty())
            .unwrap_or(EMPTY_PLACEHOLDER);
        lines.push(format!(
            ":white_check_mark: `{name}`: {}",
            safe_truncate(last_line, SUMMARY_LINE_CHARS)
        ));
    }

    Reply::text(format!(
        ":computer: Sessions ({}):\n{}",
        names.len(),
        lines.join("\n")
    ))
}

/// `status <name>`: the tail of one session's screen
pub async fn status_detail(sessions: &SessionRegistry, name: &str) -> Reply {
    if !sessions.session_exists(name).await {
        return Reply::not_found(name);
    }

    let screen = sessions.capture_screen(name).await;
    Reply::text(format!(
        ":white_check_mark: `{name}` is running\n```\n{}\n```",
        keep_tail(&screen, DETAIL_SCREEN_CHARS)
    ))
}

/// `sessions` / `ls`
pub async fn list_sessions(sessions: &SessionRegistry) -> Reply {
    let names = sessions.list_sessions().await;
    if names.is_empty() {
        return Reply::text(NO_SESSIONS);
    }

    let lines: Vec<String> = names.iter().map(|name| format!("  - `{name}`")).collect();
    Reply::text(format!(
        ":computer: Active sessions ({}):\n{}",
        names.len(),
        lines.join("\n")
    ))
}

/// `menu` / `m`: quick actions, plus a row per session when there is a choice
pub async fn menu(sessions: &SessionRegistry) -> Reply {
    let names = sessions.list_sessions().await;

    let mut rows = vec![ControlRow::new(
        "*:zap: Quick Actions*",
        vec![
            Control::new("y (approve)", QUICK_APPROVE).primary(),
            Control::new("n (deny)", QUICK_DENY).danger(),
            Control::new("status", QUICK_STATUS),
            Control::new("sessions", QUICK_SESSIONS),
        ],
    )];

    if names.len() > 1 {
        rows.extend(names.iter().map(|name| {
            ControlRow::new(
                format!(":computer: *{name}*"),
                vec![
                    Control::new("y", session_key_action_id(QuickKey::Approve, name))
                        .with_value(name.as_str())
                        .primary(),
                    Control::new("n", session_key_action_id(QuickKey::Deny, name))
                        .with_value(name.as_str())
                        .danger(),
                    Control::new("status", session_status_action_id(name))
                        .with_value(name.as_str()),
                ],
            )
        }));
    }

    Reply::with_rows("Quick action menu", rows)
}

/// Keep the last `max_chars` characters, marking the cut with a leading `...`
fn keep_tail(text: &str, max_chars: usize) -> String {
    let total = text.chars().count();
    if total <= max_chars {
        return text.to_string();
    }
    let tail: String = text.chars().skip(total - max_chars).collect();
    format!("...\n{tail}")
}
