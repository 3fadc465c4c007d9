//! Slack Block Kit rendering of bridge replies.
//!
//! Reference: <https://api.slack.com/reference/block-kit/blocks>

use serde::Serialize;
use slackbridge_core::{Control, ControlStyle, Reply};

/// A text object used throughout Block Kit.
#[derive(Debug, Clone, Serialize)]
pub struct TextObject {
    /// Text type: "plain_text" or "mrkdwn".
    #[serde(rename = "type")]
    pub text_type: String,
    pub text: String,
    /// Render `:emoji:` codes in plain text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emoji: Option<bool>,
}

impl TextObject {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text_type: "plain_text".to_string(),
            text: text.into(),
            emoji: Some(true),
        }
    }

    pub fn mrkdwn(text: impl Into<String>) -> Self {
        Self {
            text_type: "mrkdwn".to_string(),
            text: text.into(),
            emoji: None,
        }
    }
}

/// A button element for actions blocks.
#[derive(Debug, Clone, Serialize)]
pub struct ButtonElement {
    /// Element type (always "button").
    #[serde(rename = "type")]
    pub element_type: String,
    pub text: TextObject,
    /// Echoed back in the `block_actions` payload.
    pub action_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    /// "primary" (green) or "danger" (red).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub style: Option<String>,
}

impl From<&Control> for ButtonElement {
    fn from(control: &Control) -> Self {
        let style = match control.style {
            ControlStyle::Default => None,
            ControlStyle::Primary => Some("primary".to_string()),
            ControlStyle::Danger => Some("danger".to_string()),
        };
        Self {
            element_type: "button".to_string(),
            text: TextObject::plain(control.label.clone()),
            action_id: control.action_id.clone(),
            value: control.value.clone(),
            style,
        }
    }
}

/// The subset of Block Kit blocks the bridge emits.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    Section { text: TextObject },
    Actions { elements: Vec<ButtonElement> },
}

/// Blocks for a reply; `None` for plain-text replies.
///
/// Each control row becomes a section (its heading) followed by an actions
/// block holding the buttons.
pub fn render(reply: &Reply) -> Option<Vec<Block>> {
    if reply.rows.is_empty() {
        return None;
    }

    let mut blocks = Vec::with_capacity(reply.rows.len() * 2);
    for row in &reply.rows {
        if let Some(heading) = &row.heading {
            blocks.push(Block::Section {
                text: TextObject::mrkdwn(heading.clone()),
            });
        }
        if !row.controls.is_empty() {
            blocks.push(Block::Actions {
                elements: row.controls.iter().map(ButtonElement::from).collect(),
            });
        }
    }
    Some(blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use slackbridge_core::ControlRow;

    #[test]
    fn test_plain_reply_has_no_blocks() {
        assert!(render(&Reply::text("hello")).is_none());
    }

    #[test]
    fn test_rows_render_as_section_and_actions() {
        let reply = Reply::with_rows(
            "Quick action menu",
            vec![ControlRow::new(
                "*:zap: Quick Actions*",
                vec![
                    Control::new("y (approve)", "quick_y").primary(),
                    Control::new("n", "quick_session_n_w1").with_value("w1").danger(),
                    Control::new("status", "quick_status"),
                ],
            )],
        );

        let json = serde_json::to_value(render(&reply).unwrap()).unwrap();

        assert_eq!(json[0]["type"], "section");
        assert_eq!(json[0]["text"]["type"], "mrkdwn");
        assert_eq!(json[0]["text"]["text"], "*:zap: Quick Actions*");
        assert_eq!(json[1]["type"], "actions");

        let buttons = json[1]["elements"].as_array().unwrap();
        assert_eq!(buttons.len(), 3);
        assert_eq!(buttons[0]["type"], "button");
        assert_eq!(buttons[0]["text"]["type"], "plain_text");
        assert_eq!(buttons[0]["action_id"], "quick_y");
        assert_eq!(buttons[0]["style"], "primary");
        assert!(buttons[0].get("value").is_none());
        assert_eq!(buttons[1]["value"], "w1");
        assert_eq!(buttons[1]["style"], "danger");
        assert!(buttons[2].get("style").is_none());
    }
}
