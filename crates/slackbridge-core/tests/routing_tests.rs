mod common;

use common::{router, FakeHost, HostCall, ALLOWED_USER, OTHER_USER};
use pretty_assertions::assert_eq;
use slackbridge_core::reply::{EMPTY_MESSAGE, NO_SESSIONS};
use slackbridge_core::selection::SelectionValue;
use slackbridge_core::InboundMessage;

fn dm(text: &str) -> InboundMessage {
    InboundMessage::direct(ALLOWED_USER, text).with_ts("1700000000.000100")
}

#[tokio::test]
async fn test_single_session_dispatches_directly() {
    let host = FakeHost::with_sessions(&["claude"]);
    let router = router(&host);

    let reply = router.handle_message(&dm("run tests")).await.unwrap();

    assert_eq!(host.sent(), vec![("claude".to_string(), "run tests".to_string())]);
    assert!(host.calls().contains(&HostCall::Commit("claude".to_string())));
    assert!(reply.rows.is_empty());
    assert!(reply.text.contains("claude"));
    assert!(reply.text.contains("run tests"));
    assert!(router.pending().is_empty().await);
}

#[tokio::test]
async fn test_no_sessions_replies_without_dispatch() {
    let host = FakeHost::with_sessions(&[]);
    let router = router(&host);

    let reply = router.handle_message(&dm("run tests")).await.unwrap();

    assert_eq!(reply.text, NO_SESSIONS);
    assert!(host.sent().is_empty());
    assert!(router.pending().is_empty().await);
}

#[tokio::test]
async fn test_host_not_running_looks_like_no_sessions() {
    let host = FakeHost::down();
    let router = router(&host);

    let reply = router.handle_message(&dm("run tests")).await.unwrap();
    assert_eq!(reply.text, NO_SESSIONS);
}

#[tokio::test]
async fn test_multiple_sessions_create_one_picker() {
    let host = FakeHost::with_sessions(&["claude", "worker1", "worker2"]);
    let router = router(&host);

    let reply = router.handle_message(&dm("run tests")).await.unwrap();

    assert!(host.sent().is_empty());
    assert_eq!(router.pending().len().await, 1);
    assert_eq!(reply.rows.len(), 1);
    assert!(reply.rows[0].heading.as_deref().unwrap().contains("run tests"));

    let values: Vec<SelectionValue> = reply
        .controls()
        .map(|c| SelectionValue::decode(c.value.as_deref()).unwrap())
        .collect();
    let sessions: Vec<&str> = values.iter().map(|v| v.session.as_str()).collect();
    assert_eq!(sessions, vec!["claude", "worker1", "worker2"]);
    assert!(values.iter().all(|v| v.msg_id == values[0].msg_id));
    assert!(values[0].msg_id.starts_with("U_ALLOWED_1700000000.000100"));
}

#[tokio::test]
async fn test_mention_routes_without_listing_sessions() {
    let host = FakeHost::with_sessions(&["claude", "worker1"]);
    let router = router(&host);

    let reply = router
        .handle_message(&dm("@worker1 run tests\nand lint"))
        .await
        .unwrap();

    assert_eq!(
        host.sent(),
        vec![("worker1".to_string(), "run tests\nand lint".to_string())]
    );
    assert_eq!(host.list_count(), 0);
    assert!(reply.text.contains("worker1"));
    assert!(router.pending().is_empty().await);
}

#[tokio::test]
async fn test_mention_of_missing_session_is_not_found() {
    let host = FakeHost::with_sessions(&["claude"]);
    let router = router(&host);

    let reply = router.handle_message(&dm("@ghost run tests")).await.unwrap();

    assert_eq!(reply.text, ":x: `ghost` not found.");
    assert!(host.sent().is_empty());
}

#[tokio::test]
async fn test_bare_mention_is_routed_as_payload() {
    let host = FakeHost::with_sessions(&["claude"]);
    let router = router(&host);

    router.handle_message(&dm("@worker1")).await.unwrap();

    assert_eq!(host.sent(), vec![("claude".to_string(), "@worker1".to_string())]);
}

#[tokio::test]
async fn test_prefix_is_stripped_before_routing() {
    let host = FakeHost::with_sessions(&["claude"]);
    let router = router(&host);

    router.handle_message(&dm("CC:  run tests")).await.unwrap();

    assert_eq!(host.sent(), vec![("claude".to_string(), "run tests".to_string())]);
}

#[tokio::test]
async fn test_empty_after_prefix_never_queries_host() {
    let host = FakeHost::with_sessions(&["claude"]);
    let router = router(&host);

    for text in ["", "   ", "cc:", "cc:   "] {
        let reply = router.handle_message(&dm(text)).await.unwrap();
        assert_eq!(reply.text, EMPTY_MESSAGE);
    }
    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_unauthorized_user_is_silently_ignored() {
    let host = FakeHost::with_sessions(&["claude", "worker1"]);
    let router = router(&host);

    let message = InboundMessage::direct(OTHER_USER, "run tests");
    assert!(router.handle_message(&message).await.is_none());

    let message = InboundMessage::direct("", "run tests");
    assert!(router.handle_message(&message).await.is_none());

    assert!(host.calls().is_empty());
    assert!(router.pending().is_empty().await);
}

#[tokio::test]
async fn test_bot_subtype_and_channel_messages_are_ignored() {
    let host = FakeHost::with_sessions(&["claude"]);
    let router = router(&host);

    let mut from_bot = dm("run tests");
    from_bot.bot_id = Some("B_BOT".to_string());
    assert!(router.handle_message(&from_bot).await.is_none());

    let mut edited = dm("run tests");
    edited.subtype = Some("message_changed".to_string());
    assert!(router.handle_message(&edited).await.is_none());

    let mut in_channel = dm("run tests");
    in_channel.channel_type = "channel".to_string();
    assert!(router.handle_message(&in_channel).await.is_none());

    assert!(host.calls().is_empty());
}

#[tokio::test]
async fn test_ambiguous_messages_with_same_ts_get_distinct_ids() {
    let host = FakeHost::with_sessions(&["claude", "worker1"]);
    let router = router(&host);

    let first = router.handle_message(&dm("one")).await.unwrap();
    let second = router.handle_message(&dm("two")).await.unwrap();

    let id_of = |reply: &slackbridge_core::Reply| {
        let control = reply.controls().next().unwrap();
        SelectionValue::decode(control.value.as_deref()).unwrap().msg_id
    };
    assert_ne!(id_of(&first), id_of(&second));
    assert_eq!(router.pending().len().await, 2);
}
