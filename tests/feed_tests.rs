//! External tests for feed classification and the todo view, the simpler
//! consumers of the shared WebSocket feed.

use chatwatch::api::ApiError;
use chatwatch::feed::{classify, FeedEvent};
use chatwatch::todos::{TodoView, FAILED_TO_LOAD, NO_TODOS};
use rstest::rstest;

// -- Classification -------------------------------------------------------

#[test]
fn test_message_event_routes_by_key_presence() {
    let event = classify(r#"{"conversation_id":1,"id":9,"user_id":2,"text":"hi"}"#);
    let Some(FeedEvent::Message(payload)) = event else {
        panic!("expected message-like event");
    };
    assert_eq!(payload["id"], 9);
}

#[test]
fn test_todo_event_routes_by_key_absence() {
    let event = classify(r#"{"id":4,"title":"water plants","due_date":"2026-09-01"}"#);
    assert!(matches!(event, Some(FeedEvent::Todo(_))));
}

#[rstest]
#[case("")]
#[case("???")]
#[case("[]")]
#[case("null")]
#[case("\"just a string\"")]
fn test_noise_frames_dropped(#[case] frame: &str) {
    assert!(classify(frame).is_none());
}

#[test]
fn test_empty_object_is_todo_like() {
    // A bare object has no conversation_id, so the todo view gets first
    // refusal; it will drop it at decode time.
    assert!(matches!(classify("{}"), Some(FeedEvent::Todo(_))));
}

// -- Todo view ------------------------------------------------------------

fn todo(id: i64, title: &str) -> chatwatch::api::Todo {
    chatwatch::api::Todo {
        id,
        title: title.to_string(),
        description: None,
        due_date: "2026-09-01".to_string(),
        created_at: None,
    }
}

#[test]
fn test_todo_load_keeps_api_order() {
    let mut view = TodoView::new();
    view.apply_load(Ok(vec![todo(3, "newest"), todo(2, "middle"), todo(1, "oldest")]));
    let ids: Vec<i64> = view.todos().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
    assert_eq!(view.placeholder(), None);
}

#[test]
fn test_todo_load_empty_placeholder() {
    let mut view = TodoView::new();
    view.apply_load(Ok(vec![]));
    assert_eq!(view.placeholder(), Some(NO_TODOS));
}

#[test]
fn test_todo_load_failure_placeholder() {
    let mut view = TodoView::new();
    view.apply_load(Err(ApiError::NotFound));
    assert_eq!(view.placeholder(), Some(FAILED_TO_LOAD));
    assert!(view.todos().is_empty());
}

#[test]
fn test_live_todo_appends_after_load() {
    let mut view = TodoView::new();
    view.apply_load(Ok(vec![todo(1, "existing")]));
    let payload = serde_json::json!({"id": 2, "title": "new one", "due_date": "2026-09-02"});
    assert!(view.ingest(&payload));
    assert_eq!(view.todos().len(), 2);
    assert_eq!(view.todos()[1].title, "new one");
}

#[test]
fn test_chat_event_never_reaches_todo_list() {
    let mut view = TodoView::new();
    let payload = serde_json::json!({"conversation_id": 1, "id": 9, "text": "hi"});
    assert!(!view.ingest(&payload));
    assert!(view.todos().is_empty());
}
