//! Conversation view synchronizer.
//!
//! `ChatView` reconciles a REST-fetched message history with the live feed:
//! one historical load caches the conversation identity, then every feed
//! event is compared against it and appended through a dedup guard. All
//! session state (cached id, seen-ID set, entries) lives on the struct,
//! with no ambient globals, and the pure transitions take plain
//! values, so they test without a network.

use std::collections::HashSet;

use tracing::{debug, error};

use crate::api::{coerce_id, ApiClient, ApiError, Conversation, Message};
use crate::render::{self, Entry};

// -- Placeholder states -----------------------------------------------------

/// What the view shows instead of messages when there are none to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    NoMessages,
    NotFound,
    FailedToLoad,
}

impl Placeholder {
    pub fn text(self) -> &'static str {
        match self {
            Placeholder::NoMessages => "No messages yet.",
            Placeholder::NotFound => "Conversation not found.",
            Placeholder::FailedToLoad => "Failed to load messages",
        }
    }
}

// -- Feed outcomes ----------------------------------------------------------

/// What the view decided to do with one feed payload. `NeedsResync` asks
/// the driver to re-run the historical load because an event arrived before
/// the conversation identity was known; the event itself is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Appended,
    NeedsResync,
    Ignored,
}

// -- ChatView ---------------------------------------------------------------

pub struct ChatView {
    user_a: i64,
    user_b: i64,
    conversation_id: Option<i64>,
    seen_ids: HashSet<i64>,
    entries: Vec<Entry>,
    placeholder: Option<Placeholder>,
    /// Guards the historical fetch so a burst of early feed events cannot
    /// stack concurrent resyncs.
    load_in_flight: bool,
}

impl ChatView {
    pub fn new(user_a: i64, user_b: i64) -> Self {
        Self {
            user_a,
            user_b,
            conversation_id: None,
            seen_ids: HashSet::new(),
            entries: Vec::new(),
            placeholder: None,
            load_in_flight: false,
        }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn placeholder(&self) -> Option<Placeholder> {
        self.placeholder
    }

    pub fn conversation_id(&self) -> Option<i64> {
        self.conversation_id
    }

    /// Run the historical fetch and fold the result into the view. A load
    /// already in flight makes this a no-op.
    pub async fn load(&mut self, client: &ApiClient) {
        if self.load_in_flight {
            return;
        }
        self.load_in_flight = true;
        let result = client.conversation_by_users(self.user_a, self.user_b).await;
        self.load_in_flight = false;
        self.apply_load(result);
    }

    /// Fold a fetch result into the view. Success replaces the visible list
    /// with the history in oldest-first order (the API sends newest-first)
    /// and caches the conversation id; every failure mode becomes a
    /// placeholder and the attempt is terminal, with no retry.
    pub fn apply_load(&mut self, result: Result<Conversation, ApiError>) {
        match result {
            Ok(conv) => {
                self.conversation_id = Some(conv.id);
                if conv.messages.is_empty() {
                    self.placeholder = Some(Placeholder::NoMessages);
                    return;
                }
                self.entries.clear();
                self.placeholder = None;
                for message in conv.messages.iter().rev() {
                    self.append(message);
                }
            }
            Err(ApiError::NotFound) => {
                self.placeholder = Some(Placeholder::NotFound);
            }
            Err(err) => {
                error!("failed to fetch conversation: {err}");
                self.placeholder = Some(Placeholder::FailedToLoad);
            }
        }
    }

    /// Decide what to do with one message-like feed payload.
    ///
    /// Non-objects and payloads without a `conversation_id` key are feed
    /// noise from other features and are dropped silently. An event that
    /// lands before the identity is known triggers a resync instead of
    /// being rendered; the event itself is not replayed, the history fetch
    /// will pick it up.
    pub fn handle_feed_event(&mut self, payload: &serde_json::Value) -> Outcome {
        let Some(object) = payload.as_object() else {
            return Outcome::Ignored;
        };
        if !object.contains_key("conversation_id") {
            return Outcome::Ignored;
        }

        let Some(cached) = self.conversation_id else {
            if self.load_in_flight {
                return Outcome::Ignored;
            }
            return Outcome::NeedsResync;
        };

        if object.get("conversation_id").and_then(coerce_id) != Some(cached) {
            return Outcome::Ignored;
        }

        match serde_json::from_value::<Message>(payload.clone()) {
            Ok(message) => {
                if self.append(&message) {
                    Outcome::Appended
                } else {
                    Outcome::Ignored
                }
            }
            Err(err) => {
                debug!("dropping malformed message event: {err}");
                Outcome::Ignored
            }
        }
    }

    /// Dedup-guarded append: a message without an id, or one already seen,
    /// is a no-op. Returns whether an entry was added.
    pub fn append(&mut self, message: &Message) -> bool {
        let Some(id) = message.id else {
            return false;
        };
        if !self.seen_ids.insert(id) {
            return false;
        }
        self.entries.push(render::entry_for(message, id, self.user_b));
        true
    }
}
