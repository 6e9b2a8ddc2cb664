//! chatwatch: terminal live view for a small chat/todo demo API.
//!
//! Three modes over the same two backends: a REST API for history and a
//! shared WebSocket feed for live updates. The chat view reconciles the
//! two (dedup by message id, history reversed to oldest-first); the todo
//! view is the same shape without dedup; ping is a one-shot request used
//! to check the API is up.

pub mod api;
pub mod cli;
pub mod feed;
pub mod render;
pub mod todos;
pub mod view;
