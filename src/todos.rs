//! Todo list view: fetch once, then append whatever todo-like events the
//! feed delivers. Deliberately a strict subset of the chat view: no dedup,
//! no reordering, append order is arrival order.

use tracing::{debug, error};

use crate::api::{ApiError, Todo};

pub const NO_TODOS: &str = "No todos yet.";
pub const FAILED_TO_LOAD: &str = "Failed to load todos";

#[derive(Default)]
pub struct TodoView {
    todos: Vec<Todo>,
    placeholder: Option<&'static str>,
}

impl TodoView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn placeholder(&self) -> Option<&'static str> {
        self.placeholder
    }

    pub fn apply_load(&mut self, result: Result<Vec<Todo>, ApiError>) {
        match result {
            Ok(todos) if todos.is_empty() => {
                self.placeholder = Some(NO_TODOS);
            }
            Ok(todos) => {
                self.todos = todos;
                self.placeholder = None;
            }
            Err(err) => {
                error!("failed to fetch todos: {err}");
                self.placeholder = Some(FAILED_TO_LOAD);
            }
        }
    }

    /// Append a todo-like feed payload. Payloads carrying a
    /// `conversation_id` belong to the chat view and are refused; anything
    /// that does not decode as a todo is dropped.
    pub fn ingest(&mut self, payload: &serde_json::Value) -> bool {
        let Some(object) = payload.as_object() else {
            return false;
        };
        if object.contains_key("conversation_id") {
            return false;
        }
        match serde_json::from_value::<Todo>(payload.clone()) {
            Ok(todo) => {
                self.todos.push(todo);
                true
            }
            Err(err) => {
                debug!("dropping malformed todo event: {err}");
                false
            }
        }
    }
}
