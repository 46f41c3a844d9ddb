//! Local view of the remote todo collection.
//!
//! # Design
//! `TodoListState` is a plain owned struct. Every change goes through a named
//! transition method that performs no I/O, so the controller can issue
//! requests separately and feed their outcomes back in whatever order they
//! complete. Failures never roll anything back; they are recorded as a
//! `Notice` and, for the initial load, as `LoadStatus::Failed`.

use std::collections::HashSet;
use std::mem;

use tracing::warn;

use crate::error::{ControllerError, StateError};
use crate::types::{Todo, TodoId};

/// Which remote operation a request or a failure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Load,
    Create,
    Delete(TodoId),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    Failed(String),
}

/// The most recent failed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: Operation,
    pub message: String,
}

/// The new-item form contents before submission.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub title: String,
    pub description: String,
}

impl Draft {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    /// A title made only of whitespace (byte order marks included) counts as blank.
    pub fn is_blank(&self) -> bool {
        self.title
            .trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
            .is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct TodoListState {
    todos: Vec<Todo>,
    draft: Draft,
    pending_delete: Option<TodoId>,
    load: LoadStatus,
    notice: Option<Notice>,
}

impl TodoListState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn get(&self, id: TodoId) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id == id)
    }

    pub fn contains(&self, id: TodoId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn pending_delete(&self) -> Option<TodoId> {
        self.pending_delete
    }

    pub fn load_status(&self) -> &LoadStatus {
        &self.load
    }

    pub fn last_notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    // --- draft ---

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.draft.title = title.into();
    }

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub fn set_draft(&mut self, draft: Draft) {
        self.draft = draft;
    }

    pub fn take_draft(&mut self) -> Draft {
        mem::take(&mut self.draft)
    }

    // --- pending-delete selection ---

    /// Replaces any previous selection.
    pub fn select_for_delete(&mut self, id: TodoId) -> Result<(), StateError> {
        if !self.contains(id) {
            return Err(StateError::UnknownTodo(id));
        }
        self.pending_delete = Some(id);
        Ok(())
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    pub fn take_pending_delete(&mut self) -> Option<TodoId> {
        self.pending_delete.take()
    }

    // --- remote completions ---

    pub fn load_started(&mut self) {
        self.load = LoadStatus::Loading;
    }

    /// Success replaces the whole collection. Failure leaves it untouched.
    pub fn load_completed(&mut self, result: Result<Vec<Todo>, ControllerError>) {
        match result {
            Ok(todos) => {
                self.todos = dedup_by_id(todos);
                self.load = LoadStatus::Loaded;
            }
            Err(err) => {
                let message = err.to_string();
                self.load = LoadStatus::Failed(message.clone());
                self.record_failure(Operation::Load, message);
            }
        }
    }

    pub fn create_completed(&mut self, result: Result<Todo, ControllerError>) {
        match result {
            Ok(todo) => self.append(todo),
            Err(err) => self.record_failure(Operation::Create, err.to_string()),
        }
    }

    /// Removing an id that is not present is a no-op.
    pub fn delete_completed(&mut self, id: TodoId, result: Result<(), ControllerError>) {
        match result {
            Ok(()) => self.todos.retain(|todo| todo.id != id),
            Err(err) => self.record_failure(Operation::Delete(id), err.to_string()),
        }
    }

    fn append(&mut self, todo: Todo) {
        if let Some(existing) = self.todos.iter_mut().find(|t| t.id == todo.id) {
            warn!(id = todo.id, "server returned an id already in the list, replacing it");
            *existing = todo;
            return;
        }
        self.todos.push(todo);
    }

    fn record_failure(&mut self, operation: Operation, message: String) {
        warn!(?operation, %message, "remote operation failed");
        self.notice = Some(Notice { operation, message });
    }
}

// First occurrence wins; order is otherwise preserved.
fn dedup_by_id(todos: Vec<Todo>) -> Vec<Todo> {
    let mut seen = HashSet::with_capacity(todos.len());
    let before = todos.len();
    let kept: Vec<Todo> = todos.into_iter().filter(|todo| seen.insert(todo.id)).collect();
    if kept.len() != before {
        warn!(dropped = before - kept.len(), "load returned duplicate ids");
    }
    kept
}
