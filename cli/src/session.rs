//! Blocking driver that pairs a controller with a transport.

use tracing::{debug, info};

use todo_core::{
    ControllerError, HttpResponse, PendingRequest, StateError, Todo, TodoId, TodoListController,
    TodoListState, TransportError,
};

use crate::transport::Transport;

/// Runs each controller operation to completion before returning.
pub struct Session<T> {
    controller: TodoListController,
    transport: T,
}

impl<T: Transport> Session<T> {
    pub fn new(controller: TodoListController, transport: T) -> Self {
        Self {
            controller,
            transport,
        }
    }

    pub fn state(&self) -> &TodoListState {
        self.controller.state()
    }

    /// Returns the number of todos loaded, or `None` if the load was already issued.
    pub fn load(&mut self) -> Result<Option<usize>, ControllerError> {
        let Some(pending) = self.controller.begin_load() else {
            return Ok(None);
        };
        let response = self.execute(&pending);
        let count = self.controller.complete_load(pending, response)?;
        info!(count, "loaded todos");
        Ok(Some(count))
    }

    /// Returns `None` when the title is blank and nothing was sent.
    pub fn create(
        &mut self,
        title: &str,
        description: &str,
    ) -> Result<Option<Todo>, ControllerError> {
        let Some(pending) = self.controller.create(title, description)? else {
            return Ok(None);
        };
        let response = self.execute(&pending);
        let todo = self.controller.complete_create(pending, response)?;
        info!(id = todo.id, "created todo");
        Ok(Some(todo))
    }

    pub fn select_for_delete(&mut self, id: TodoId) -> Result<(), StateError> {
        self.controller.select_for_delete(id)
    }

    pub fn cancel_delete(&mut self) {
        self.controller.cancel_delete();
    }

    /// Deletes the selected todo. Returns `None` when nothing was selected.
    pub fn confirm_delete(&mut self) -> Result<Option<TodoId>, ControllerError> {
        let Some(pending) = self.controller.begin_delete() else {
            return Ok(None);
        };
        let response = self.execute(&pending);
        let id = self.controller.complete_delete(pending, response)?;
        info!(id, "deleted todo");
        Ok(Some(id))
    }

    fn execute(&self, pending: &PendingRequest) -> Result<HttpResponse, TransportError> {
        let response = self.transport.execute(pending.request());
        debug!(ok = response.is_ok(), "round-trip finished");
        response
    }
}
