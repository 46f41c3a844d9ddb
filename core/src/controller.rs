//! Request issuance and completion for the todo list.
//!
//! # Design
//! `begin_*` methods update transient UI state, then hand back a
//! `PendingRequest` for the host to execute. The host returns the outcome
//! through `complete`, which parses it and applies exactly one state
//! transition. Several requests may be outstanding at once and may complete
//! in any order; each completion is applied on its own.

use tracing::debug;

use crate::client::TodoClient;
use crate::error::{ApiError, ControllerError, StateError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::state::{Draft, Operation, TodoListState};
use crate::types::{NewTodo, Todo, TodoId};

/// When the draft and the pending-delete selection are cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    /// As soon as create/delete is invoked, whatever the outcome.
    #[default]
    OnInvoke,
    /// Only once the server confirms the operation.
    OnSuccess,
}

/// An issued request that has not been completed yet.
///
/// Consumed by `TodoListController::complete`, so each request is applied at
/// most once.
#[derive(Debug)]
#[must_use = "a pending request does nothing until it is executed and completed"]
pub struct PendingRequest {
    operation: Operation,
    request: HttpRequest,
    submitted: Option<Draft>,
}

impl PendingRequest {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn request(&self) -> &HttpRequest {
        &self.request
    }
}

/// What a successful completion changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    Loaded(usize),
    Created(Todo),
    Deleted(TodoId),
}

#[derive(Debug, Clone)]
pub struct TodoListController {
    client: TodoClient,
    state: TodoListState,
    policy: ClearPolicy,
    load_issued: bool,
}

impl TodoListController {
    pub fn new(client: TodoClient) -> Self {
        Self::with_policy(client, ClearPolicy::default())
    }

    pub fn with_policy(client: TodoClient, policy: ClearPolicy) -> Self {
        Self {
            client,
            state: TodoListState::new(),
            policy,
            load_issued: false,
        }
    }

    pub fn state(&self) -> &TodoListState {
        &self.state
    }

    pub fn client(&self) -> &TodoClient {
        &self.client
    }

    pub fn set_draft_title(&mut self, title: impl Into<String>) {
        self.state.set_draft_title(title);
    }

    pub fn set_draft_description(&mut self, description: impl Into<String>) {
        self.state.set_draft_description(description);
    }

    pub fn select_for_delete(&mut self, id: TodoId) -> Result<(), StateError> {
        self.state.select_for_delete(id)
    }

    pub fn cancel_delete(&mut self) {
        self.state.cancel_delete();
    }

    pub fn dismiss_notice(&mut self) {
        self.state.dismiss_notice();
    }

    /// Issues the initial load. Only the first call returns a request.
    pub fn begin_load(&mut self) -> Option<PendingRequest> {
        if self.load_issued {
            debug!("load already issued, ignoring");
            return None;
        }
        self.load_issued = true;
        self.state.load_started();
        Some(self.issue(Operation::Load, self.client.build_list_todos(), None))
    }

    /// Submits the current draft.
    ///
    /// Returns `Ok(None)` without issuing anything when the title is blank.
    /// Under `ClearPolicy::OnInvoke` the draft is cleared in either case.
    pub fn begin_create(&mut self) -> Result<Option<PendingRequest>, ApiError> {
        let draft = match self.policy {
            ClearPolicy::OnInvoke => self.state.take_draft(),
            ClearPolicy::OnSuccess => self.state.draft().clone(),
        };
        if draft.is_blank() {
            debug!("blank title, create skipped");
            return Ok(None);
        }
        let input = NewTodo {
            title: draft.title.clone(),
            description: draft.description.clone(),
        };
        let request = self.client.build_create_todo(&input)?;
        Ok(Some(self.issue(Operation::Create, request, Some(draft))))
    }

    /// Replaces the draft with `title`/`description` and submits it.
    pub fn create(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Result<Option<PendingRequest>, ApiError> {
        self.state.set_draft(Draft::new(title, description));
        self.begin_create()
    }

    /// Confirms deletion of the selected todo. No selection, no request.
    pub fn begin_delete(&mut self) -> Option<PendingRequest> {
        let id = match self.policy {
            ClearPolicy::OnInvoke => self.state.take_pending_delete(),
            ClearPolicy::OnSuccess => self.state.pending_delete(),
        };
        let Some(id) = id else {
            debug!("no todo selected, delete skipped");
            return None;
        };
        Some(self.issue(Operation::Delete(id), self.client.build_delete_todo(id), None))
    }

    /// Applies the outcome of a previously issued request.
    pub fn complete(
        &mut self,
        pending: PendingRequest,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<Completion, ControllerError> {
        debug!(operation = ?pending.operation, "completing request");
        match pending.operation {
            Operation::Load => self.apply_load(response).map(Completion::Loaded),
            Operation::Create => self
                .apply_create(pending.submitted, response)
                .map(Completion::Created),
            Operation::Delete(id) => self.apply_delete(id, response).map(Completion::Deleted),
        }
    }

    /// Like `complete`, for a request from `begin_load`. Returns the number of todos loaded.
    pub fn complete_load(
        &mut self,
        pending: PendingRequest,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<usize, ControllerError> {
        match pending.operation {
            Operation::Load => self.apply_load(response),
            actual => Err(ControllerError::OperationMismatch {
                expected: "load",
                actual,
            }),
        }
    }

    /// Like `complete`, for a request from `begin_create`.
    pub fn complete_create(
        &mut self,
        pending: PendingRequest,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<Todo, ControllerError> {
        match pending.operation {
            Operation::Create => self.apply_create(pending.submitted, response),
            actual => Err(ControllerError::OperationMismatch {
                expected: "create",
                actual,
            }),
        }
    }

    /// Like `complete`, for a request from `begin_delete`. Returns the deleted id.
    pub fn complete_delete(
        &mut self,
        pending: PendingRequest,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<TodoId, ControllerError> {
        match pending.operation {
            Operation::Delete(id) => self.apply_delete(id, response),
            actual => Err(ControllerError::OperationMismatch {
                expected: "delete",
                actual,
            }),
        }
    }

    fn apply_load(&mut self, response: Result<HttpResponse, TransportError>) -> Result<usize, ControllerError> {
        let result = self.parse(response, |c, r| c.parse_list_todos(r));
        let outcome = result.as_ref().map(Vec::len).map_err(Clone::clone);
        self.state.load_completed(result);
        outcome
    }

    fn apply_create(
        &mut self,
        submitted: Option<Draft>,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<Todo, ControllerError> {
        let result = self.parse(response, |c, r| c.parse_create_todo(r));
        if result.is_ok() && self.policy == ClearPolicy::OnSuccess {
            // Keep edits made while the request was in flight.
            if submitted.as_ref() == Some(self.state.draft()) {
                self.state.take_draft();
            }
        }
        let outcome = result.clone();
        self.state.create_completed(result);
        outcome
    }

    fn apply_delete(
        &mut self,
        id: TodoId,
        response: Result<HttpResponse, TransportError>,
    ) -> Result<TodoId, ControllerError> {
        let result = self.parse(response, |c, r| c.parse_delete_todo(r));
        if result.is_ok()
            && self.policy == ClearPolicy::OnSuccess
            && self.state.pending_delete() == Some(id)
        {
            self.state.cancel_delete();
        }
        let outcome = result.clone().map(|()| id);
        self.state.delete_completed(id, result);
        outcome
    }

    fn issue(&self, operation: Operation, request: HttpRequest, submitted: Option<Draft>) -> PendingRequest {
        debug!(?operation, method = %request.method, path = %request.path, "issuing request");
        PendingRequest {
            operation,
            request,
            submitted,
        }
    }

    fn parse<T>(
        &self,
        response: Result<HttpResponse, TransportError>,
        parse: impl FnOnce(&TodoClient, HttpResponse) -> Result<T, ApiError>,
    ) -> Result<T, ControllerError> {
        let response = response?;
        Ok(parse(&self.client, response)?)
    }
}
