//! Client core for the todo list service.
//!
//! # Overview
//! Keeps a local copy of the remote todo collection in sync with the server
//! without touching the network (host-does-IO pattern). The host executes
//! each `PendingRequest` and hands the response back to the controller.
//!
//! # Design
//! - `TodoClient` is stateless; it holds only `base_url`. Each operation is
//!   split into `build_*` (produces request) and `parse_*` (consumes
//!   response).
//! - `TodoListState` owns the collection, the draft and the pending-delete
//!   selection. Its transitions are pure and never issue requests.
//! - `TodoListController` ties the two together: `begin_*` issues,
//!   `complete` applies. Failures come back as typed `ControllerError`s.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod controller;
pub mod error;
pub mod http;
pub mod state;
pub mod types;

pub use client::TodoClient;
pub use controller::{ClearPolicy, Completion, PendingRequest, TodoListController};
pub use error::{ApiError, ControllerError, StateError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{Draft, LoadStatus, Notice, Operation, TodoListState};
pub use types::{NewTodo, Todo, TodoId};
