//! In-memory transport for unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use todo_core::{HttpRequest, HttpResponse, TransportError};

use crate::transport::Transport;

/// Replays canned responses in order and records every request it sees.
#[derive(Default)]
pub(crate) struct Scripted {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    pub(crate) seen: RefCell<Vec<HttpRequest>>,
}

impl Scripted {
    pub(crate) fn with(responses: Vec<Result<HttpResponse, TransportError>>) -> Self {
        Self {
            responses: RefCell::new(responses.into()),
            seen: RefCell::default(),
        }
    }
}

impl Transport for &Scripted {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError("no scripted response left".to_string())))
    }
}
