//! Full controller lifecycle against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives the controller over
//! real HTTP using ureq. Validates that request building, response parsing
//! and the local state transitions agree with the actual server.

use todo_core::{
    Completion, HttpMethod, HttpRequest, HttpResponse, LoadStatus, TodoClient, TodoListController,
    TransportError,
};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// Disables ureq's automatic status-code-as-error behavior so 4xx/5xx
/// responses are returned as data rather than `Err`, letting the core
/// client handle status interpretation.
fn execute(req: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let result = match (req.method, req.body.as_deref()) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type("application/json")
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
    };
    let mut response = result.map_err(|e| TransportError(e.to_string()))?;

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();
    Ok(HttpResponse::new(status, body))
}

fn start_server() -> std::net::SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });
    addr
}

#[test]
fn controller_lifecycle() {
    let addr = start_server();
    let mut controller = TodoListController::new(TodoClient::new(&format!("http://{addr}")));

    // Step 1: initial load, nothing there yet.
    let pending = controller.begin_load().unwrap();
    let response = execute(pending.request());
    assert_eq!(controller.complete(pending, response).unwrap(), Completion::Loaded(0));
    assert_eq!(controller.state().load_status(), &LoadStatus::Loaded);

    // Step 2: create two todos.
    let pending = controller.create("Buy milk", "").unwrap().unwrap();
    let response = execute(pending.request());
    let first = match controller.complete(pending, response).unwrap() {
        Completion::Created(todo) => todo,
        other => panic!("unexpected completion: {other:?}"),
    };

    let pending = controller.create("Clean house", "weekly").unwrap().unwrap();
    let response = execute(pending.request());
    controller.complete(pending, response).unwrap();

    let titles: Vec<&str> = controller.state().todos().iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["Buy milk", "Clean house"]);

    // Step 3: blank title never reaches the server.
    assert!(controller.create("   ", "ignored").unwrap().is_none());

    // Step 4: local copy matches what the server now lists.
    let client = controller.client().clone();
    let server_view = client.parse_list_todos(execute(&client.build_list_todos()).unwrap()).unwrap();
    assert_eq!(server_view, controller.state().todos());

    // Step 5: delete the first.
    controller.select_for_delete(first.id).unwrap();
    let pending = controller.begin_delete().unwrap();
    assert_eq!(controller.state().pending_delete(), None);
    let response = execute(pending.request());
    assert_eq!(controller.complete(pending, response).unwrap(), Completion::Deleted(first.id));
    assert!(!controller.state().contains(first.id));

    // Step 6: server agrees.
    let err = client
        .parse_get_todo(execute(&client.build_get_todo(first.id)).unwrap())
        .unwrap_err();
    assert!(matches!(err, todo_core::ApiError::NotFound));
    let server_view = client.parse_list_todos(execute(&client.build_list_todos()).unwrap()).unwrap();
    assert_eq!(server_view, controller.state().todos());
}

#[test]
fn unreachable_server_marks_load_failed() {
    // Bind then drop to get a port nothing listens on.
    let addr = std::net::TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
    let mut controller = TodoListController::new(TodoClient::new(&format!("http://{addr}")));

    let pending = controller.begin_load().unwrap();
    let response = execute(pending.request());
    assert!(response.is_err());
    assert!(controller.complete(pending, response).is_err());
    assert!(matches!(controller.state().load_status(), LoadStatus::Failed(_)));
    assert!(controller.state().is_empty());
}
