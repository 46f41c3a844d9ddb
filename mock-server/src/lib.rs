use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub description: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct NewTodo {
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// In-memory table. Ids are handed out sequentially starting at 1 and never
/// reused, the way a serial primary key behaves.
#[derive(Debug, Default)]
pub struct Store {
    last_id: i64,
    todos: BTreeMap<i64, Todo>,
}

impl Store {
    pub fn with_todos(seed: impl IntoIterator<Item = NewTodo>) -> Self {
        let mut store = Self::default();
        for input in seed {
            store.insert(input);
        }
        store
    }

    pub fn insert(&mut self, input: NewTodo) -> Todo {
        self.last_id += 1;
        let todo = Todo {
            id: self.last_id,
            title: input.title,
            description: input.description,
        };
        self.todos.insert(todo.id, todo.clone());
        todo
    }
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    app_with(Store::default())
}

pub fn app_with(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/", get(root))
        .route("/todos", get(list_todos).post(create_todo))
        .route("/todos/{id}", get(get_todo).delete(delete_todo))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock todo service listening");
    }
    axum::serve(listener, app()).await
}

async fn root() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello World" }))
}

async fn list_todos(State(db): State<Db>) -> Json<Vec<Todo>> {
    let store = db.read().await;
    Json(store.todos.values().cloned().collect())
}

async fn create_todo(
    State(db): State<Db>,
    Json(input): Json<NewTodo>,
) -> (StatusCode, Json<Todo>) {
    let todo = db.write().await.insert(input);
    debug!(id = todo.id, "created todo");
    (StatusCode::CREATED, Json(todo))
}

async fn get_todo(
    State(db): State<Db>,
    Path(id): Path<i64>,
) -> Result<Json<Todo>, StatusCode> {
    let store = db.read().await;
    store.todos.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

// Deleting an unknown id is not an error.
async fn delete_todo(State(db): State<Db>, Path(id): Path<i64>) -> StatusCode {
    let removed = db.write().await.todos.remove(&id).is_some();
    debug!(id, removed, "delete todo");
    StatusCode::NO_CONTENT
}
