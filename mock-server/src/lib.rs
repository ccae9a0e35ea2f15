use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::debug;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: u64,
    pub name: String,
    pub owner: String,
    pub done: bool,
}

#[derive(Deserialize)]
pub struct NewTodoItem {
    pub name: String,
    pub owner: String,
}

#[derive(Deserialize)]
pub struct DonePatch {
    pub done: bool,
}

#[derive(Deserialize)]
pub struct OwnerQuery {
    pub owner: Option<String>,
}

/// Items keyed by id; ids grow monotonically so key order is insertion order.
#[derive(Default)]
pub struct Store {
    next_id: u64,
    items: BTreeMap<u64, TodoItem>,
}

pub type Db = Arc<RwLock<Store>>;

pub const COLLECTION_PATH: &str = "/api/todos";

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::default()));
    Router::new()
        .route(COLLECTION_PATH, get(list_items).post(create_item))
        .route(&format!("{COLLECTION_PATH}/"), get(list_items).post(create_item))
        .route(
            &format!("{COLLECTION_PATH}/{{id}}"),
            get(get_item).patch(set_done).delete(delete_item),
        )
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_items(State(db): State<Db>, Query(query): Query<OwnerQuery>) -> Json<Vec<TodoItem>> {
    let store = db.read().await;
    let items: Vec<TodoItem> = store
        .items
        .values()
        .filter(|item| query.owner.as_deref().map_or(true, |owner| item.owner == owner))
        .cloned()
        .collect();
    debug!(owner = ?query.owner, count = items.len(), "list");
    Json(items)
}

async fn create_item(
    State(db): State<Db>,
    Json(input): Json<NewTodoItem>,
) -> Result<(StatusCode, Json<TodoItem>), StatusCode> {
    if input.name.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut store = db.write().await;
    store.next_id += 1;
    let item = TodoItem {
        id: store.next_id,
        name: input.name,
        owner: input.owner,
        done: false,
    };
    store.items.insert(item.id, item.clone());
    debug!(id = item.id, owner = %item.owner, "created");
    Ok((StatusCode::CREATED, Json(item)))
}

async fn get_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<TodoItem>, StatusCode> {
    let store = db.read().await;
    store.items.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn set_done(
    State(db): State<Db>,
    Path(id): Path<u64>,
    Json(input): Json<DonePatch>,
) -> Result<Json<TodoItem>, StatusCode> {
    let mut store = db.write().await;
    let item = store.items.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    item.done = input.done;
    debug!(id, done = input.done, "patched");
    Ok(Json(item.clone()))
}

async fn delete_item(State(db): State<Db>, Path(id): Path<u64>) -> Result<StatusCode, StatusCode> {
    let mut store = db.write().await;
    store
        .items
        .remove(&id)
        .map(|_| StatusCode::NO_CONTENT)
        .ok_or(StatusCode::NOT_FOUND)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn item_serializes_to_json() {
        let item = TodoItem {
            id: 1,
            name: "buy milk".to_string(),
            owner: "alice".to_string(),
            done: false,
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"id": 1, "name": "buy milk", "owner": "alice", "done": false})
        );
    }

    #[test]
    fn new_item_requires_owner() {
        let result: Result<NewTodoItem, _> = serde_json::from_str(r#"{"name":"x"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn done_patch_requires_done() {
        let result: Result<DonePatch, _> = serde_json::from_str(r#"{}"#);
        assert!(result.is_err());
    }

    #[test]
    fn owner_query_is_optional() {
        let query: OwnerQuery = serde_json::from_str(r#"{}"#).unwrap();
        assert!(query.owner.is_none());
    }
}
