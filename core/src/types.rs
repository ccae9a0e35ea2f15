//! Domain DTOs for the todo collection resource.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! Integration tests catch any schema drift between the two crates.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Server-assigned identifier of a todo item.
///
/// The client never interprets ids. Numbers and strings are both accepted on
/// the wire and written back in the same shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TodoId {
    Number(u64),
    Text(String),
}

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TodoId::Number(n) => write!(f, "{n}"),
            TodoId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for TodoId {
    fn from(n: u64) -> Self {
        TodoId::Number(n)
    }
}

impl From<&str> for TodoId {
    fn from(s: &str) -> Self {
        TodoId::Text(s.to_string())
    }
}

/// A single todo item as stored by the remote collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TodoItem {
    pub id: TodoId,
    pub name: String,
    pub owner: String,
    #[serde(default)]
    pub done: bool,
}

/// Request payload for creating a new item. The server assigns `id` and
/// starts the item as not done.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodoItem {
    pub name: String,
    pub owner: String,
}

/// Partial update payload; only the completion flag is ever patched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DonePatch {
    pub done: bool,
}
