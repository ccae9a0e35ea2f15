//! Synchronization core for a remote todo list.
//!
//! # Overview
//! Keeps a local view of one owner's items in agreement with a remote
//! collection resource through four operations: list, create, toggle done,
//! and delete. The core builds `HttpRequest` values and parses
//! `HttpResponse` values; a host-supplied `Transport` does the actual I/O.
//!
//! # Design
//! - `TodoClient` is stateless: it holds only the collection URL.
//! - `TodoSync` owns the local view and applies mutations before their
//!   requests resolve, tracking per entry whether the server confirmed it.
//! - Deletion is gated by a `Confirm` capability owned by the rendering layer.
//! - `TodoApp::mount` is the single bootstrap entry point.

pub mod app;
pub mod client;
pub mod error;
pub mod http;
pub mod sync;
pub mod types;

pub use app::{TodoApp, WidgetConfig};
pub use client::TodoClient;
pub use error::SyncError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport};
pub use sync::{
    can_submit, AlwaysConfirm, Confirm, ConfirmAction, EntryState, NeverConfirm, ReconcilePolicy, Removal, TodoSync,
    ViewEntry,
};
pub use types::{DonePatch, NewTodoItem, TodoId, TodoItem};
