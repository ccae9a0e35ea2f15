//! Stateless HTTP request builder and response parser for the todo
//! collection resource.
//!
//! # Design
//! `TodoClient` holds only the collection URL and carries no mutable state
//! between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. The caller executes the actual HTTP round-trip.

use serde::de::DeserializeOwned;

use crate::error::SyncError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{DonePatch, NewTodoItem, TodoId, TodoItem};

/// Synchronous, stateless client for the collection resource.
///
/// `base_url` addresses the collection itself (for example
/// `http://localhost:3000/api/todos/`); item URLs are `{base}{id}`.
#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: format!("{}/", base_url.trim_end_matches('/')),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list(&self, owner: &str) -> Result<HttpRequest, SyncError> {
        let query = serde_urlencoded::to_string(&[("owner", owner)])
            .map_err(|e| SyncError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Get,
            url: format!("{}?{query}", self.base_url),
            headers: Vec::new(),
            body: None,
        })
    }

    pub fn build_get(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create(&self, input: &NewTodoItem) -> Result<HttpRequest, SyncError> {
        let body = serde_json::to_string(input).map_err(|e| SyncError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.base_url.clone(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_set_done(&self, id: &TodoId, done: bool) -> Result<HttpRequest, SyncError> {
        let body = serde_json::to_string(&DonePatch { done })
            .map_err(|e| SyncError::Encode(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Patch,
            url: self.item_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete(&self, id: &TodoId) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn parse_list(&self, response: HttpResponse) -> Result<Vec<TodoItem>, SyncError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_get(&self, response: HttpResponse) -> Result<TodoItem, SyncError> {
        check_status(&response)?;
        decode(&response.body)
    }

    pub fn parse_create(&self, response: HttpResponse) -> Result<TodoItem, SyncError> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// The PATCH response body is not part of the contract and is ignored.
    pub fn parse_set_done(&self, response: HttpResponse) -> Result<(), SyncError> {
        check_status(&response)
    }

    pub fn parse_delete(&self, response: HttpResponse) -> Result<(), SyncError> {
        check_status(&response)
    }

    fn item_url(&self, id: &TodoId) -> String {
        format!("{}{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T, SyncError> {
    serde_json::from_str(body).map_err(|e| SyncError::Decode(e.to_string()))
}

/// Map non-success status codes to the appropriate `SyncError` variant.
fn check_status(response: &HttpResponse) -> Result<(), SyncError> {
    if response.is_success() {
        return Ok(());
    }
    if response.status == 404 {
        return Err(SyncError::NotFound);
    }
    Err(SyncError::Status {
        status: response.status,
        body: response.body.clone(),
    })
}
