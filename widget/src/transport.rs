//! Blocking HTTP transport backed by a ureq agent.

use todo_sync_core::{HttpMethod, HttpRequest, HttpResponse, SyncError, Transport};
use tracing::trace;

/// Executes core requests with ureq.
///
/// Status codes are returned as data, never as errors, so the core decides
/// what a 404 or 500 means. Only failures to complete the exchange become
/// `SyncError::Network`.
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, req: HttpRequest) -> Result<HttpResponse, SyncError> {
        trace!(method = %req.method, url = %req.url, "executing");
        let result = match req.method {
            HttpMethod::Get => with_headers(self.agent.get(&req.url), &req.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(&req.url), &req.headers).call(),
            HttpMethod::Post => send(with_headers(self.agent.post(&req.url), &req.headers), req.body),
            HttpMethod::Patch => send(with_headers(self.agent.patch(&req.url), &req.headers), req.body),
        };
        let mut response = result.map_err(|e| SyncError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| SyncError::Network(e.to_string()))?;

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

fn send(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<String>,
) -> Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}
