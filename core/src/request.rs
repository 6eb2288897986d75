//! A recorded, not-yet-sent request.

use std::sync::Arc;

use serde_json::Value;

use crate::client::parse_response;
use crate::error::AjayError;
use crate::http::HttpRequest;
use crate::transport::Transport;

/// One HTTP call waiting to be sent.
///
/// Produced by the verb methods on `RequestHandle`. Sending consumes the
/// value, so a `PendingRequest` runs at most once.
#[derive(Debug)]
pub struct PendingRequest {
    request: HttpRequest,
    transport: Arc<dyn Transport>,
}

impl PendingRequest {
    pub(crate) fn new(request: HttpRequest, transport: Arc<dyn Transport>) -> Self {
        Self { request, transport }
    }

    /// The method, target, headers, and body that will be sent.
    pub fn request(&self) -> &HttpRequest {
        &self.request
    }

    /// Add a header to this request only.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.request.headers.push((name.into(), value.into()));
        self
    }

    /// Execute the request and parse the JSON response body.
    pub async fn fetch(self) -> Result<Value, AjayError> {
        let method = self.request.method;
        let url = self.request.url.clone();
        tracing::debug!(%method, %url, "sending request");

        let response = match self.transport.execute(self.request).await {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%method, %url, error = %err, "request failed");
                return Err(err);
            }
        };

        let status = response.status;
        tracing::debug!(%method, %url, status, "response received");
        let result = parse_response(response);
        if let Err(err) = &result {
            tracing::warn!(%method, %url, status, error = %err, "unusable response");
        }
        result
    }

    /// Execute the request in the background and hand the outcome to
    /// `on_complete`.
    ///
    /// Returns immediately. Inside a Tokio runtime the request is spawned
    /// onto it; otherwise a dedicated thread drives it on a current-thread
    /// runtime. `on_complete` is called exactly once.
    pub fn send<F>(self, on_complete: F)
    where
        F: FnOnce(Result<Value, AjayError>) + Send + 'static,
    {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(self.complete(on_complete));
            }
            Err(_) => {
                std::thread::spawn(move || {
                    match tokio::runtime::Builder::new_current_thread().enable_all().build() {
                        Ok(rt) => rt.block_on(self.complete(on_complete)),
                        Err(e) => on_complete(Err(AjayError::Runtime(e.to_string()))),
                    }
                });
            }
        }
    }

    async fn complete<F>(self, on_complete: F)
    where
        F: FnOnce(Result<Value, AjayError>),
    {
        on_complete(self.fetch().await);
    }
}
