//! Endpoint-bound request factory and response parser.
//!
//! # Design
//! `RequestHandle` holds only the endpoint, the default headers, and a
//! shared transport; it never changes after construction. Each verb method
//! records a method, target, and payload into a fresh `PendingRequest` and
//! performs no I/O. `parse_response` is the pure counterpart that turns a
//! raw `HttpResponse` into a JSON value.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ClientConfig;
use crate::error::AjayError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::request::PendingRequest;
use crate::transport::{ReqwestTransport, Transport};
use crate::types::{encode_query, Params};

/// Create a `RequestHandle` for `url` with the default configuration.
///
/// An empty (or whitespace-only) `url` counts as missing and fails with
/// `InvalidArgument`.
pub fn build(url: &str) -> Result<RequestHandle, AjayError> {
    RequestHandle::new(url)
}

/// Factory for requests against a single endpoint.
///
/// Cloning is cheap; clones share the endpoint and transport.
#[derive(Debug, Clone)]
pub struct RequestHandle {
    endpoint: Arc<str>,
    default_headers: Arc<[(String, String)]>,
    transport: Arc<dyn Transport>,
}

impl RequestHandle {
    pub fn new(url: &str) -> Result<Self, AjayError> {
        Self::with_config(url, ClientConfig::default())
    }

    pub fn with_config(url: &str, config: ClientConfig) -> Result<Self, AjayError> {
        let endpoint = validate_endpoint(url)?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self {
            endpoint,
            default_headers: config.default_headers.into(),
            transport: Arc::new(transport),
        })
    }

    /// Use a caller-supplied transport instead of reqwest.
    pub fn with_transport(
        url: &str,
        config: ClientConfig,
        transport: Arc<dyn Transport>,
    ) -> Result<Self, AjayError> {
        Ok(Self {
            endpoint: validate_endpoint(url)?,
            default_headers: config.default_headers.into(),
            transport,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the endpoint, with `params` encoded into the query string.
    pub fn get(&self, params: impl Into<Option<Params>>) -> PendingRequest {
        self.with_query(HttpMethod::Get, params.into())
    }

    /// POST `body` to the endpoint as JSON.
    pub fn post(&self, body: impl Into<Option<Params>>) -> PendingRequest {
        self.with_body(HttpMethod::Post, body.into())
    }

    /// PUT `body` to the endpoint as JSON.
    pub fn put(&self, body: impl Into<Option<Params>>) -> PendingRequest {
        self.with_body(HttpMethod::Put, body.into())
    }

    /// DELETE the endpoint, with `params` encoded into the query string.
    pub fn del(&self, params: impl Into<Option<Params>>) -> PendingRequest {
        self.with_query(HttpMethod::Delete, params.into())
    }

    fn with_query(&self, method: HttpMethod, params: Option<Params>) -> PendingRequest {
        let url = match params.filter(|p| !p.is_empty()) {
            Some(params) => {
                let separator = if self.endpoint.contains('?') { '&' } else { '?' };
                format!("{}{separator}{}", self.endpoint, encode_query(&params))
            }
            None => self.endpoint.to_string(),
        };
        self.pending(method, url, Vec::new(), None)
    }

    fn with_body(&self, method: HttpMethod, body: Option<Params>) -> PendingRequest {
        match body {
            Some(body) => {
                // A string-keyed map of JSON values always serializes.
                let body = Value::Object(body).to_string();
                let headers = vec![("content-type".to_string(), "application/json".to_string())];
                self.pending(method, self.endpoint.to_string(), headers, Some(body))
            }
            None => self.pending(method, self.endpoint.to_string(), Vec::new(), None),
        }
    }

    fn pending(
        &self,
        method: HttpMethod,
        url: String,
        extra_headers: Vec<(String, String)>,
        body: Option<String>,
    ) -> PendingRequest {
        let mut headers = self.default_headers.to_vec();
        headers.extend(extra_headers);
        let request = HttpRequest {
            method,
            url,
            headers,
            body,
        };
        PendingRequest::new(request, Arc::clone(&self.transport))
    }
}

fn validate_endpoint(url: &str) -> Result<Arc<str>, AjayError> {
    let trimmed = url.trim();
    if trimmed.is_empty() {
        return Err(AjayError::InvalidArgument("a URL is required".to_string()));
    }
    let endpoint = match trimmed.trim_end_matches('/') {
        // "/" on its own is a valid relative endpoint.
        "" => "/",
        stripped => stripped,
    };
    Ok(Arc::from(endpoint))
}

/// Interpret a raw response: 2xx bodies are parsed as JSON (an empty body
/// becomes `Value::Null`), anything else is an `HttpStatus` error.
pub fn parse_response(response: HttpResponse) -> Result<Value, AjayError> {
    if !response.is_success() {
        return Err(AjayError::HttpStatus {
            status: response.status,
            body: response.body,
        });
    }
    if response.body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&response.body).map_err(|e| AjayError::Deserialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn users() -> RequestHandle {
        build("http://localhost:3000/users").unwrap()
    }

    fn params(value: Value) -> Params {
        value.as_object().cloned().unwrap()
    }

    fn accept_json() -> (String, String) {
        ("accept".to_string(), "application/json".to_string())
    }

    #[test]
    fn build_rejects_missing_url() {
        assert!(matches!(build(""), Err(AjayError::InvalidArgument(_))));
        assert!(matches!(build("   "), Err(AjayError::InvalidArgument(_))));
    }

    #[test]
    fn build_accepts_relative_url() {
        let handle = build("/test").unwrap();
        assert_eq!(handle.endpoint(), "/test");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        assert_eq!(build("http://localhost:3000/users/").unwrap().endpoint(), "http://localhost:3000/users");
        assert_eq!(build("/").unwrap().endpoint(), "/");
    }

    #[test]
    fn get_without_params_targets_bare_endpoint() {
        let pending = users().get(None);
        let req = pending.request();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.url, "http://localhost:3000/users");
        assert_eq!(req.headers, vec![accept_json()]);
        assert!(req.body.is_none());
    }

    #[test]
    fn get_with_params_appends_query() {
        let pending = users().get(params(json!({"id": 2})));
        assert_eq!(pending.request().url, "http://localhost:3000/users?id=2");
    }

    #[test]
    fn empty_params_leave_url_untouched() {
        let pending = users().get(Params::new());
        assert_eq!(pending.request().url, "http://localhost:3000/users");
    }

    #[test]
    fn query_is_appended_to_existing_query() {
        let handle = build("http://localhost:3000/posts?userId=1").unwrap();
        let pending = handle.del(params(json!({"draft": true})));
        assert_eq!(pending.request().method, HttpMethod::Delete);
        assert_eq!(pending.request().url, "http://localhost:3000/posts?userId=1&draft=true");
    }

    #[test]
    fn post_serializes_body_as_json() {
        let handle = build("http://localhost:3000/posts").unwrap();
        let pending = handle.post(params(json!({
            "title": "AJAY TEST",
            "body": "lorem ipsum",
            "userId": 1
        })));
        let req = pending.request();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.url, "http://localhost:3000/posts");
        assert_eq!(req.header("content-type"), Some("application/json"));
        let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["title"], "AJAY TEST");
        assert_eq!(body["userId"], 1);
    }

    #[test]
    fn put_without_body_sends_no_payload() {
        let pending = users().put(None);
        let req = pending.request();
        assert_eq!(req.method, HttpMethod::Put);
        assert!(req.body.is_none());
        assert_eq!(req.header("content-type"), None);
    }

    #[test]
    fn every_verb_yields_a_pending_request() {
        let handle = users();
        let methods: Vec<HttpMethod> = [handle.get(None), handle.post(None), handle.put(None), handle.del(None)]
            .iter()
            .map(|p| p.request().method)
            .collect();
        assert_eq!(
            methods,
            vec![HttpMethod::Get, HttpMethod::Post, HttpMethod::Put, HttpMethod::Delete]
        );
    }

    #[test]
    fn verb_calls_do_not_change_the_handle() {
        let handle = users();
        let before = handle.endpoint().to_string();
        let _first = handle.get(params(json!({"id": 1})));
        let _second = handle.post(params(json!({"title": "x"})));
        assert_eq!(handle.endpoint(), before);
        assert_eq!(handle.get(None).request().url, before);
    }

    #[test]
    fn custom_default_headers_are_applied() {
        let config = ClientConfig {
            default_headers: vec![("x-fixture".to_string(), "1".to_string())],
            ..ClientConfig::default()
        };
        let handle = RequestHandle::with_config("http://localhost:3000/users", config).unwrap();
        let pending = handle.get(None);
        assert_eq!(pending.request().header("x-fixture"), Some("1"));
        assert_eq!(pending.request().header("accept"), None);
    }

    #[test]
    fn parse_response_success() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"[{"id":1,"name":"Leanne Graham"}]"#.to_string(),
        };
        let value = parse_response(response).unwrap();
        assert_eq!(value[0]["name"], "Leanne Graham");
    }

    #[test]
    fn parse_response_empty_body_is_null() {
        let response = HttpResponse {
            status: 204,
            headers: Vec::new(),
            body: String::new(),
        };
        assert_eq!(parse_response(response).unwrap(), Value::Null);
    }

    #[test]
    fn parse_response_wrong_status() {
        let response = HttpResponse {
            status: 500,
            headers: Vec::new(),
            body: "internal error".to_string(),
        };
        let err = parse_response(response).unwrap_err();
        assert!(matches!(err, AjayError::HttpStatus { status: 500, .. }));
    }

    #[test]
    fn parse_response_bad_json() {
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: "not json".to_string(),
        };
        let err = parse_response(response).unwrap_err();
        assert!(matches!(err, AjayError::Deserialization(_)));
    }
}
