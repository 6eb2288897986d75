//! Client configuration.

use std::time::Duration;

use serde::Deserialize;

/// Settings shared by every request a `RequestHandle` produces.
///
/// Deserializable so a host can load it from its own config file; every
/// field falls back to its default when omitted.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Sent as the `user-agent` header by the reqwest transport.
    pub user_agent: String,
    /// Added to every request before any per-request header.
    pub default_headers: Vec<(String, String)>,
    /// Whole-request timeout. `None` leaves requests unbounded.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            user_agent: concat!("ajay/", env!("CARGO_PKG_VERSION")).to_string(),
            default_headers: vec![("accept".to_string(), "application/json".to_string())],
            timeout: None,
        }
    }
}
