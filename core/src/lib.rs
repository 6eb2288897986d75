//! Minimal JSON request helper bound to a base URL.
//!
//! # Overview
//! `build(url)` returns a `RequestHandle` exposing `get`, `post`, `put`
//! and `del`. Each verb records a `PendingRequest`; calling `send` on it
//! runs the request in the background and passes the parsed JSON body (or
//! an `AjayError`) to a completion callback.
//!
//! ```no_run
//! use serde_json::json;
//!
//! let users = ajay::build("https://jsonplaceholder.typicode.com/users")?;
//! users
//!     .get(json!({ "id": 2 }).as_object().cloned())
//!     .send(|result| match result {
//!         Ok(user) => println!("{}", user["name"]),
//!         Err(err) => eprintln!("{err}"),
//!     });
//! # Ok::<(), ajay::AjayError>(())
//! ```
//!
//! # Design
//! - `RequestHandle` is immutable; verbs perform no I/O.
//! - Requests and responses are plain data (`HttpRequest`, `HttpResponse`),
//!   so building and parsing are testable without a server.
//! - Network I/O goes through the `Transport` trait; `ReqwestTransport` is
//!   the default.
//! - Construction errors are returned synchronously; every other failure
//!   reaches the callback.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod request;
pub mod transport;
pub mod types;

pub use client::{build, parse_response, RequestHandle};
pub use config::ClientConfig;
pub use error::AjayError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use request::PendingRequest;
pub use transport::{ReqwestTransport, Transport};
pub use types::{to_params, Params};
