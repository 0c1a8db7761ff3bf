//! Pluggable HTTP transport.
//!
//! The library only needs three verbs from an HTTP client: `GET` returning a
//! JSON body, and `POST`/`PUT` with a JSON body returning a status code (and
//! optionally a JSON body). [`Transport`] captures exactly that, so any client
//! can be plugged into a [`Bridge`](crate::Bridge).
//!
//! # Feature Flags
//!
//! - `transport-reqwest` (default) - provides [`HttpTransport`], a blocking
//!   implementation backed by reqwest
//!
//! # Example
//!
//! ```toml
//! [dependencies]
//! # Bring your own transport
//! hue-lights-rs = { version = "0.1", default-features = false }
//! ```

use serde_json::Value;

use crate::errors::Error;

#[cfg(feature = "transport-reqwest")]
mod reqwest_impl;

#[cfg(feature = "transport-reqwest")]
pub use reqwest_impl::HttpTransport;

type Result<T> = std::result::Result<T, Error>;

/// Status code and decoded body of a `POST` or `PUT`.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    /// `Value::Null` when the body was empty or not JSON.
    pub body: Value,
}

impl Response {
    pub fn new(status: u16, body: Value) -> Self {
        Response { status, body }
    }

    /// Anything below 300 counts as accepted.
    pub fn is_success(&self) -> bool {
        self.status < 300
    }
}

/// Blocking request/response access to the bridge.
///
/// Implementations report failures to reach the bridge as [`Error::Http`];
/// non-success status codes are returned in [`Response`] and judged by the caller.
pub trait Transport {
    /// `GET url`, decoding the body as JSON.
    fn get(&self, url: &str) -> Result<Value>;

    /// `POST url` with a JSON body.
    fn post(&self, url: &str, body: &Value) -> Result<Response>;

    /// `PUT url` with a JSON body.
    fn put(&self, url: &str, body: &Value) -> Result<Response>;
}
