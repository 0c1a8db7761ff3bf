//! Blocking reqwest transport.

use std::time::Duration;

use log::debug;
use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;

use super::{Response, Result, Transport};
use crate::errors::Error;

/// Blocking HTTP transport backed by reqwest.
#[derive(Debug, Clone, Default)]
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    /// Create a transport without a request timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a transport whose requests fail after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http("build", e))?;
        Ok(HttpTransport { client })
    }

    fn send(&self, action: &str, request: RequestBuilder) -> Result<Response> {
        let resp = request.send().map_err(|e| Error::http(action, e))?;
        let status = resp.status().as_u16();
        let text = resp.text().map_err(|e| Error::http("read", e))?;
        debug!("HTTP {} answered {}: {}", action, status, text);
        // The bridge usually answers with JSON; anything else is kept as Null.
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        Ok(Response::new(status, body))
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<Value> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .map_err(|e| Error::http("get", e))?
            .json()
            .map_err(|e| Error::http("decode", e))
    }

    fn post(&self, url: &str, body: &Value) -> Result<Response> {
        debug!("POST {} {}", url, body);
        self.send("post", self.client.post(url).json(body))
    }

    fn put(&self, url: &str, body: &Value) -> Result<Response> {
        debug!("PUT {} {}", url, body);
        self.send("put", self.client.put(url).json(body))
    }
}
