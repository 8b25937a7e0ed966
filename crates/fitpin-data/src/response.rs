//! Responses as the backend sends them back.
//!
//! The FitPin backend signals business outcomes in a JSON `message` field
//! and sometimes answers 200 with an empty body or `null` for "nothing
//! here", so both get first-class helpers.

use crate::FetchError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// A buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        self.status / 100 == 2
    }

    /// 4xx.
    pub fn is_client_error(&self) -> bool {
        self.status / 100 == 4
    }

    /// 5xx.
    pub fn is_server_error(&self) -> bool {
        self.status / 100 == 5
    }

    /// The body as UTF-8.
    pub fn text(&self) -> Result<String, FetchError> {
        std::str::from_utf8(&self.body)
            .map(str::to_owned)
            .map_err(|e| FetchError::ParseError(format!("body is not UTF-8: {}", e)))
    }

    /// Decode the JSON body.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Decode the JSON body; blank or `null` is `None`.
    pub fn json_opt<T: DeserializeOwned>(&self) -> Result<Option<T>, FetchError> {
        if self.body.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        self.json::<Option<T>>()
    }

    /// The `message` field of a JSON object body.
    pub fn message(&self) -> Option<String> {
        match self.json::<serde_json::Value>().ok()?.get("message")? {
            serde_json::Value::String(message) => Some(message.clone()),
            _ => None,
        }
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Header value, matched case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(name).then_some(v.as_str()))
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    /// Turn a non-2xx answer into `FetchError::HttpError`, carrying the
    /// server's `message` when it sent one and the raw text otherwise.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }
        let message = self
            .message()
            .or_else(|| self.text().ok().filter(|text| !text.trim().is_empty()))
            .unwrap_or_else(|| format!("status {}", self.status));
        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}
