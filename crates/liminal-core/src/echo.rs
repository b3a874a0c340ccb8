//! Response body data model
//!
//! The wire schema is fixed:
//! `{status, name, message, timestamp, request: {method, url, headers, body}}`
//! with the body's `status` always equal to the HTTP status line code.

use std::collections::BTreeMap;

use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::status::StatusEntry;

/// Per-request projection of the inbound request, echoed back verbatim.
///
/// Nothing here outlives the request. Repeated header names are flattened
/// into one comma-separated value; a missing or unparseable JSON body is
/// echoed as an empty object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestEcho {
    pub method: String,
    pub url: String,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default = "RequestEcho::empty_body")]
    pub body: serde_json::Value,
}

impl RequestEcho {
    /// The empty-object body used when no JSON body was supplied.
    pub fn empty_body() -> serde_json::Value {
        serde_json::Value::Object(serde_json::Map::new())
    }
}

/// The response body sent for every non-preflight request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LiminalResponse {
    pub status: u16,
    pub name: String,
    pub message: String,
    /// ISO-8601 UTC with millisecond precision and a `Z` suffix.
    pub timestamp: String,
    pub request: RequestEcho,
}

impl LiminalResponse {
    /// Build the body for a sampled entry, stamped with the current time.
    pub fn new(entry: &StatusEntry, request: RequestEcho) -> Self {
        Self {
            status: entry.code,
            name: entry.name.to_string(),
            message: entry.message.to_string(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            request,
        }
    }
}
