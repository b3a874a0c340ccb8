//! Static status tables
//!
//! Two variants exist and are not compatible:
//! - [`TableVariant::Canonical`]: the full canonical HTTP status set across
//!   all five classes, with real names and descriptive messages.
//! - [`TableVariant::Liminal`]: client-error and server-error classes only,
//!   including a handful of fictional codes, with messages drawn from the
//!   verse pool by entry index modulo the pool length.
//!
//! A table is built once at startup and never mutated afterwards, so it is
//! safe for unsynchronized concurrent reads.

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::verses::VERSES;

/// One row of the status table: code, reason name and message body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusEntry {
    pub code: u16,
    pub name: &'static str,
    pub message: &'static str,
}

/// Which status table the responder samples from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableVariant {
    /// Full canonical set, informational through server error.
    Canonical,
    /// 4xx/5xx only, fictional codes included, verse-pool messages.
    Liminal,
}

impl FromStr for TableVariant {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "canonical" => Ok(TableVariant::Canonical),
            "liminal" => Ok(TableVariant::Liminal),
            other => Err(CoreError::UnknownVariant(other.to_string())),
        }
    }
}

impl fmt::Display for TableVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableVariant::Canonical => write!(f, "canonical"),
            TableVariant::Liminal => write!(f, "liminal"),
        }
    }
}

// Informational responses (100-199)
const INFORMATIONAL: &[StatusEntry] = &[
    StatusEntry { code: 100, name: "Continue", message: "The initial part of the request has been received and the client should continue with the request." },
    StatusEntry { code: 101, name: "Switching Protocols", message: "The server is switching protocols as requested by the client." },
    StatusEntry { code: 102, name: "Processing", message: "The server has received and is processing the request, but no response is available yet." },
    StatusEntry { code: 103, name: "Early Hints", message: "Used to return some response headers before final HTTP message." },
];

// Successful responses (200-299)
const SUCCESS: &[StatusEntry] = &[
    StatusEntry { code: 200, name: "OK", message: "The request has succeeded." },
    StatusEntry { code: 201, name: "Created", message: "The request has been fulfilled and a new resource has been created." },
    StatusEntry { code: 202, name: "Accepted", message: "The request has been accepted for processing, but the processing has not been completed." },
    StatusEntry { code: 203, name: "Non-Authoritative Information", message: "The returned metadata is not exactly the same as is available from the origin server." },
    StatusEntry { code: 204, name: "No Content", message: "The server successfully processed the request, but is not returning any content." },
    StatusEntry { code: 205, name: "Reset Content", message: "The server successfully processed the request, but is not returning any content. The client should reset the document view." },
    StatusEntry { code: 206, name: "Partial Content", message: "The server is delivering only part of the resource due to a range header sent by the client." },
    StatusEntry { code: 207, name: "Multi-Status", message: "The message body that follows is an XML message and can contain a number of separate response codes." },
    StatusEntry { code: 208, name: "Already Reported", message: "The members of a DAV binding have already been enumerated in a preceding part of the (multistatus) response." },
    StatusEntry { code: 226, name: "IM Used", message: "The server has fulfilled a request for the resource, and the response is a representation of the result of one or more instance-manipulations applied to the current instance." },
];

// Redirection messages (300-399)
const REDIRECTION: &[StatusEntry] = &[
    StatusEntry { code: 300, name: "Multiple Choices", message: "The request has more than one possible response." },
    StatusEntry { code: 301, name: "Moved Permanently", message: "The URL of the requested resource has been changed permanently." },
    StatusEntry { code: 302, name: "Found", message: "The URI of requested resource has been changed temporarily." },
    StatusEntry { code: 303, name: "See Other", message: "The server sent this response to direct the client to get the requested resource at another URI with a GET request." },
    StatusEntry { code: 304, name: "Not Modified", message: "This is used for caching purposes. It tells the client that the response has not been modified." },
    StatusEntry { code: 305, name: "Use Proxy", message: "The requested resource is only available through a proxy, the address for which is provided in the response." },
    StatusEntry { code: 307, name: "Temporary Redirect", message: "The server is sending this response to direct the client to get the requested resource at another URI with the same method that was used in the prior request." },
    StatusEntry { code: 308, name: "Permanent Redirect", message: "This means that the resource is now permanently located at another URI." },
];

// Client error responses (400-499)
const CLIENT_ERROR: &[StatusEntry] = &[
    StatusEntry { code: 400, name: "Bad Request", message: "The server could not understand the request due to invalid syntax." },
    StatusEntry { code: 401, name: "Unauthorized", message: "Authentication is required and has failed or has not yet been provided." },
    StatusEntry { code: 402, name: "Payment Required", message: "Reserved for future use." },
    StatusEntry { code: 403, name: "Forbidden", message: "The client does not have access rights to the content." },
    StatusEntry { code: 404, name: "Not Found", message: "The server can not find the requested resource." },
    StatusEntry { code: 405, name: "Method Not Allowed", message: "The request method is known by the server but is not supported by the target resource." },
    StatusEntry { code: 406, name: "Not Acceptable", message: "The server cannot produce a response matching the list of acceptable values." },
    StatusEntry { code: 407, name: "Proxy Authentication Required", message: "Authentication with the proxy is required." },
    StatusEntry { code: 408, name: "Request Timeout", message: "The server timed out waiting for the request." },
    StatusEntry { code: 409, name: "Conflict", message: "The request could not be completed due to a conflict with the current state of the resource." },
    StatusEntry { code: 410, name: "Gone", message: "The requested resource is no longer available at the server and no forwarding address is known." },
    StatusEntry { code: 411, name: "Length Required", message: "The server refuses to accept the request without a defined Content-Length." },
    StatusEntry { code: 412, name: "Precondition Failed", message: "The client has indicated preconditions in its headers which the server does not meet." },
    StatusEntry { code: 413, name: "Payload Too Large", message: "The request entity is larger than limits defined by server." },
    StatusEntry { code: 414, name: "URI Too Long", message: "The URI requested by the client is longer than the server is willing to interpret." },
    StatusEntry { code: 415, name: "Unsupported Media Type", message: "The media format of the requested data is not supported by the server." },
    StatusEntry { code: 416, name: "Range Not Satisfiable", message: "The range specified by the Range header field in the request cannot be fulfilled." },
    StatusEntry { code: 417, name: "Expectation Failed", message: "The expectation indicated by the Expect request header field cannot be met by the server." },
    StatusEntry { code: 418, name: "I'm a teapot", message: "The server refuses the attempt to brew coffee with a teapot." },
    StatusEntry { code: 421, name: "Misdirected Request", message: "The request was directed at a server that is not able to produce a response." },
    StatusEntry { code: 422, name: "Unprocessable Entity", message: "The request was well-formed but was unable to be followed due to semantic errors." },
    StatusEntry { code: 423, name: "Locked", message: "The resource that is being accessed is locked." },
    StatusEntry { code: 424, name: "Failed Dependency", message: "The request failed due to failure of a previous request." },
    StatusEntry { code: 425, name: "Too Early", message: "The server is unwilling to risk processing a request that might be replayed." },
    StatusEntry { code: 426, name: "Upgrade Required", message: "The server refuses to perform the request using the current protocol." },
    StatusEntry { code: 428, name: "Precondition Required", message: "The origin server requires the request to be conditional." },
    StatusEntry { code: 429, name: "Too Many Requests", message: "The user has sent too many requests in a given amount of time." },
    StatusEntry { code: 431, name: "Request Header Fields Too Large", message: "The server is unwilling to process the request because its header fields are too large." },
    StatusEntry { code: 451, name: "Unavailable For Legal Reasons", message: "The user requested a resource that is legally unavailable." },
];

// Server error responses (500-599)
const SERVER_ERROR: &[StatusEntry] = &[
    StatusEntry { code: 500, name: "Internal Server Error", message: "The server has encountered a situation it doesn't know how to handle." },
    StatusEntry { code: 501, name: "Not Implemented", message: "The request method is not supported by the server and cannot be handled." },
    StatusEntry { code: 502, name: "Bad Gateway", message: "The server, while working as a gateway, got an invalid response from the upstream server." },
    StatusEntry { code: 503, name: "Service Unavailable", message: "The server is not ready to handle the request." },
    StatusEntry { code: 504, name: "Gateway Timeout", message: "The server is acting as a gateway and cannot get a response in time." },
    StatusEntry { code: 505, name: "HTTP Version Not Supported", message: "The HTTP version used in the request is not supported by the server." },
    StatusEntry { code: 506, name: "Variant Also Negotiates", message: "Transparent content negotiation for the request results in a circular reference." },
    StatusEntry { code: 507, name: "Insufficient Storage", message: "The server is unable to store the representation needed to complete the request." },
    StatusEntry { code: 508, name: "Loop Detected", message: "The server detected an infinite loop while processing the request." },
    StatusEntry { code: 510, name: "Not Extended", message: "Further extensions to the request are required for the server to fulfill it." },
    StatusEntry { code: 511, name: "Network Authentication Required", message: "The client needs to authenticate to gain network access." },
];

// Liminal variant code lists. Messages come from the verse pool, so only
// code and name are fixed here. 452, 453, 512 and 513 are fictional.
const LIMINAL_CLIENT_ERROR: &[(u16, &str)] = &[
    (400, "Bad Request"),
    (401, "Unauthorized"),
    (402, "Payment Required"),
    (403, "Forbidden"),
    (404, "Not Found"),
    (405, "Method Not Allowed"),
    (406, "Not Acceptable"),
    (407, "Proxy Authentication Required"),
    (408, "Request Timeout"),
    (409, "Conflict"),
    (410, "Gone"),
    (411, "Length Required"),
    (412, "Precondition Failed"),
    (413, "Payload Too Large"),
    (414, "URI Too Long"),
    (415, "Unsupported Media Type"),
    (416, "Range Not Satisfiable"),
    (417, "Expectation Failed"),
    (418, "I'm a teapot"),
    (421, "Misdirected Request"),
    (422, "Unprocessable Entity"),
    (423, "Locked"),
    (424, "Failed Dependency"),
    (425, "Too Early"),
    (426, "Upgrade Required"),
    (428, "Precondition Required"),
    (429, "Too Many Requests"),
    (431, "Request Header Fields Too Large"),
    (451, "Unavailable For Legal Reasons"),
    (452, "Signal Echo"),
    (453, "Request Loop"),
];

const LIMINAL_SERVER_ERROR: &[(u16, &str)] = &[
    (500, "Internal Server Error"),
    (501, "Not Implemented"),
    (502, "Bad Gateway"),
    (503, "Service Unavailable"),
    (504, "Gateway Timeout"),
    (505, "HTTP Version Not Supported"),
    (506, "Variant Also Negotiates"),
    (507, "Insufficient Storage"),
    (508, "Loop Detected"),
    (510, "Not Extended"),
    (511, "Network Authentication Required"),
    (512, "Cache Overflow"),
    (513, "Socket Timeout"),
];

/// The flattened, read-only status table the responder samples from.
///
/// Conceptually partitioned by status class, but stored and sampled as one
/// ordered sequence. Never empty.
#[derive(Debug, Clone)]
pub struct StatusTable {
    variant: TableVariant,
    entries: Vec<StatusEntry>,
}

impl StatusTable {
    /// Build the flattened table for the given variant.
    pub fn new(variant: TableVariant) -> Self {
        let entries = match variant {
            TableVariant::Canonical => INFORMATIONAL
                .iter()
                .chain(SUCCESS)
                .chain(REDIRECTION)
                .chain(CLIENT_ERROR)
                .chain(SERVER_ERROR)
                .copied()
                .collect(),
            TableVariant::Liminal => LIMINAL_CLIENT_ERROR
                .iter()
                .chain(LIMINAL_SERVER_ERROR)
                .enumerate()
                .map(|(i, &(code, name))| StatusEntry {
                    code,
                    name,
                    // Verses wrap when the pool is shorter than the table.
                    message: VERSES[i % VERSES.len()],
                })
                .collect(),
        };

        Self { variant, entries }
    }

    pub fn variant(&self) -> TableVariant {
        self.variant
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[StatusEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&StatusEntry> {
        self.entries.get(index)
    }

    /// Whether the given code appears in this table.
    pub fn contains_code(&self, code: u16) -> bool {
        self.entries.iter().any(|e| e.code == code)
    }
}
