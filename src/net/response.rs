//! HTTP response value.
//!
//! [`HttpResponse`] is what the network layer hands to request processing
//! code: status code, reason phrase, content type, declared content length,
//! headers and the body stream. Once built it cannot be changed. To derive a
//! modified copy, turn it back into a builder with
//! [`HttpResponse::new_builder`], change what you need and build again. The
//! original stays untouched.
//!
//! ## Notes
//! - Header names are **case-sensitive** here. `"Content-Type"` and
//!   `"content-type"` are two different keys.
//! - `total_size` uses `-1` ([`UNKNOWN_SIZE`]) when the length of the body is
//!   not known. [`HttpResponse::content_length`] gives an `Option` view.
//! - No value is validated. A status of `0` or `9999` is stored as-is; that
//!   kind of checking belongs to whoever produced the response.
//!
//! ```rust
//! use gosub_net::net::{Body, HttpResponse};
//!
//! let resp = HttpResponse::builder()
//!     .status_code(200)
//!     .reason_phrase("OK")
//!     .content_type("text/plain")
//!     .add_header("X-Request-Id", "42")
//!     .body(Body::from_bytes("hello"))
//!     .total_size(5)
//!     .build();
//!
//! assert_eq!(resp.header("X-Request-Id"), Some("42"));
//! assert_eq!(resp.header("x-request-id"), None);
//!
//! let retried = resp.new_builder().status_code(503).build();
//! assert_eq!(resp.status_code(), 200);
//! assert_eq!(retried.status_code(), 503);
//! ```
use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::net::body::Body;

/// Sentinel for a body whose size is not known.
pub const UNKNOWN_SIZE: i64 = -1;

fn unknown_size() -> i64 {
    UNKNOWN_SIZE
}

/// Everything in a response except the body stream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseHead {
    /// Numeric status code as received (e.g. `200`, `404`).
    pub status_code: i32,
    /// Declared body length in bytes, or [`UNKNOWN_SIZE`].
    #[serde(default = "unknown_size")]
    pub total_size: i64,
    /// Reason phrase (e.g. `"OK"`, `"Not Found"`).
    #[serde(default)]
    pub reason_phrase: Option<String>,
    /// Value of the content type, kept separately from `headers`.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Header name to value, case-sensitive.
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

impl Default for ResponseHead {
    fn default() -> Self {
        Self {
            status_code: 0,
            total_size: UNKNOWN_SIZE,
            reason_phrase: None,
            content_type: None,
            headers: HashMap::new(),
        }
    }
}

/// Immutable HTTP response.
///
/// Cloning (or copying through a builder) shares the body stream with the
/// original; only one of them will ever get to read it.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    head: ResponseHead,
    content: Option<Body>,
}

impl HttpResponse {
    pub fn builder() -> HttpResponseBuilder {
        HttpResponseBuilder::new()
    }

    /// Returns a builder seeded with every field of this response.
    pub fn new_builder(&self) -> HttpResponseBuilder {
        HttpResponseBuilder::from_response(self)
    }

    pub fn status_code(&self) -> i32 {
        self.head.status_code
    }

    /// The body stream, if any. Call [`Body::take`] to consume it. The stream
    /// can only be read once and can't be rewound.
    pub fn content(&self) -> Option<&Body> {
        self.content.as_ref()
    }

    /// Declared size of the body, `-1` if unknown.
    pub fn total_size(&self) -> i64 {
        self.head.total_size
    }

    /// Declared size of the body, `None` if unknown (any negative value).
    pub fn content_length(&self) -> Option<u64> {
        u64::try_from(self.head.total_size).ok()
    }

    pub fn reason_phrase(&self) -> Option<&str> {
        self.head.reason_phrase.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.head.content_type.as_deref()
    }

    /// Looks up a header by its exact name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.head.headers.get(name).map(String::as_str)
    }

    pub fn all_headers(&self) -> &HashMap<String, String> {
        &self.head.headers
    }

    pub fn head(&self) -> &ResponseHead {
        &self.head
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.head.status_code)
    }

    /// Splits the response, handing the body handle to the caller.
    pub fn into_parts(self) -> (ResponseHead, Option<Body>) {
        (self.head, self.content)
    }

    pub fn into_body(self) -> Option<Body> {
        self.content
    }
}

/// Builder for [`HttpResponse`].
///
/// Every setter accepts any value; [`build`](HttpResponseBuilder::build)
/// never fails and can be called repeatedly. Each built response gets its own
/// copy of the headers, so changing the builder afterwards does not affect
/// responses already built.
#[derive(Debug, Clone, Default)]
pub struct HttpResponseBuilder {
    head: ResponseHead,
    content: Option<Body>,
}

impl HttpResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes a builder whose values come from `response`. The headers are
    /// copied; the body handle is shared with `response`.
    pub fn from_response(response: &HttpResponse) -> Self {
        Self {
            head: response.head.clone(),
            content: response.content.clone(),
        }
    }

    /// Starts from an existing head without a body.
    pub fn from_head(head: ResponseHead) -> Self {
        Self { head, content: None }
    }

    #[inline]
    fn map(mut self, f: impl FnOnce(&mut ResponseHead)) -> Self {
        f(&mut self.head);
        self
    }

    pub fn status_code(self, code: i32) -> Self { self.map(|h| h.status_code = code) }
    pub fn total_size(self, size: i64) -> Self { self.map(|h| h.total_size = size) }
    pub fn reason_phrase<S: Into<String>>(self, text: S) -> Self { self.map(|h| h.reason_phrase = Some(text.into())) }
    pub fn content_type<S: Into<String>>(self, ct: S) -> Self { self.map(|h| h.content_type = Some(ct.into())) }

    /// Replaces all headers with the given entries.
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map(|h| h.headers = headers.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }

    /// Merges the given entries into the current headers, overwriting on collision.
    pub fn add_headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.map(|h| h.headers.extend(headers.into_iter().map(|(k, v)| (k.into(), v.into()))))
    }

    pub fn add_header<K: Into<String>, V: Into<String>>(self, key: K, value: V) -> Self {
        self.map(|h| {
            h.headers.insert(key.into(), value.into());
        })
    }

    /// Apply multiple changes in one go.
    pub fn with(self, f: impl FnOnce(&mut ResponseHead)) -> Self { self.map(f) }

    /// Sets the body from a reader.
    pub fn content<R>(self, reader: R) -> Self
    where
        R: std::io::Read + Send + 'static,
    {
        self.body(Body::new(reader))
    }

    /// Sets the body handle. A previously set body is released, not read.
    pub fn body(mut self, body: Body) -> Self {
        if let Some(prev) = &self.content {
            if !prev.is_consumed() && !Body::ptr_eq(prev, &body) {
                log::debug!("HttpResponseBuilder: replacing an unread body");
            }
        }
        self.content = Some(body);
        self
    }

    /// Removes the body handle from the builder.
    pub fn no_body(mut self) -> Self {
        self.content = None;
        self
    }

    /// Snapshots the current state into a new response.
    pub fn build(&self) -> HttpResponse {
        log::trace!(
            "HttpResponseBuilder: building response status={} headers={}",
            self.head.status_code,
            self.head.headers.len()
        );

        HttpResponse {
            head: self.head.clone(),
            content: self.content.clone(),
        }
    }
}
