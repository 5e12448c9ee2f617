//! Response data passed from the network layer to request processing.
//!
//! - [`HttpResponse`] / [`HttpResponseBuilder`] — the immutable response value
//!   and the builder that creates and copies it.
//! - [`Body`] — single-use body stream shared by a response and its copies.
//! - [`BodyConfig`] — limits used when buffering a body into memory.
//!
//! Conversions to and from `http::Response` live on [`HttpResponse`] as
//! `from_http` / `into_http`.

/// Single-use body stream
pub mod body;
/// Body buffering configuration
pub mod config;
/// The response value and its builder
pub mod response;

mod compat;

pub use body::Body;
pub use config::{BodyConfig, BodyConfigBuilder, BodyConfigError};
pub use response::{HttpResponse, HttpResponseBuilder, ResponseHead, UNKNOWN_SIZE};
