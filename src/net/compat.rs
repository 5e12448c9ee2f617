//! Conversions between [`HttpResponse`] and [`http::Response`].
//!
//! Transports built on the `http` crate can hand their responses over with
//! [`HttpResponse::from_http`], and consumers that want `http` types back can
//! use [`HttpResponse::into_http`].
//!
//! `http::HeaderMap` lowercases header names and allows repeated headers. On
//! the way in, names keep the lowercase form and the last value of a repeated
//! header wins. Header values are decoded as UTF-8, with invalid bytes
//! replaced by U+FFFD. The same decoding feeds both `content_type()` and the
//! `content-type` entry in the headers, so the two always agree.
//!
//! On the way out, names that differ only by case (`"X-A"` and `"x-a"`) map to
//! one `http` header name. Each of them is appended, ordered by the original
//! name, so no value is lost and the order does not depend on map iteration.
use std::io::Read;

use http::header::{HeaderName, HeaderValue, CONTENT_LENGTH, CONTENT_TYPE};
use http::{HeaderMap, StatusCode};

use crate::errors::NetError;
use crate::net::body::Body;
use crate::net::response::{HttpResponse, UNKNOWN_SIZE};

fn value_string(value: &HeaderValue) -> String {
    String::from_utf8_lossy(value.as_bytes()).into_owned()
}

fn header_string(headers: &HeaderMap, name: HeaderName) -> Option<String> {
    headers.get(name).map(value_string)
}

impl HttpResponse {
    /// Builds a response from an `http::Response` whose body is a reader.
    pub fn from_http<R>(response: http::Response<R>) -> Self
    where
        R: Read + Send + 'static,
    {
        let (parts, body) = response.into_parts();

        let mut builder = HttpResponse::builder().status_code(i32::from(parts.status.as_u16()));
        if let Some(reason) = parts.status.canonical_reason() {
            builder = builder.reason_phrase(reason);
        }
        if let Some(ct) = header_string(&parts.headers, CONTENT_TYPE) {
            builder = builder.content_type(ct);
        }

        let total_size = header_string(&parts.headers, CONTENT_LENGTH)
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|n| *n >= 0)
            .unwrap_or(UNKNOWN_SIZE);

        // Collect all the headers we've received
        let headers = parts
            .headers
            .iter()
            .map(|(k, v)| (k.as_str(), value_string(v)));

        builder
            .add_headers(headers)
            .total_size(total_size)
            .content(body)
            .build()
    }

    /// Converts into an `http::Response`. The content type and declared size
    /// are emitted as headers unless a header of that name already exists.
    /// A response without body gets an empty one.
    pub fn into_http(self) -> Result<http::Response<Body>, NetError> {
        let status = u16::try_from(self.status_code())
            .ok()
            .and_then(|code| StatusCode::from_u16(code).ok())
            .ok_or(NetError::InvalidStatus(self.status_code()))?;

        let mut entries: Vec<(&String, &String)> = self.all_headers().iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let mut headers = HeaderMap::with_capacity(entries.len() + 2);
        for (name, value) in entries {
            let header_name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| NetError::InvalidHeader(name.clone()))?;
            let header_value = HeaderValue::from_str(value)
                .map_err(|_| NetError::InvalidHeader(name.clone()))?;
            headers.append(header_name, header_value);
        }

        if let Some(ct) = self.content_type() {
            if !headers.contains_key(CONTENT_TYPE) {
                let value = HeaderValue::from_str(ct)
                    .map_err(|_| NetError::InvalidHeader(CONTENT_TYPE.to_string()))?;
                headers.insert(CONTENT_TYPE, value);
            }
        }
        if let Some(len) = self.content_length() {
            if !headers.contains_key(CONTENT_LENGTH) {
                headers.insert(CONTENT_LENGTH, HeaderValue::from(len));
            }
        }

        let body = self.into_body().unwrap_or_else(Body::empty);
        let mut response = http::Response::new(body);
        *response.status_mut() = status;
        *response.headers_mut() = headers;
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::net::config::BodyConfig;
    use std::io::Cursor;

    #[test]
    fn from_http_copies_everything() {
        let response = http::Response::builder()
            .status(StatusCode::NOT_FOUND)
            .header(CONTENT_TYPE, "application/json")
            .header(CONTENT_LENGTH, "2")
            .header("x-parse-request-id", "abc")
            .body(Cursor::new(b"{}".to_vec()))
            .unwrap();

        let resp = HttpResponse::from_http(response);
        assert_eq!(resp.status_code(), 404);
        assert_eq!(resp.reason_phrase(), Some("Not Found"));
        assert_eq!(resp.content_type(), Some("application/json"));
        assert_eq!(resp.total_size(), 2);
        assert_eq!(resp.header("x-parse-request-id"), Some("abc"));
        assert_eq!(resp.header("content-type"), Some("application/json"));

        let bytes = resp.content().unwrap().read_to_end(&BodyConfig::default()).unwrap();
        assert_eq!(bytes, b"{}");
    }

    #[test]
    fn from_http_without_length_is_unknown() {
        let response = http::Response::builder()
            .status(StatusCode::from_u16(299).unwrap())
            .header(CONTENT_LENGTH, "not-a-number")
            .body(std::io::empty())
            .unwrap();

        let resp = HttpResponse::from_http(response);
        assert_eq!(resp.status_code(), 299);
        assert_eq!(resp.reason_phrase(), None);
        assert_eq!(resp.total_size(), UNKNOWN_SIZE);
        assert!(resp.content_type().is_none());
    }

    #[test]
    fn from_http_repeated_header_keeps_last() {
        let response = http::Response::builder()
            .header("set-cookie", "a=1")
            .header("set-cookie", "b=2")
            .body(std::io::empty())
            .unwrap();

        let resp = HttpResponse::from_http(response);
        assert_eq!(resp.header("set-cookie"), Some("b=2"));
    }

    #[test]
    fn into_http_emits_content_headers() {
        let resp = HttpResponse::builder()
            .status_code(200)
            .content_type("text/plain")
            .total_size(5)
            .add_header("X-Custom", "1")
            .body(Body::from_bytes("hello"))
            .build();

        let out = resp.into_http().unwrap();
        assert_eq!(out.status(), StatusCode::OK);
        assert_eq!(out.headers()[CONTENT_TYPE], "text/plain");
        assert_eq!(out.headers()[CONTENT_LENGTH], "5");
        assert_eq!(out.headers()["x-custom"], "1");

        let bytes = out.body().read_to_end(&BodyConfig::default()).unwrap();
        assert_eq!(bytes, b"hello");
    }

    #[test]
    fn into_http_prefers_explicit_headers() {
        let resp = HttpResponse::builder()
            .status_code(200)
            .content_type("text/plain")
            .add_header("Content-Type", "text/html")
            .build();

        let out = resp.into_http().unwrap();
        assert_eq!(out.headers()[CONTENT_TYPE], "text/html");
        assert!(out.headers().get(CONTENT_LENGTH).is_none());
        assert!(out.body().read_to_end(&BodyConfig::default()).unwrap().is_empty());
    }

    #[test]
    fn into_http_rejects_unrepresentable_values() {
        match HttpResponse::builder().build().into_http() {
            Err(NetError::InvalidStatus(0)) => {}
            other => panic!("expected InvalidStatus, got {other:?}"),
        }

        let bad_name = HttpResponse::builder().status_code(200).add_header("Bad Name", "x").build();
        match bad_name.into_http() {
            Err(NetError::InvalidHeader(name)) => assert_eq!(name, "Bad Name"),
            other => panic!("expected InvalidHeader, got {other:?}"),
        }
    }

    #[test]
    fn from_http_decodes_non_ascii_values_once() {
        let ct = HeaderValue::from_bytes("text/plain; name=\u{e9}t\u{e9}".as_bytes()).unwrap();
        let response = http::Response::builder()
            .header(CONTENT_TYPE, ct)
            .body(std::io::empty())
            .unwrap();

        let resp = HttpResponse::from_http(response);
        assert_eq!(resp.content_type(), Some("text/plain; name=\u{e9}t\u{e9}"));
        assert_eq!(resp.header("content-type"), resp.content_type());
    }

    #[test]
    fn into_http_keeps_names_differing_only_by_case() {
        for _ in 0..32 {
            let resp = HttpResponse::builder()
                .status_code(200)
                .add_header("X-A", "upper")
                .add_header("x-a", "lower")
                .build();

            let out = resp.into_http().unwrap();
            let values: Vec<&str> = out
                .headers()
                .get_all("x-a")
                .iter()
                .map(|v| v.to_str().unwrap())
                .collect();
            assert_eq!(values, vec!["upper", "lower"]);
        }
    }

    #[test]
    fn round_trip_through_http_keeps_body_handle() {
        let body = Body::from_bytes("data");
        let resp = HttpResponse::builder().status_code(201).body(body.clone()).build();
        let out = resp.into_http().unwrap();
        assert!(Body::ptr_eq(out.body(), &body));
    }
}
