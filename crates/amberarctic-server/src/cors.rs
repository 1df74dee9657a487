//! CORS handling.
//!
//! The storefront API is consumed directly from browsers, so every
//! response carries permissive CORS headers: all origins, methods, and
//! headers are allowed. Preflight OPTIONS requests are answered with
//! 204 No Content before routing.

use bytes::Bytes;
use http::{HeaderValue, Method, Request, Response, StatusCode};
use http_body_util::Full;
use std::time::Duration;

/// CORS header names.
mod headers {
    pub const ALLOW_ORIGIN: &str = "access-control-allow-origin";
    pub const ALLOW_METHODS: &str = "access-control-allow-methods";
    pub const ALLOW_HEADERS: &str = "access-control-allow-headers";
    pub const MAX_AGE: &str = "access-control-max-age";
    pub const REQUEST_METHOD: &str = "access-control-request-method";
    pub const ORIGIN: &str = "origin";
}

/// Permissive CORS policy applied to every response.
#[derive(Debug, Clone)]
pub struct Cors {
    allowed_methods: Vec<Method>,
    max_age: Duration,
}

impl Cors {
    /// Creates the permissive policy: any origin, any header, all methods
    /// the API serves.
    #[must_use]
    pub fn permissive() -> Self {
        Self {
            allowed_methods: vec![Method::GET, Method::POST, Method::OPTIONS],
            max_age: Duration::from_secs(86400),
        }
    }

    /// Checks whether a request is a CORS preflight.
    pub fn is_preflight<B>(&self, request: &Request<B>) -> bool {
        request.method() == Method::OPTIONS
            && request.headers().contains_key(headers::ORIGIN)
            && request.headers().contains_key(headers::REQUEST_METHOD)
    }

    /// Answers a preflight request with 204 and permissive headers.
    pub fn preflight_response(&self) -> Response<Full<Bytes>> {
        let methods: Vec<&str> = self.allowed_methods.iter().map(Method::as_str).collect();

        Response::builder()
            .status(StatusCode::NO_CONTENT)
            .header(headers::ALLOW_ORIGIN, "*")
            .header(headers::ALLOW_METHODS, methods.join(", "))
            .header(headers::ALLOW_HEADERS, "*")
            .header(headers::MAX_AGE, self.max_age.as_secs().to_string())
            .body(Full::new(Bytes::new()))
            .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
    }

    /// Adds CORS headers to a non-preflight response.
    pub fn apply<B>(&self, response: &mut Response<B>) {
        response
            .headers_mut()
            .insert(headers::ALLOW_ORIGIN, HeaderValue::from_static("*"));
    }
}

impl Default for Cors {
    fn default() -> Self {
        Self::permissive()
    }
}
