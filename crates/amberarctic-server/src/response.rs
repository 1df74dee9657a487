//! JSON response shaping.
//!
//! Small helpers for building `application/json` responses and rendering
//! [`ApiError`] values as their envelope with the mapped status code.

use bytes::Bytes;
use http::{Response, StatusCode};
use http_body_util::Full;
use serde::Serialize;

use amberarctic_core::{ApiError, ApiResult};
use amberarctic_store::bson::Document;

/// Type alias for the HTTP response body.
pub type ResponseBody = Full<Bytes>;

/// Type alias for the HTTP response.
pub type HttpResponse = Response<ResponseBody>;

/// Builds a JSON response with the given status.
pub(crate) fn json_response<T: Serialize>(status: StatusCode, value: &T) -> HttpResponse {
    let body = serde_json::to_string(value)
        .unwrap_or_else(|_| r#"{"error":{"code":"SERIALIZATION_ERROR"}}"#.to_string());

    Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .body(Full::new(Bytes::from(body)))
        .unwrap_or_else(|_| Response::new(Full::new(Bytes::new())))
}

/// Renders an [`ApiError`] as its JSON envelope with the mapped status.
pub(crate) fn error_response(error: &ApiError) -> HttpResponse {
    json_response(error.status_code(), &error.to_envelope())
}

/// Converts a BSON document into a JSON value for the response body.
pub(crate) fn doc_to_value(document: Document) -> ApiResult<serde_json::Value> {
    serde_json::to_value(document)
        .map_err(|e| ApiError::storage(format!("failed to render document: {e}")))
}
