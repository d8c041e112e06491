//! HTTP response building module
//!
//! Builders for every response the config API produces. Error responses carry
//! no body: the status code is the whole answer, causes stay in the server log.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::header::{ALLOW, CONTENT_TYPE, ETAG};
use hyper::{Response, StatusCode};

/// Media type of stored config documents
pub const CONFIG_CONTENT_TYPE: &str = "application/river";

/// Placeholder entity tag sent on HEAD, not derived from content
pub const CONFIG_ETAG: &str = "\"1\"";

/// Build 200 health check response
pub fn build_health_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "text/plain; charset=utf-8")
        .body(Full::new(Bytes::from_static(b"OK")))
        .unwrap_or_else(|e| {
            log_build_error("health", &e);
            Response::new(Full::new(Bytes::from_static(b"OK")))
        })
}

/// Build 200 JSON response
pub fn build_json_response(json: String) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(json)))
        .unwrap_or_else(|e| {
            log_build_error("JSON", &e);
            build_500_response()
        })
}

/// Build 200 response carrying a config document
pub fn build_config_response(content: Vec<u8>) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, CONFIG_CONTENT_TYPE)
        .body(Full::new(Bytes::from(content)))
        .unwrap_or_else(|e| {
            log_build_error("config", &e);
            build_500_response()
        })
}

/// Build 200 HEAD response for an existing config, headers only
pub fn build_config_head_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::OK)
        .header(CONTENT_TYPE, CONFIG_CONTENT_TYPE)
        .header(ETAG, CONFIG_ETAG)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("HEAD", &e);
            build_500_response()
        })
}

/// Build 201 Created response
pub fn build_201_response() -> Response<Full<Bytes>> {
    build_empty_response(StatusCode::CREATED)
}

/// Build 400 Bad Request response
pub fn build_400_response() -> Response<Full<Bytes>> {
    build_empty_response(StatusCode::BAD_REQUEST)
}

/// Build 404 Not Found response
pub fn build_404_response() -> Response<Full<Bytes>> {
    build_empty_response(StatusCode::NOT_FOUND)
}

/// Build 405 Method Not Allowed response advertising the permitted methods
pub fn build_405_response(allow: &'static str) -> Response<Full<Bytes>> {
    Response::builder()
        .status(StatusCode::METHOD_NOT_ALLOWED)
        .header(ALLOW, allow)
        .body(Full::new(Bytes::new()))
        .unwrap_or_else(|e| {
            log_build_error("405", &e);
            build_empty_response(StatusCode::METHOD_NOT_ALLOWED)
        })
}

/// Build 500 Internal Server Error response
pub fn build_500_response() -> Response<Full<Bytes>> {
    build_empty_response(StatusCode::INTERNAL_SERVER_ERROR)
}

fn build_empty_response(status: StatusCode) -> Response<Full<Bytes>> {
    let mut resp = Response::new(Full::new(Bytes::new()));
    *resp.status_mut() = status;
    resp
}

/// Log response build error
fn log_build_error(kind: &str, error: &hyper::http::Error) {
    crate::logger::log_error(&format!("Failed to build {kind} response: {error}"));
}
