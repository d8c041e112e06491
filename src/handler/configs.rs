//! Config document handlers
//!
//! List, fetch and store `.alloy` documents. Every failure is logged with its
//! cause and answered with a bare status code.

use crate::config::AppState;
use crate::http;
use crate::logger;
use http_body_util::{BodyExt, Full};
use hyper::body::{Body, Bytes};
use hyper::{Request, Response};
use std::fmt::Display;

/// Respond with the JSON array of every stored config ID
pub async fn list_configs(state: &AppState) -> Response<Full<Bytes>> {
    let ids = match state.store.list().await {
        Ok(ids) => ids,
        Err(e) => {
            logger::log_error(&format!("Failed to list configs: {e}"));
            return http::build_500_response();
        }
    };

    match serde_json::to_string(&ids) {
        Ok(json) => http::build_json_response(json),
        Err(e) => {
            logger::log_error(&format!("Failed to encode config list: {e}"));
            http::build_500_response()
        }
    }
}

/// GET/HEAD on a single config. HEAD stops after the existence check.
pub async fn get_config(state: &AppState, id: &str, is_head: bool) -> Response<Full<Bytes>> {
    if !state.store.exists(id).await {
        logger::log_debug(&format!("Config '{id}' not found"));
        return http::build_404_response();
    }

    if is_head {
        return http::build_config_head_response();
    }

    match state.store.read(id).await {
        Ok(content) => http::build_config_response(content),
        Err(e) => {
            logger::log_error(&format!("Failed to get config '{id}': {e}"));
            http::build_500_response()
        }
    }
}

/// Store the request body verbatim as the config's new content
pub async fn put_config<B>(req: Request<B>, state: &AppState, id: &str) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Display,
{
    let content = match req.into_body().collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(e) => {
            logger::log_error(&format!("Failed to read body for config '{id}': {e}"));
            return http::build_500_response();
        }
    };

    match state.store.write(id, &content).await {
        Ok(()) => {
            logger::log_debug(&format!("Stored config '{id}' ({} bytes)", content.len()));
            http::build_201_response()
        }
        Err(e) => {
            logger::log_error(&format!("Failed to put config '{id}': {e}"));
            http::build_500_response()
        }
    }
}
