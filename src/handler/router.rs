//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: matches the path to a route,
//! validates the method and dispatches to the config handlers.

use crate::config::AppState;
use crate::handler::configs;
use crate::http;
use crate::logger;
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;

pub const HEALTH_PATH: &str = "/health";
pub const CONFIGS_PATH: &str = "/api/v1/configs";

/// `["", "api", "v1", "configs", id]`
const ID_SEGMENT: usize = 4;

const LIST_ALLOW: &str = "GET";
const CONFIG_ALLOW: &str = "GET, HEAD, POST";

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body,
    B::Error: Display,
{
    let path = req.uri().path().to_string();
    Ok(route_request(req, &path, &state).await)
}

async fn route_request<B>(req: Request<B>, path: &str, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Display,
{
    if path == HEALTH_PATH {
        return http::build_health_response();
    }

    if path == CONFIGS_PATH {
        if req.method() != Method::GET {
            logger::log_warning(&format!("Method not allowed on {path}: {}", req.method()));
            return http::build_405_response(LIST_ALLOW);
        }
        return configs::list_configs(state).await;
    }

    if path
        .strip_prefix(CONFIGS_PATH)
        .is_some_and(|rest| rest.starts_with('/'))
    {
        return dispatch_config(req, path, state).await;
    }

    logger::log_debug(&format!("No route for {path}"));
    http::build_404_response()
}

/// Dispatch a request on `/api/v1/configs/{id}`
async fn dispatch_config<B>(req: Request<B>, path: &str, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body,
    B::Error: Display,
{
    let method = req.method().clone();
    if !matches!(method, Method::GET | Method::HEAD | Method::POST) {
        logger::log_warning(&format!("Method not allowed on {path}: {method}"));
        return http::build_405_response(CONFIG_ALLOW);
    }

    let Some(segment) = config_id(path) else {
        logger::log_warning(&format!("Malformed config path: {path}"));
        return http::build_400_response();
    };

    let id = match decode_id(segment) {
        Ok(id) => id,
        Err(e) => {
            logger::log_warning(&format!("Undecodable config ID in {path}: {e}"));
            return http::build_400_response();
        }
    };

    if method == Method::POST {
        configs::put_config(req, state, &id).await
    } else {
        configs::get_config(state, &id, method == Method::HEAD).await
    }
}

/// The raw path segment following `/api/v1/configs/`. An empty segment is a
/// valid (empty) ID; deeper segments are ignored.
fn config_id(path: &str) -> Option<&str> {
    path.split('/').nth(ID_SEGMENT)
}

/// Percent-decode an ID segment. A decoded `/` ends the ID, matching a
/// split of the decoded path.
fn decode_id(segment: &str) -> Result<String, std::string::FromUtf8Error> {
    let decoded = urlencoding::decode(segment)?;
    Ok(match decoded.split_once('/') {
        Some((id, _)) => id.to_string(),
        None => decoded.into_owned(),
    })
}
