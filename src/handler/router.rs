//! Request dispatch
//!
//! Entry point for every HTTP request, any method and any path: try the
//! static resolver first, then hand anything unresolved to the SPA
//! fallback.

use std::convert::Infallible;
use std::sync::Arc;

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response};

use crate::config::AppState;
use crate::handler::static_files::{self, Resolution};
use crate::http::range::{parse_range, RangeOutcome};
use crate::http::response;
use crate::logger;

/// Main entry point for HTTP request handling
pub async fn handle_request(
    req: Request<hyper::body::Incoming>,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let is_head = *req.method() == Method::HEAD;
    let range_header = req
        .headers()
        .get("range")
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    Ok(respond(&state, req.uri().path(), range_header.as_deref(), is_head).await)
}

/// Stage 1: static resolver. Stage 2: unconditional SPA fallback.
pub async fn respond(
    state: &AppState,
    path: &str,
    range_header: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match static_files::resolve(state, path).await {
        Resolution::Found {
            content,
            content_type,
        } => serve_content(content, content_type, range_header, is_head),
        Resolution::Missing => serve_fallback(state, is_head).await,
        Resolution::Failed(_) => response::build_server_error_response(),
    }
}

/// Serve resolved file content, honoring a Range header when present
fn serve_content(
    content: Vec<u8>,
    content_type: &'static str,
    range_header: Option<&str>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match parse_range(range_header, content.len()) {
        RangeOutcome::Partial(range) => {
            response::build_partial_response(&content, content_type, range, is_head)
        }
        RangeOutcome::Unsatisfiable => response::build_unsatisfiable_response(content.len()),
        RangeOutcome::Full => response::build_file_response(content, content_type, is_head),
    }
}

/// Serve the entry document for any request the resolver left unresolved
async fn serve_fallback(state: &AppState, is_head: bool) -> Response<Full<Bytes>> {
    match static_files::read_index(state).await {
        Ok(content) => {
            response::build_file_response(content, "text/html; charset=utf-8", is_head)
        }
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read entry document '{}': {e}",
                state.index_file().display()
            ));
            response::build_server_error_response()
        }
    }
}
