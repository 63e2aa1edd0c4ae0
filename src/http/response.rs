//! HTTP response builders
//!
//! Status-code-specific builders, decoupled from resolution logic. HEAD
//! requests get the same headers with an empty body.

use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;

use crate::http::range::ByteRange;
use crate::logger;

/// Build a 200 response carrying a resolved file
pub fn build_file_response(
    content: Vec<u8>,
    content_type: &str,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let content_length = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content)
    };

    Response::builder()
        .status(200)
        .header("Content-Type", content_type)
        .header("Content-Length", content_length)
        .header("Accept-Ranges", "bytes")
        .body(Full::new(body))
        .unwrap_or_else(|e| empty_response_on_build_error("200", &e))
}

/// Build a 206 Partial Content response for a slice of a file
pub fn build_partial_response(
    content: &[u8],
    content_type: &str,
    range: ByteRange,
    is_head: bool,
) -> Response<Full<Bytes>> {
    let total_size = content.len();
    let body = if is_head {
        Bytes::new()
    } else {
        Bytes::from(content[range.start..=range.end].to_vec())
    };

    Response::builder()
        .status(206)
        .header("Content-Type", content_type)
        .header("Content-Length", range.content_length())
        .header(
            "Content-Range",
            format!("bytes {}-{}/{}", range.start, range.end, total_size),
        )
        .header("Accept-Ranges", "bytes")
        .body(Full::new(body))
        .unwrap_or_else(|e| empty_response_on_build_error("206", &e))
}

/// Build a 416 Range Not Satisfiable response
pub fn build_unsatisfiable_response(file_size: usize) -> Response<Full<Bytes>> {
    Response::builder()
        .status(416)
        .header("Content-Type", "text/plain")
        .header("Content-Range", format!("bytes */{file_size}"))
        .body(Full::new(Bytes::from("416 Range Not Satisfiable")))
        .unwrap_or_else(|e| empty_response_on_build_error("416", &e))
}

/// Build a 500 Internal Server Error response
pub fn build_server_error_response() -> Response<Full<Bytes>> {
    Response::builder()
        .status(500)
        .header("Content-Type", "text/plain")
        .body(Full::new(Bytes::from("500 Internal Server Error")))
        .unwrap_or_else(|e| empty_response_on_build_error("500", &e))
}

// Only reachable if a builder above is handed an invalid header value,
// which would be a programming error, not a request-dependent one.
fn empty_response_on_build_error(status: &str, error: &hyper::http::Error) -> Response<Full<Bytes>> {
    logger::log_error(&format!("Failed to build {status} response: {error}"));
    Response::new(Full::new(Bytes::new()))
}
