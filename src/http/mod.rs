//! HTTP protocol layer module
//!
//! Protocol-level helpers shared by the resolver and the fallback router:
//! MIME lookup, Range header parsing, and response builders.

pub mod mime;
pub mod range;
pub mod response;

pub use range::parse_range;
pub use response::{
    build_file_response, build_partial_response, build_server_error_response,
    build_unsatisfiable_response,
};
