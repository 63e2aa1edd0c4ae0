//! Request handler module
//!
//! Two-stage pipeline: the static file resolver runs first; the SPA
//! fallback answers everything the resolver leaves unresolved.

pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::handle_request;
