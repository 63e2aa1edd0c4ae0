//! Static-asset server with single-page-application fallback routing.
//!
//! Requests matching a regular file under the asset root are served
//! directly; every other request is answered with the entry document
//! (`index.html`) so a client-side router can interpret the path.

pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
