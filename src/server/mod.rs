// Server module entry point
// Listener construction, accept loop, and per-connection serving

pub mod connection;
pub mod listener;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::config::AppState;
use crate::logger;

// Re-export commonly used types
pub use listener::create_listener;

/// Accept connections until the process exits.
///
/// Accept errors are logged and the loop keeps going; one failed accept
/// never takes the listener down.
pub async fn run(listener: TcpListener, state: Arc<AppState>) -> std::io::Result<()> {
    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                connection::spawn_connection(stream, peer_addr, Arc::clone(&state));
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
