// Connection handling
// Serves one HTTP/1.1 connection per spawned task

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Serve a single accepted connection on its own task.
///
/// Whatever happens on this connection stays on it: transport errors are
/// logged and the task ends without touching any other request.
pub fn spawn_connection(
    stream: tokio::net::TcpStream,
    peer_addr: std::net::SocketAddr,
    state: Arc<AppState>,
) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let service = service_fn(move |req| {
            let state = Arc::clone(&state);
            async move { handler::handle_request(req, state).await }
        });

        let conn = http1::Builder::new()
            .keep_alive(true)
            .serve_connection(io, service);

        if let Err(err) = conn.await {
            // A client hanging up mid-response is routine, not a fault
            if !err.is_incomplete_message() {
                logger::log_connection_error(&peer_addr, &err);
            }
        }
    });
}
