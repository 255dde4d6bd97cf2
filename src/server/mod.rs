// Server module entry point
// Listener construction and the accept loop

pub mod connection;
pub mod listener;

// Re-export commonly used functions
pub use listener::bind_listener;

use std::sync::atomic::AtomicUsize;
use std::sync::Arc;
use tokio::net::TcpListener;

use crate::config::ServerState;
use crate::logger;
use connection::accept_connection;

/// Accept loop: one spawned task per connection.
///
/// Accept errors are transient (e.g. EMFILE under load); the loop logs and
/// keeps accepting.
pub async fn run(
    listener: TcpListener,
    state: Arc<ServerState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let active_connections = Arc::new(AtomicUsize::new(0));

    loop {
        match listener.accept().await {
            Ok((stream, peer_addr)) => {
                accept_connection(stream, peer_addr, &state, &active_connections);
            }
            Err(e) => {
                logger::log_error(&format!("Failed to accept connection: {e}"));
            }
        }
    }
}
