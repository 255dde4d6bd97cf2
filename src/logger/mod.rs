//! Logger module
//!
//! Server lifecycle logging to stdout and error/warning logging to stderr,
//! plus formatted access log lines.

mod format;

pub use format::AccessLogEntry;

use crate::config::ServerState;
use std::net::SocketAddr;

pub fn log_server_start(addr: &SocketAddr, state: &ServerState) {
    println!("======================================");
    println!("Static asset server started");
    println!("Listening on: http://{addr}");
    println!("Serving from: {}", state.root.display());
    println!("Index file: {}", state.config.static_files.index_file);
    if let Some(workers) = state.config.server.workers {
        println!("Worker threads: {workers}");
    }
    println!("======================================\n");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    println!("{}", entry.format(format));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    eprintln!("[ERROR] Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    eprintln!("[ERROR] {message}");
}

pub fn log_warning(message: &str) {
    eprintln!("[WARN] {message}");
}
