//! Logger module
//!
//! Provides logging utilities for the HTTP server including:
//! - Server lifecycle logging
//! - Access logging
//! - Error and warning logging
//!
//! Everything goes to stdout or stderr; nothing is written to files.

mod format;

pub use format::AccessLogEntry;

use std::net::SocketAddr;

use crate::config::Config;
use crate::error::StartupError;

pub fn log_server_start(config: &Config) {
    let root = config
        .server
        .root
        .canonicalize()
        .unwrap_or_else(|_| config.server.root.clone());

    println!("======================================");
    println!("Static site server started successfully");
    println!("Serving:      {}", root.display());
    println!("Listening on: {}", config.display_url());
    println!("Press Ctrl+C to stop");
    println!("======================================\n");
}

pub fn log_browser_opening(url: &str) {
    println!("Opening {url} in your browser...");
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    println!("[Connection] Accepted from: {peer_addr}");
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

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry) {
    println!("{}", entry.format_line());
}

pub fn log_shutdown() {
    println!("\nServer stopped. Goodbye!");
}

/// Operator-facing startup failure report, with a recovery hint where
/// one exists.
pub fn log_startup_error(err: &StartupError) {
    match err {
        StartupError::RootMissing(path) => {
            eprintln!("Error: directory '{}' not found!", path.display());
            eprintln!("Run the site build first to generate it, then start the server again.");
        }
        StartupError::PortInUse(port) => {
            eprintln!("Error: port {port} is already in use!");
            eprintln!(
                "Close the other program using port {port}, or set SITESERVE_SERVER__PORT to pick a different one."
            );
        }
        StartupError::Bind(e) => {
            eprintln!("Error: {e}");
        }
    }
}
