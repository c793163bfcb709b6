//! Local preview server for a pre-built static site.
//!
//! Serves the exported `out` directory over HTTP on a fixed port, opens
//! the default browser at the root URL, and shuts down cleanly on Ctrl+C.

pub mod browser;
pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
