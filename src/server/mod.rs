// Server module entry
// Startup sequence, accept loop, and shutdown signalling

pub mod connection;
pub mod listener;
pub mod signal;

// `loop` is a keyword, so the file keeps the name while the module is
// server_loop
#[path = "loop.rs"]
pub mod server_loop;

// Re-export commonly used pieces
pub use listener::bind_listener;
pub use server_loop::serve_until_shutdown;
pub use signal::SignalHandler;

use std::sync::Arc;

use tokio::net::TcpListener;

use crate::browser::{self, Launcher};
use crate::config::Config;
use crate::error::StartupError;
use crate::logger;

/// Check startup preconditions and bind the serving socket.
///
/// The site root is verified before any socket is touched; a missing
/// root must not leave a bound listener behind.
pub fn prepare(config: &Config) -> Result<TcpListener, StartupError> {
    if !config.server.root.is_dir() {
        return Err(StartupError::RootMissing(config.server.root.clone()));
    }

    let addr = config.socket_addr().map_err(|e| {
        StartupError::Bind(std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
    })?;

    bind_listener(addr).map_err(|e| StartupError::from_bind(config.server.port, e))
}

/// Run the server until an interrupt requests shutdown.
pub async fn run(config: Config, launcher: &dyn Launcher) -> Result<(), StartupError> {
    let listener = prepare(&config)?;

    logger::log_server_start(&config);

    if config.browser.open {
        browser::open_in_browser(launcher, &config.display_url());
    }

    let signals = Arc::new(SignalHandler::new());
    signal::start_signal_handler(Arc::clone(&signals));

    serve_until_shutdown(listener, Arc::new(config), signals).await;

    logger::log_shutdown();
    Ok(())
}
