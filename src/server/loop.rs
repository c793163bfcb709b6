// Server loop module
// Accepts connections until shutdown is requested

use std::sync::Arc;
use tokio::net::TcpListener;

use super::connection::accept_connection;
use super::signal::SignalHandler;
use crate::config::Config;
use crate::logger;

/// Accept connections until `signals` requests shutdown.
///
/// Each iteration registers a shutdown waiter before checking the flag.
/// `notify_waiters` stores no permit, so a request landing between the
/// check and the `select!` would otherwise be lost, leaving the loop
/// parked in `accept()` until the next connection. Dropping the listener
/// on exit is what releases the port.
#[allow(clippy::ignored_unit_patterns)]
pub async fn serve_until_shutdown(
    listener: TcpListener,
    config: Arc<Config>,
    signals: Arc<SignalHandler>,
) {
    loop {
        let shutdown = signals.shutdown.notified();
        tokio::pin!(shutdown);
        shutdown.as_mut().enable();

        if signals.shutdown_requested() {
            break;
        }

        tokio::select! {
            accept_result = listener.accept() => {
                match accept_result {
                    Ok((stream, peer_addr)) => {
                        accept_connection(stream, peer_addr, &config);
                    }
                    Err(e) => {
                        logger::log_error(&format!("Failed to accept connection: {e}"));
                    }
                }
            }

            _ = &mut shutdown => {
                break;
            }
        }
    }

    drop(listener);
}
