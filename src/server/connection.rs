// Connection handling module
// Accepts a single TCP connection and serves it on its own task

use std::net::SocketAddr;
use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;

use crate::config::Config;
use crate::handler;
use crate::logger;

/// Accept a connection and hand it off to a spawned serving task.
pub fn accept_connection(stream: tokio::net::TcpStream, peer_addr: SocketAddr, config: &Arc<Config>) {
    if config.logging.access_log {
        logger::log_connection_accepted(&peer_addr);
    }

    handle_connection(stream, Arc::clone(config), peer_addr);
}

/// Serve a single connection with hyper's HTTP/1 machinery. Each
/// connection runs on its own task, so one slow client cannot stall the
/// accept loop or its neighbours.
fn handle_connection(stream: tokio::net::TcpStream, config: Arc<Config>, peer_addr: SocketAddr) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let conn = http1::Builder::new().serve_connection(
            io,
            service_fn(move |req| {
                let config = Arc::clone(&config);
                async move { handler::handle_request(req, config, peer_addr).await }
            }),
        );

        if let Err(err) = conn.await {
            logger::log_connection_error(&err);
        }
    });
}
