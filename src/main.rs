use std::process;

use siteserve::browser::SystemLauncher;
use siteserve::config::Config;
use siteserve::logger;
use siteserve::server;

fn main() {
    let cfg = match Config::load() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Error: invalid configuration: {e}");
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            process::exit(1);
        }
    };

    if let Err(err) = runtime.block_on(server::run(cfg, &SystemLauncher)) {
        logger::log_startup_error(&err);
        process::exit(1);
    }
}
