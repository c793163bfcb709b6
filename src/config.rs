// Configuration module
// Defines the configuration types and the environment-backed loader

use std::net::SocketAddr;
use std::path::PathBuf;

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub browser: BrowserConfig,
}

/// Server configuration
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Directory the site was exported to, relative to the working directory.
    pub root: PathBuf,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    pub access_log: bool,
}

/// Browser launch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct BrowserConfig {
    pub open: bool,
}

impl Config {
    /// Load configuration from the environment on top of the built-in
    /// defaults. Variables use the `SITESERVE` prefix with `__` between
    /// section and key, e.g. `SITESERVE_SERVER__PORT=8080`.
    pub fn load() -> Result<Self, config::ConfigError> {
        let settings = config::Config::builder()
            .add_source(
                config::Environment::with_prefix("SITESERVE")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("server.root", "out")?
            .set_default("logging.access_log", true)?
            .set_default("browser.open", true)?
            .build()?;

        settings.try_deserialize()
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.server.host, self.server.port).parse()
    }

    /// URL shown to the operator and handed to the browser. A wildcard
    /// bind address is not routable, so it is presented as `localhost`.
    pub fn display_url(&self) -> String {
        let host = match self.server.host.as_str() {
            "0.0.0.0" | "::" | "[::]" => "localhost",
            other => other,
        };
        format!("http://{}:{}", host, self.server.port)
    }
}
