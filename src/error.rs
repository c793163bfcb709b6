// Startup error taxonomy
// Every way the server can refuse to start, kept distinguishable so the
// operator message and exit path can differ per cause

use std::error::Error as StdError;
use std::fmt;
use std::io;
use std::path::PathBuf;

#[derive(Debug)]
pub enum StartupError {
    /// The site root does not exist or is not a directory.
    RootMissing(PathBuf),
    /// Another process already listens on the configured port.
    PortInUse(u16),
    /// Any other failure while resolving the address or binding the socket.
    Bind(io::Error),
}

impl StartupError {
    /// Classify a bind failure, pulling the address-in-use case out so it
    /// can name the contested port.
    pub fn from_bind(port: u16, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::AddrInUse {
            Self::PortInUse(port)
        } else {
            Self::Bind(err)
        }
    }
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RootMissing(path) => {
                write!(f, "root directory '{}' not found", path.display())
            }
            Self::PortInUse(port) => write!(f, "port {port} is already in use"),
            Self::Bind(err) => write!(f, "failed to bind listener: {err}"),
        }
    }
}

impl StdError for StartupError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Bind(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StartupError {
    fn from(err: io::Error) -> Self {
        Self::Bind(err)
    }
}
