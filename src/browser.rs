// Browser launch module
// Best-effort only: serving proceeds whether or not a browser appeared

use std::io;

use crate::logger;

/// Something that can open a URL in the operator's browser.
pub trait Launcher {
    fn open(&self, url: &str) -> io::Result<()>;
}

/// Opens URLs with the operating system's default handler.
pub struct SystemLauncher;

impl Launcher for SystemLauncher {
    fn open(&self, url: &str) -> io::Result<()> {
        open::that(url)
    }
}

/// Announce and attempt the browser launch. Failure is logged and
/// otherwise ignored.
pub fn open_in_browser(launcher: &dyn Launcher, url: &str) {
    logger::log_browser_opening(url);
    if let Err(e) = launcher.open(url) {
        logger::log_warning(&format!("Could not open browser: {e}"));
    }
}
