//! Browser launch on startup.

use crate::log;
use anyhow::{Context, Result};

/// Opens a URL for the user. Swapped out in tests.
pub trait Opener {
    fn open(&self, url: &str) -> Result<()>;
}

/// The platform default browser.
pub struct SystemBrowser;

impl Opener for SystemBrowser {
    fn open(&self, url: &str) -> Result<()> {
        webbrowser::open(url).with_context(|| format!("failed to open browser at {url}"))
    }
}

/// Open `url`, logging instead of failing (headless machines have no browser).
pub fn open_best_effort(opener: &dyn Opener, url: &str) {
    if let Err(e) = opener.open(url) {
        log!("serve"; "could not open browser: {e:#}");
    }
}
