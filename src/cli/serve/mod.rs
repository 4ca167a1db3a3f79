//! Static asset server.
//!
//! Serves the project root over HTTP. Request paths matching an alias rule
//! (by default `/textures/` → `/public/textures/`) are rewritten before file
//! resolution.

mod browser;
mod lifecycle;
mod listing;
mod path;
mod response;

pub use browser::{Opener, SystemBrowser};

use crate::{
    config::{AliasRule, ServeConfig},
    debug, log,
};
use anyhow::{Context, Result};
use path::Resolved;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tiny_http::{Method, Request, Server};

/// Worker threads handling requests.
const WORKER_THREADS: usize = 4;

/// Read-only state every request handler needs.
struct Site {
    /// Canonical served root.
    root: PathBuf,
    alias: Vec<AliasRule>,
}

/// Bound server ready to accept requests
pub struct BoundServer {
    server: Arc<Server>,
    addr: SocketAddr,
    site: Arc<Site>,
}

/// Bind the HTTP server without starting the request loop
pub fn bind_server(config: &ServeConfig) -> Result<BoundServer> {
    let root = config
        .root
        .canonicalize()
        .with_context(|| format!("Serve root {} not found", config.root.display()))?;

    let (server, addr) = lifecycle::bind(config.interface, config.port)?;
    debug!("serve"; "root {}", root.display());

    Ok(BoundServer {
        server: Arc::new(server),
        addr,
        site: Arc::new(Site {
            root,
            alias: config.alias.clone(),
        }),
    })
}

/// Bind, announce, open the browser and serve until Ctrl+C.
///
/// Bind failure is returned before anything is printed or opened.
pub fn serve(config: &ServeConfig, opener: &dyn Opener) -> Result<()> {
    let bound = bind_server(config)?;
    let url = bound.url();

    debug!("serve"; "listening on {}", bound.addr());
    log!("serve"; "starting server at {}", url);
    log!("serve"; "press Ctrl+C to stop");

    if config.open {
        browser::open_best_effort(opener, &url);
    }

    lifecycle::register_server_for_shutdown(bound.handle());
    bound.run()?;

    log!("serve"; "server stopped");
    Ok(())
}

impl BoundServer {
    /// Get the bound address.
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Browser URL for the bound address.
    pub fn url(&self) -> String {
        lifecycle::browse_url(self.addr)
    }

    /// Server handle, used to unblock the request loop.
    pub fn handle(&self) -> Arc<Server> {
        Arc::clone(&self.server)
    }

    /// Start the request loop (blocking until the server is unblocked).
    pub fn run(self) -> Result<()> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(WORKER_THREADS)
            .build()
            .context("Failed to create request thread pool")?;

        for request in self.server.incoming_requests() {
            let site = Arc::clone(&self.site);
            pool.spawn(move || {
                if let Err(e) = handle_request(request, &site) {
                    log!("serve"; "request error: {e:#}");
                }
            });
        }
        Ok(())
    }
}

/// Handle a single HTTP request
fn handle_request(request: Request, site: &Site) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    debug!("serve"; "{} {}", request.method(), request.url());

    if !matches!(request.method(), Method::Get | Method::Head) {
        return response::respond_not_implemented(request);
    }

    match path::resolve(request.url(), &site.root, &site.alias) {
        Resolved::File(path) => response::respond_file(request, &path),
        Resolved::Listing { dir, url_path } => response::respond_listing(request, &dir, &url_path),
        Resolved::Redirect(location) => response::respond_redirect(request, &location),
        Resolved::NotFound => response::respond_not_found(request),
    }
}

// =============================================================================
// Tests
// =============================================================================
