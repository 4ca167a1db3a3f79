//! Server lifecycle management.

use crate::core::register_server;
use anyhow::{Result, anyhow};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};
use tiny_http::Server;

/// Bind to the specified interface and port.
///
/// A port that is already in use is a fatal error; there is no retry.
pub fn bind(interface: IpAddr, port: u16) -> Result<(Server, SocketAddr)> {
    let addr = SocketAddr::new(interface, port);
    let server =
        Server::http(addr).map_err(|e| anyhow!("Failed to bind {}: {}", addr, e))?;

    // Port 0 binds an ephemeral port; report the real one
    let bound = server.server_addr().to_ip().unwrap_or(addr);
    Ok((server, bound))
}

/// Register server for graceful shutdown.
///
/// When Ctrl+C is pressed, the global handler unblocks the request loop.
pub fn register_server_for_shutdown(server: Arc<Server>) {
    register_server(server);
}

/// URL shown to the user and opened in the browser.
pub fn browse_url(addr: SocketAddr) -> String {
    let ip = addr.ip();
    if ip.is_unspecified() || ip.is_loopback() {
        format!("http://localhost:{}", addr.port())
    } else {
        format!("http://{}", addr)
    }
}
