//! `[serve]` section configuration.
//!
//! Contains static server settings.
//!
//! # Example
//!
//! ```toml
//! [serve]
//! interface = "0.0.0.0"       # Network interface (0.0.0.0 = all interfaces)
//! port = 8000                 # HTTP port number
//! root = "."                  # Served directory (relative to project root)
//! open = true                 # Open the browser after binding
//!
//! [[serve.alias]]
//! prefix = "/textures/"
//! target = "/public/textures/"
//! ```
//!
//! Alias rules are tried in order; the first matching prefix wins.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// URL-path prefix rewrite applied before file resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AliasRule {
    /// Literal prefix of the request path, e.g. `/textures/`.
    pub prefix: String,
    /// Replacement for the prefix, e.g. `/public/textures/`.
    pub target: String,
}

impl AliasRule {
    pub fn new(prefix: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            target: target.into(),
        }
    }
}

/// Static server settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServeConfig {
    /// Network interface to bind.
    /// - `0.0.0.0` (default): all interfaces
    /// - `127.0.0.1`: localhost only
    pub interface: IpAddr,

    /// HTTP port number.
    pub port: u16,

    /// Directory served for non-aliased paths.
    pub root: PathBuf,

    /// Open the default browser once the server is bound.
    pub open: bool,

    /// Ordered prefix rewrites.
    pub alias: Vec<AliasRule>,
}

impl Default for ServeConfig {
    fn default() -> Self {
        Self {
            interface: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: 8000,
            root: PathBuf::from("."),
            open: true,
            alias: vec![AliasRule::new("/textures/", "/public/textures/")],
        }
    }
}

impl ServeConfig {
    /// Collect validation problems into `errors`.
    pub fn validate(&self, errors: &mut Vec<String>) {
        for rule in &self.alias {
            if !rule.prefix.starts_with('/') {
                errors.push(format!(
                    "[serve.alias] prefix `{}` must start with `/`",
                    rule.prefix
                ));
            }
            if !rule.target.starts_with('/') {
                errors.push(format!(
                    "[serve.alias] target `{}` must start with `/`",
                    rule.target
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_serve_config() {
        let config = test_parse_config(
            "[serve]\ninterface = \"127.0.0.1\"\nport = 8080\nroot = \"site\"\nopen = false",
        );

        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(config.serve.port, 8080);
        assert_eq!(config.serve.root, PathBuf::from("site"));
        assert!(!config.serve.open);
    }

    #[test]
    fn test_serve_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.serve.interface, IpAddr::V4(Ipv4Addr::UNSPECIFIED));
        assert_eq!(config.serve.port, 8000);
        assert!(config.serve.open);
        assert_eq!(
            config.serve.alias,
            vec![AliasRule::new("/textures/", "/public/textures/")]
        );
    }

    #[test]
    fn test_serve_config_ipv6_interface() {
        let config = test_parse_config("[serve]\ninterface = \"::1\"");
        assert_eq!(
            config.serve.interface,
            IpAddr::V6(Ipv6Addr::new(0, 0, 0, 0, 0, 0, 0, 1))
        );
    }

    #[test]
    fn test_serve_alias_list_replaces_default() {
        let config = test_parse_config(
            "[[serve.alias]]\nprefix = \"/img/\"\ntarget = \"/public/img/\"\n\
             [[serve.alias]]\nprefix = \"/textures/\"\ntarget = \"/public/textures/\"",
        );

        assert_eq!(config.serve.alias.len(), 2);
        assert_eq!(config.serve.alias[0].prefix, "/img/");
    }

    #[test]
    fn test_serve_alias_must_be_absolute() {
        let mut config = ServeConfig::default();
        config.alias = vec![AliasRule::new("textures/", "public/textures/")];

        let mut errors = Vec::new();
        config.validate(&mut errors);
        assert_eq!(errors.len(), 2);
    }
}
