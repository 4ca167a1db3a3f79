//! Project configuration management for `orrery.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── fetch      # [fetch]
//! │   └── serve      # [serve]
//! ├── error          # ConfigError
//! ├── util           # Config file lookup, path helpers
//! └── mod.rs         # AppConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section    | Purpose                                          |
//! |------------|--------------------------------------------------|
//! | `[fetch]`  | Texture table, download directory, User-Agent    |
//! | `[serve]`  | Static server (interface, port, root, aliases)   |
//!
//! The config file is optional. Without one, the working directory is the
//! project root and every default applies.

mod error;
pub mod section;
mod util;

pub use error::ConfigError;
pub use section::{AliasRule, FetchConfig, ServeConfig};

use util::{find_config_file, resolve_against};

use crate::{
    cli::{Cli, Commands},
    debug, log,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Config file searched for when `--config` is not given.
pub const DEFAULT_CONFIG_NAME: &str = "orrery.toml";

// ============================================================================
// root configuration
// ============================================================================

/// Root configuration structure representing orrery.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Project root directory - parent of config file, or cwd (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Texture download settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Static server settings
    #[serde(default)]
    pub serve: ServeConfig,
}

impl AppConfig {
    /// Load configuration for the current working directory.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;
        Self::load_from(cli, &cwd)
    }

    /// Load configuration as if started from `cwd`.
    ///
    /// Searches upward from `cwd` for the config file; the project root is the
    /// directory containing it. CLI options override file values.
    pub fn load_from(cli: &Cli, cwd: &Path) -> Result<Self> {
        let mut config = match Self::locate(cli, cwd)? {
            Some(path) => {
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf);
                debug!("config"; "loaded {}", path.display());
                config
            }
            None => {
                debug!("config"; "no {} found, using defaults", DEFAULT_CONFIG_NAME);
                Self {
                    root: cwd.to_path_buf(),
                    ..Self::default()
                }
            }
        };

        config.normalize_paths();
        config.apply_command_options(&cli.command, cwd);
        config.validate()?;
        Ok(config)
    }

    /// Find the config file. An explicit `--config` that cannot be found is an error.
    fn locate(cli: &Cli, cwd: &Path) -> Result<Option<PathBuf>, ConfigError> {
        match &cli.config {
            Some(path) => find_config_file(cwd, path)
                .map(Some)
                .ok_or_else(|| ConfigError::NotFound(path.clone())),
            None => Ok(find_config_file(cwd, Path::new(DEFAULT_CONFIG_NAME))),
        }
    }

    /// Resolve relative paths from the config file against the project root.
    fn normalize_paths(&mut self) {
        self.fetch.target = resolve_against(&self.root, &self.fetch.target);
        self.serve.root = resolve_against(&self.root, &self.serve.root);
    }

    /// Apply subcommand flags. Relative CLI paths are taken from `cwd`.
    fn apply_command_options(&mut self, command: &Commands, cwd: &Path) {
        match command {
            Commands::Fetch { target, .. } => {
                if let Some(target) = target {
                    self.fetch.target = resolve_against(cwd, target);
                }
            }
            Commands::Serve {
                interface,
                port,
                root,
                open,
            } => {
                if let Some(interface) = interface {
                    self.serve.interface = *interface;
                }
                if let Some(port) = port {
                    self.serve.port = *port;
                }
                if let Some(root) = root {
                    self.serve.root = resolve_against(cwd, root);
                }
                if let Some(open) = open {
                    self.serve.open = *open;
                }
            }
        }
    }

    /// Check all sections, reporting every problem at once.
    fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();
        self.fetch.validate(&mut errors);
        self.serve.validate(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

}

/// Parse a config snippet, failing the test on unknown fields.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> AppConfig {
    let (parsed, ignored) = AppConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}

// ============================================================================
// tests
// ============================================================================
