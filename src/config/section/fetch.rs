//! `[fetch]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [fetch]
//! target = "public/textures"     # Download directory (relative to project root)
//! user_agent = "Mozilla/5.0"     # Sent on every request
//!
//! # Replaces the built-in texture table when present
//! [[fetch.assets]]
//! name = "sun.jpg"
//! url = "https://example.com/sun.jpg"
//! ```

use std::collections::HashSet;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::fetch::{AssetEntry, builtin_assets};

/// Texture download settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Directory downloaded files are written to.
    pub target: PathBuf,

    /// `User-Agent` header value. Some hosts reject default client identifiers.
    pub user_agent: String,

    /// Files to download, in order.
    pub assets: Vec<AssetEntry>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            target: PathBuf::from("public/textures"),
            user_agent: "Mozilla/5.0".to_string(),
            assets: builtin_assets(),
        }
    }
}

impl FetchConfig {
    /// Collect validation problems into `errors`.
    pub fn validate(&self, errors: &mut Vec<String>) {
        if self.user_agent.trim().is_empty() {
            errors.push("[fetch.user_agent] must not be empty".to_string());
        }

        let mut seen = HashSet::new();
        for entry in &self.assets {
            if !is_plain_file_name(&entry.name) {
                errors.push(format!(
                    "[fetch.assets] `{}` is not a plain file name",
                    entry.name
                ));
            }
            if !seen.insert(entry.name.as_str()) {
                errors.push(format!("[fetch.assets] duplicate name `{}`", entry.name));
            }
            match url::Url::parse(&entry.url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(format!(
                    "[fetch.assets] `{}`: unsupported scheme `{}`",
                    entry.name,
                    url.scheme()
                )),
                Err(e) => errors.push(format!(
                    "[fetch.assets] `{}`: invalid url `{}` ({e})",
                    entry.name, entry.url
                )),
            }
        }
    }
}

/// A name that stays inside the target directory.
fn is_plain_file_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\'])
        && !name.contains('\0')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn errors_of(config: &FetchConfig) -> Vec<String> {
        let mut errors = Vec::new();
        config.validate(&mut errors);
        errors
    }

    #[test]
    fn test_fetch_config_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.fetch.target, PathBuf::from("public/textures"));
        assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
        assert_eq!(config.fetch.assets, builtin_assets());
        assert!(errors_of(&config.fetch).is_empty());
    }

    #[test]
    fn test_fetch_assets_replace_builtin() {
        let config = test_parse_config(
            "[[fetch.assets]]\nname = \"a.jpg\"\nurl = \"https://example.com/a.jpg\"\n\
             [[fetch.assets]]\nname = \"b.jpg\"\nurl = \"http://example.com/b.jpg\"",
        );

        let names: Vec<_> = config.fetch.assets.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["a.jpg", "b.jpg"]);
        assert!(errors_of(&config.fetch).is_empty());
    }

    #[test]
    fn test_fetch_partial_override() {
        let config = test_parse_config("[fetch]\ntarget = \"assets\"");

        assert_eq!(config.fetch.target, PathBuf::from("assets"));
        assert_eq!(config.fetch.user_agent, "Mozilla/5.0");
        assert_eq!(config.fetch.assets.len(), 23);
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let mut config = FetchConfig::default();
        config.assets = vec![
            AssetEntry::new("a.jpg", "https://example.com/1.jpg"),
            AssetEntry::new("a.jpg", "https://example.com/2.jpg"),
        ];
        let errors = errors_of(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("duplicate"));
    }

    #[test]
    fn test_unsafe_names_rejected() {
        for name in ["", ".", "..", "../evil.jpg", "sub/dir.jpg", "win\\dir.jpg"] {
            let mut config = FetchConfig::default();
            config.assets = vec![AssetEntry::new(name, "https://example.com/x.jpg")];
            assert_eq!(errors_of(&config).len(), 1, "{name:?}");
        }
    }

    #[test]
    fn test_bad_urls_rejected() {
        let mut config = FetchConfig::default();
        config.assets = vec![
            AssetEntry::new("a.jpg", "not a url"),
            AssetEntry::new("b.jpg", "ftp://example.com/b.jpg"),
        ];
        let errors = errors_of(&config);
        assert_eq!(errors.len(), 2);
        assert!(errors[1].contains("ftp"));
    }

    #[test]
    fn test_empty_user_agent_rejected() {
        let mut config = FetchConfig::default();
        config.user_agent = " ".to_string();
        assert_eq!(errors_of(&config).len(), 1);
    }
}
