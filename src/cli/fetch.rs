//! `orrery fetch` command.

use crate::{
    config::FetchConfig,
    fetch::{AssetEntry, FetchSummary, Fetcher},
    log,
};
use anyhow::Result;

/// Download the configured texture table, or only the entries in `names`.
///
/// Per-entry failures are logged and collected in the summary, never returned.
pub fn fetch_textures(config: &FetchConfig, names: &[String]) -> Result<FetchSummary> {
    let entries = select_entries(&config.assets, names);
    let fetcher = Fetcher::new(&config.target, &config.user_agent)?;

    log!("fetch"; "{} file(s) -> {}", entries.len(), fetcher.target_dir().display());
    Ok(fetcher.fetch_all(&entries))
}

/// Pick entries by name, keeping table order. Unknown names are reported and skipped.
fn select_entries(assets: &[AssetEntry], names: &[String]) -> Vec<AssetEntry> {
    if names.is_empty() {
        return assets.to_vec();
    }

    for name in names {
        if !assets.iter().any(|a| &a.name == name) {
            log!("error"; "unknown texture `{}`, skipping", name);
        }
    }

    assets
        .iter()
        .filter(|a| names.contains(&a.name))
        .cloned()
        .collect()
}
