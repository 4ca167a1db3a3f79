//! Sequential texture downloader.
//!
//! Every entry is attempted exactly once, in table order. A failing entry is
//! logged and skipped; it never aborts the batch.

mod error;
mod table;

pub use error::FetchError;
pub use table::{AssetEntry, builtin_assets};

use crate::log;
use anyhow::{Context, Result};
use std::{
    fs,
    path::{Path, PathBuf},
};
use tokio::runtime::Runtime;

/// Suffix for the temporary file a body is written to before the rename.
const PART_SUFFIX: &str = ".part";

/// Outcome of one fetch run.
#[derive(Debug, Default)]
pub struct FetchSummary {
    /// Names written to the target directory.
    pub written: Vec<String>,
    /// Names that failed, with the error description.
    pub failed: Vec<(String, String)>,
}

/// Downloads asset entries into a target directory.
pub struct Fetcher {
    client: reqwest::Client,
    runtime: Runtime,
    target_dir: PathBuf,
}

impl Fetcher {
    /// Create a fetcher that sends `user_agent` on every request.
    pub fn new(target_dir: impl Into<PathBuf>, user_agent: &str) -> Result<Self> {
        Self::with_client(target_dir, reqwest::Client::builder().user_agent(user_agent))
    }

    fn with_client(
        target_dir: impl Into<PathBuf>,
        builder: reqwest::ClientBuilder,
    ) -> Result<Self> {
        let client = builder.build().context("Failed to create HTTP client")?;

        // Entries are fetched one at a time
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .context("Failed to create tokio runtime")?;

        Ok(Self {
            client,
            runtime,
            target_dir: target_dir.into(),
        })
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }

    /// Download every entry in order.
    pub fn fetch_all(&self, entries: &[AssetEntry]) -> FetchSummary {
        if let Err(e) = fs::create_dir_all(&self.target_dir) {
            log!("error"; "cannot create {}: {}", self.target_dir.display(), e);
        }

        let mut summary = FetchSummary::default();
        self.runtime.block_on(async {
            for entry in entries {
                log!("fetch"; "downloading {}...", entry.name);
                match self.fetch_one(entry).await {
                    Ok(()) => {
                        log!("fetch"; "success: {}", entry.name);
                        summary.written.push(entry.name.clone());
                    }
                    Err(e) => {
                        let message = e.describe();
                        log!("error"; "failed to download {}: {}", entry.name, message);
                        summary.failed.push((entry.name.clone(), message));
                    }
                }
            }
        });

        log!("fetch"; "{} downloaded, {} failed", summary.written.len(), summary.failed.len());
        summary
    }

    async fn fetch_one(&self, entry: &AssetEntry) -> Result<(), FetchError> {
        let url = url::Url::parse(&entry.url).map_err(|source| FetchError::InvalidUrl {
            url: entry.url.clone(),
            source,
        })?;

        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                reason: status.canonical_reason().unwrap_or_default().to_string(),
            });
        }

        let body = response.bytes().await?;
        write_replace(&self.target_dir.join(&entry.name), &body)
    }
}

/// Write `body` next to `dest` and rename it into place.
///
/// An existing `dest` is only replaced once the new content is fully on disk.
fn write_replace(dest: &Path, body: &[u8]) -> Result<(), FetchError> {
    let mut part = dest.as_os_str().to_owned();
    part.push(PART_SUFFIX);
    let part = PathBuf::from(part);

    fs::write(&part, body).map_err(|source| FetchError::Io {
        path: part.clone(),
        source,
    })?;

    fs::rename(&part, dest).map_err(|source| {
        let _ = fs::remove_file(&part);
        FetchError::Io {
            path: dest.to_path_buf(),
            source,
        }
    })
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::thread;
    use tempfile::TempDir;
    use tiny_http::{Header, Response, Server, StatusCode};

    /// Local origin serving fixed bodies; records the User-Agent of each request.
    ///
    /// A body of the form `"302 <location>"` answers with a redirect instead.
    fn spawn_origin(routes: &'static [(&'static str, &'static str)]) -> (String, Arc<Mutex<Vec<String>>>) {
        let server = Server::http("127.0.0.1:0").unwrap();
        let addr = server.server_addr().to_ip().unwrap();
        let agents = Arc::new(Mutex::new(Vec::new()));
        let seen = Arc::clone(&agents);

        thread::spawn(move || {
            for request in server.incoming_requests() {
                let agent = request
                    .headers()
                    .iter()
                    .find(|h| h.field.equiv("User-Agent"))
                    .map(|h| h.value.to_string())
                    .unwrap_or_default();
                seen.lock().unwrap().push(agent);

                let body = routes
                    .iter()
                    .find(|(path, _)| *path == request.url())
                    .map(|(_, body)| *body);
                let response = match body {
                    Some(body) => match body.strip_prefix("302 ") {
                        Some(location) => Response::from_string("")
                            .with_status_code(StatusCode(302))
                            .with_header(Header::from_bytes("Location", location).unwrap()),
                        None => Response::from_string(body),
                    },
                    None => Response::from_string("missing").with_status_code(StatusCode(404)),
                };
                let _ = request.respond(response);
            }
        });

        (format!("http://{addr}"), agents)
    }

    fn entry(base: &str, name: &str, path: &str) -> AssetEntry {
        AssetEntry::new(name, format!("{base}{path}"))
    }

    /// Same as `Fetcher::new`, but never routed through an environment proxy.
    fn local_fetcher(target_dir: &Path) -> Fetcher {
        let builder = reqwest::Client::builder()
            .user_agent("Mozilla/5.0")
            .no_proxy();
        Fetcher::with_client(target_dir, builder).unwrap()
    }

    #[test]
    fn test_fetch_writes_every_entry() {
        let (base, _) = spawn_origin(&[("/a.jpg", "alpha"), ("/b.jpg", "bravo")]);
        let temp = TempDir::new().unwrap();
        let target = temp.path().join("public/textures");

        let fetcher = local_fetcher(&target);
        let summary = fetcher.fetch_all(&[
            entry(&base, "a.jpg", "/a.jpg"),
            entry(&base, "b.jpg", "/b.jpg"),
        ]);

        assert_eq!(summary.written, vec!["a.jpg", "b.jpg"]);
        assert!(summary.failed.is_empty());
        assert_eq!(fs::read(target.join("a.jpg")).unwrap(), b"alpha");
        assert_eq!(fs::read(target.join("b.jpg")).unwrap(), b"bravo");
    }

    #[test]
    fn test_redirect_is_followed() {
        let (base, agents) = spawn_origin(&[("/thumb/sun.jpg", "302 /a.jpg"), ("/a.jpg", "alpha")]);
        let temp = TempDir::new().unwrap();

        let fetcher = local_fetcher(temp.path());
        let summary = fetcher.fetch_all(&[entry(&base, "sun.jpg", "/thumb/sun.jpg")]);

        assert_eq!(summary.written, vec!["sun.jpg"]);
        assert!(summary.failed.is_empty());
        assert_eq!(fs::read(temp.path().join("sun.jpg")).unwrap(), b"alpha");
        assert!(!temp.path().join("a.jpg").exists());
        // Original request plus the redirected one
        assert_eq!(agents.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_failed_entry_does_not_stop_batch() {
        let (base, _) = spawn_origin(&[("/a.jpg", "alpha"), ("/c.jpg", "charlie")]);
        let temp = TempDir::new().unwrap();

        let fetcher = local_fetcher(temp.path());
        let summary = fetcher.fetch_all(&[
            entry(&base, "a.jpg", "/a.jpg"),
            entry(&base, "b.jpg", "/gone.jpg"),
            entry(&base, "c.jpg", "/c.jpg"),
        ]);

        assert_eq!(summary.written.len() + summary.failed.len(), 3);
        assert_eq!(summary.written, vec!["a.jpg", "c.jpg"]);
        assert_eq!(summary.failed.len(), 1);
        assert_eq!(summary.failed[0].0, "b.jpg");
        assert!(summary.failed[0].1.contains("404"));
        assert!(!temp.path().join("b.jpg").exists());
        assert!(!temp.path().join("b.jpg.part").exists());
        assert_eq!(fs::read(temp.path().join("c.jpg")).unwrap(), b"charlie");
    }

    #[test]
    fn test_failed_entry_keeps_existing_file() {
        let (base, _) = spawn_origin(&[]);
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sun.jpg"), b"old").unwrap();

        let fetcher = local_fetcher(temp.path());
        let summary = fetcher.fetch_all(&[entry(&base, "sun.jpg", "/sun.jpg")]);

        assert_eq!(summary.failed.len(), 1);
        assert_eq!(fs::read(temp.path().join("sun.jpg")).unwrap(), b"old");
    }

    #[test]
    fn test_rerun_overwrites_existing_files() {
        let (base, _) = spawn_origin(&[("/sun.jpg", "new")]);
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("sun.jpg"), b"old").unwrap();

        let fetcher = local_fetcher(temp.path());
        let first = fetcher.fetch_all(&[entry(&base, "sun.jpg", "/sun.jpg")]);
        let second = fetcher.fetch_all(&[entry(&base, "sun.jpg", "/sun.jpg")]);

        assert_eq!(first.written.len(), 1);
        assert_eq!(second.written.len(), 1);
        assert_eq!(fs::read(temp.path().join("sun.jpg")).unwrap(), b"new");
    }

    #[test]
    fn test_user_agent_sent_on_every_request() {
        let (base, agents) = spawn_origin(&[("/a.jpg", "a")]);
        let temp = TempDir::new().unwrap();

        let fetcher = local_fetcher(temp.path());
        fetcher.fetch_all(&[
            entry(&base, "a.jpg", "/a.jpg"),
            entry(&base, "b.jpg", "/b.jpg"),
        ]);

        let agents = agents.lock().unwrap();
        assert_eq!(agents.len(), 2);
        assert!(agents.iter().all(|a| a == "Mozilla/5.0"));
    }

    #[test]
    fn test_invalid_url_is_reported() {
        let temp = TempDir::new().unwrap();
        let fetcher = local_fetcher(temp.path());
        let summary = fetcher.fetch_all(&[AssetEntry::new("x.jpg", "not a url")]);

        assert!(summary.written.is_empty());
        assert!(summary.failed[0].1.contains("invalid URL"));
    }

    #[test]
    fn test_unwritable_target_fails_each_entry() {
        let (base, _) = spawn_origin(&[("/a.jpg", "a")]);
        let temp = TempDir::new().unwrap();
        // A file where the directory should be
        let blocker = temp.path().join("textures");
        fs::write(&blocker, b"").unwrap();

        let fetcher = local_fetcher(&blocker);
        let summary = fetcher.fetch_all(&[entry(&base, "a.jpg", "/a.jpg")]);

        assert_eq!(summary.failed.len(), 1);
        assert!(summary.written.is_empty());
    }

    #[test]
    fn test_write_replace_leaves_no_part_file() {
        let temp = TempDir::new().unwrap();
        let dest = temp.path().join("moon.jpg");
        write_replace(&dest, b"moon").unwrap();

        assert_eq!(fs::read(&dest).unwrap(), b"moon");
        assert!(!temp.path().join("moon.jpg.part").exists());
    }
}
