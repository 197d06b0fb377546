use std::path::{Component, Path, PathBuf};

use reqwest::Client;

use crate::Res;

/// Result of one cover image download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    Saved(PathBuf),
    /// Nothing was written; `reason` is for diagnostics only.
    Skipped { reason: String },
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, DownloadOutcome::Saved(_))
    }
}

/// Directory that receives downloaded cover images.
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the directory if it does not exist yet.
    pub async fn ensure_dir(&self) -> Res<()> {
        async_fs::create_dir_all(&self.dir).await?;
        Ok(())
    }

    /// Fetches `url` without authentication and writes the body to
    /// `<dir>/<file_name>`.
    ///
    /// Any failure (network error, non-success status, failed write) yields
    /// [`DownloadOutcome::Skipped`] and leaves no file behind; it never
    /// affects other downloads.
    ///
    /// `file_name` must be a single plain path component; anything else is
    /// skipped without a request.
    pub async fn download(&self, client: &Client, url: &str, file_name: &str) -> DownloadOutcome {
        if !is_plain_file_name(file_name) {
            return DownloadOutcome::Skipped {
                reason: format!("invalid file name '{}'", file_name),
            };
        }

        let response = match client.get(url).send().await {
            Ok(resp) => resp,
            Err(e) => {
                return DownloadOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        if !response.status().is_success() {
            return DownloadOutcome::Skipped {
                reason: format!("HTTP {}", response.status()),
            };
        }

        let bytes = match response.bytes().await {
            Ok(bytes) => bytes,
            Err(e) => {
                return DownloadOutcome::Skipped {
                    reason: e.to_string(),
                };
            }
        };

        let path = self.dir.join(file_name);
        match async_fs::write(&path, &bytes).await {
            Ok(()) => DownloadOutcome::Saved(path),
            Err(e) => DownloadOutcome::Skipped {
                reason: e.to_string(),
            },
        }
    }
}

fn is_plain_file_name(file_name: &str) -> bool {
    let mut components = Path::new(file_name).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
