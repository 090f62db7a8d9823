//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::core::catalog::Catalog;
use crate::core::downloads::{DownloadError, DownloadManager, Fetcher};

/// A fetcher for tests that never touch the network. Writes an empty file.
pub struct NoopFetcher;

#[async_trait]
impl Fetcher for NoopFetcher {
    fn name(&self) -> &str {
        "noop"
    }

    async fn fetch_and_save(&self, _url: &str, destination: &Path) -> Result<u64, DownloadError> {
        std::fs::write(destination, b"").map_err(|e| {
            DownloadError::FileSystem(crate::core::downloads::FileSystemError::from_io(
                e,
                destination,
            ))
        })?;
        Ok(0)
    }
}

/// A unique directory under the system temp dir, removed on drop.
pub struct ScratchDir {
    path: PathBuf,
}

impl ScratchDir {
    pub fn new(label: &str) -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        let n = COUNTER.fetch_add(1, Ordering::SeqCst);
        let path = std::env::temp_dir().join(format!(
            "eduhub-test-{}-{}-{}",
            label,
            std::process::id(),
            n
        ));
        let _ = std::fs::remove_dir_all(&path);
        std::fs::create_dir_all(&path).expect("create scratch dir");
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.path);
    }
}

/// Creates a test App over the builtin catalog, a scratch downloads
/// directory and a NoopFetcher. Keep the `ScratchDir` alive for the test.
pub fn test_app() -> (crate::core::state::App, ScratchDir) {
    let scratch = ScratchDir::new("app");
    let downloads = DownloadManager::open(scratch.path().join("downloads"))
        .expect("open scratch downloads");
    let app = crate::core::state::App::new(
        Arc::new(Catalog::builtin()),
        Arc::new(NoopFetcher),
        downloads,
    );
    (app, scratch)
}
