//! # Download Manager
//!
//! Thin wrappers over one flat directory (`downloads/` by default) plus a
//! single streaming HTTP fetch.
//!
//! The directory listing *is* the index: nothing is cached, every query goes
//! back to the filesystem. Every operation is attempted once; failures are
//! mapped to a named cause so the UI can tell "missing" from "taken" from
//! "timed out".
//!
//! Collisions are never resolved silently. Writes that could replace an
//! existing file take an [`OverwritePolicy`]; with `Refuse` they fail with
//! [`FileSystemError::AlreadyExists`] and the caller asks the user.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::time::{Duration, SystemTime};

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, warn};
use tokio::io::AsyncWriteExt;

/// Fixed fetch timeout applied when the config doesn't override it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);
/// Write buffer for streamed downloads.
pub const CHUNK_SIZE: usize = 8192;
/// Name offered when a URL has no usable last path segment.
pub const FALLBACK_FILE_NAME: &str = "resource.pdf";

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The URL could not be parsed.
    InvalidUrl(String),
    /// The HTTP client could not be built.
    Client(String),
    /// DNS, refused connection, TLS and other transport failures.
    Connect(String),
    /// No complete response within the configured timeout.
    Timeout,
    /// The server answered with a non-2xx status.
    Status(u16),
    /// The connection dropped while the body was streaming.
    Body(String),
}

impl NetworkError {
    fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if let Some(status) = err.status() {
            NetworkError::Status(status.as_u16())
        } else if err.is_body() || err.is_decode() {
            NetworkError::Body(err.to_string())
        } else {
            NetworkError::Connect(err.to_string())
        }
    }
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::InvalidUrl(msg) => write!(f, "invalid URL: {msg}"),
            NetworkError::Client(msg) => write!(f, "HTTP client error: {msg}"),
            NetworkError::Connect(msg) => write!(f, "connection failed: {msg}"),
            NetworkError::Timeout => write!(f, "request timed out"),
            NetworkError::Status(code) => write!(f, "server returned HTTP {code}"),
            NetworkError::Body(msg) => write!(f, "download interrupted: {msg}"),
        }
    }
}

impl std::error::Error for NetworkError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSystemError {
    NotFound(PathBuf),
    AlreadyExists(PathBuf),
    PermissionDenied(PathBuf),
    /// Empty, a path rather than a plain file name, or `.`/`..`.
    InvalidName(String),
    Other { path: PathBuf, message: String },
}

impl FileSystemError {
    pub fn from_io(err: io::Error, path: &Path) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => FileSystemError::NotFound(path),
            io::ErrorKind::AlreadyExists => FileSystemError::AlreadyExists(path),
            io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path),
            _ => FileSystemError::Other {
                path,
                message: err.to_string(),
            },
        }
    }
}

impl fmt::Display for FileSystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileSystemError::NotFound(p) => write!(f, "file not found: {}", p.display()),
            FileSystemError::AlreadyExists(p) => {
                write!(f, "a file with that name already exists: {}", p.display())
            }
            FileSystemError::PermissionDenied(p) => {
                write!(f, "permission denied: {}", p.display())
            }
            FileSystemError::InvalidName(name) => write!(f, "invalid file name: \"{name}\""),
            FileSystemError::Other { path, message } => {
                write!(f, "{}: {message}", path.display())
            }
        }
    }
}

impl std::error::Error for FileSystemError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadError {
    Network(NetworkError),
    FileSystem(FileSystemError),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DownloadError::Network(e) => write!(f, "network error: {e}"),
            DownloadError::FileSystem(e) => write!(f, "file system error: {e}"),
        }
    }
}

impl std::error::Error for DownloadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DownloadError::Network(e) => Some(e),
            DownloadError::FileSystem(e) => Some(e),
        }
    }
}

impl From<NetworkError> for DownloadError {
    fn from(e: NetworkError) -> Self {
        DownloadError::Network(e)
    }
}

impl From<FileSystemError> for DownloadError {
    fn from(e: FileSystemError) -> Self {
        DownloadError::FileSystem(e)
    }
}

// ============================================================================
// Entries
// ============================================================================

/// One file in the downloads directory, as of the listing that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadEntry {
    /// Exact name on disk. Operations on the entry go through this.
    pub name: OsString,
    /// `name` made printable, for display and filtering.
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub modified: Option<SystemTime>,
}

/// Case-insensitive substring filter over file names. A blank query keeps all.
pub fn filter_entries(entries: &[DownloadEntry], query: &str) -> Vec<DownloadEntry> {
    let needle = query.trim().to_lowercase();
    entries
        .iter()
        .filter(|e| needle.is_empty() || e.file_name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

/// Last non-empty path segment of `url`, or [`FALLBACK_FILE_NAME`].
pub fn suggested_file_name(url: &str) -> String {
    reqwest::Url::parse(url)
        .ok()
        .and_then(|u| {
            u.path_segments()
                .and_then(|mut segments| segments.rfind(|s| !s.is_empty()).map(str::to_string))
        })
        .filter(|name| validate_name(name).is_ok())
        .unwrap_or_else(|| FALLBACK_FILE_NAME.to_string())
}

/// Checks a name the user typed for a new file. Surrounding whitespace is dropped.
fn validate_name(name: &str) -> Result<&str, FileSystemError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed == "."
        || trimmed == ".."
        || trimmed.contains('/')
        || trimmed.contains('\\');
    if invalid {
        Err(FileSystemError::InvalidName(name.to_string()))
    } else {
        Ok(trimmed)
    }
}

/// Checks the name of a file that is already listed. Taken verbatim, so names
/// with odd whitespace or bytes still resolve; only separators and `.`/`..`
/// are refused.
fn existing_name(name: &OsStr) -> Result<&OsStr, FileSystemError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(single)), None) if single == name => Ok(name),
        _ => Err(FileSystemError::InvalidName(name.to_string_lossy().into_owned())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwritePolicy {
    /// Fail with `AlreadyExists` if the destination is taken.
    Refuse,
    /// Replace whatever is there. Only after the user confirmed.
    Replace,
}

// ============================================================================
// Manager
// ============================================================================

#[derive(Debug, Clone)]
pub struct DownloadManager {
    dir: PathBuf,
}

impl DownloadManager {
    /// Opens (and creates if needed) the downloads directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, FileSystemError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| FileSystemError::from_io(e, &dir))?;
        let dir = fs::canonicalize(&dir).map_err(|e| FileSystemError::from_io(e, &dir))?;
        info!("Downloads directory: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Regular files in the directory, sorted by name.
    pub fn list_entries(&self) -> Result<Vec<DownloadEntry>, FileSystemError> {
        let read = fs::read_dir(&self.dir).map_err(|e| FileSystemError::from_io(e, &self.dir))?;

        let mut entries = Vec::new();
        for item in read {
            let item = item.map_err(|e| FileSystemError::from_io(e, &self.dir))?;
            let path = item.path();
            let meta = match item.metadata() {
                Ok(m) => m,
                Err(e) => {
                    // Removed between read_dir and stat; skip it.
                    debug!("Skipping {}: {}", path.display(), e);
                    continue;
                }
            };
            if !meta.is_file() {
                continue;
            }
            let name = item.file_name();
            entries.push(DownloadEntry {
                file_name: name.to_string_lossy().into_owned(),
                name,
                path,
                size: meta.len(),
                modified: meta.modified().ok(),
            });
        }

        entries.sort_by(|a, b| a.file_name.cmp(&b.file_name));
        debug!("Listed {} downloads", entries.len());
        Ok(entries)
    }

    /// Resolves `name` inside the directory, applying the overwrite policy.
    pub fn destination(
        &self,
        name: &str,
        policy: OverwritePolicy,
    ) -> Result<PathBuf, FileSystemError> {
        let name = validate_name(name)?;
        let path = self.dir.join(name);
        if policy == OverwritePolicy::Refuse && path.exists() {
            return Err(FileSystemError::AlreadyExists(path));
        }
        Ok(path)
    }

    /// Renames a file. Never replaces an existing file.
    ///
    /// The target is claimed with `create_new` before the move, so `fs::rename`
    /// only ever replaces that empty placeholder.
    pub fn rename(&self, from: impl AsRef<OsStr>, to: &str) -> Result<PathBuf, FileSystemError> {
        let source = self.existing(from.as_ref())?;
        let target = self.destination(to, OverwritePolicy::Refuse)?;
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&target)
            .map_err(|e| FileSystemError::from_io(e, &target))?;
        if let Err(e) = fs::rename(&source, &target) {
            let _ = fs::remove_file(&target);
            return Err(FileSystemError::from_io(e, &source));
        }
        info!("Renamed {} -> {}", source.display(), target.display());
        Ok(target)
    }

    pub fn delete(&self, name: impl AsRef<OsStr>) -> Result<(), FileSystemError> {
        let path = self.existing(name.as_ref())?;
        fs::remove_file(&path).map_err(|e| FileSystemError::from_io(e, &path))?;
        info!("Deleted {}", path.display());
        Ok(())
    }

    /// Copies a file from anywhere on disk into the directory, keeping its name.
    pub fn copy_in(
        &self,
        source: &Path,
        policy: OverwritePolicy,
    ) -> Result<PathBuf, FileSystemError> {
        if !source.is_file() {
            return Err(FileSystemError::NotFound(source.to_path_buf()));
        }
        let name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| FileSystemError::InvalidName(source.display().to_string()))?;
        let target = self.destination(&name, policy)?;
        fs::copy(source, &target).map_err(|e| FileSystemError::from_io(e, &target))?;
        info!("Copied {} -> {}", source.display(), target.display());
        Ok(target)
    }

    pub fn path_of(&self, name: impl AsRef<OsStr>) -> Result<PathBuf, FileSystemError> {
        self.existing(name.as_ref())
    }

    fn existing(&self, name: &OsStr) -> Result<PathBuf, FileSystemError> {
        let path = self.dir.join(existing_name(name)?);
        if !path.is_file() {
            return Err(FileSystemError::NotFound(path));
        }
        Ok(path)
    }
}

// ============================================================================
// Fetching
// ============================================================================

#[async_trait]
pub trait Fetcher: Send + Sync {
    fn name(&self) -> &str;

    /// Streams `url` into `destination`, returning the number of bytes written.
    ///
    /// Overwrites `destination`; collision checks happen before this is called.
    /// A partial file may remain if the transfer fails midway.
    async fn fetch_and_save(&self, url: &str, destination: &Path) -> Result<u64, DownloadError>;
}

/// reqwest-backed fetcher with a whole-request timeout.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, NetworkError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| NetworkError::Client(e.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch_and_save(&self, url: &str, destination: &Path) -> Result<u64, DownloadError> {
        let url = reqwest::Url::parse(url)
            .map_err(|e| NetworkError::InvalidUrl(format!("{url}: {e}")))?;
        info!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(NetworkError::from_reqwest)?;

        let status = response.status();
        debug!("Response status for {}: {}", url, status);
        if !status.is_success() {
            warn!("Download of {} failed with HTTP {}", url, status.as_u16());
            return Err(NetworkError::Status(status.as_u16()).into());
        }

        let file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| FileSystemError::from_io(e, destination))?;
        let mut writer = tokio::io::BufWriter::with_capacity(CHUNK_SIZE, file);

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(NetworkError::from_reqwest)?;
            writer
                .write_all(&chunk)
                .await
                .map_err(|e| FileSystemError::from_io(e, destination))?;
            written += chunk.len() as u64;
        }
        writer
            .flush()
            .await
            .map_err(|e| FileSystemError::from_io(e, destination))?;

        info!("Saved {} bytes to {}", written, destination.display());
        Ok(written)
    }
}
