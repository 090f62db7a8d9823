//! # Application State
//!
//! Core business state for EduHub. This module contains domain logic only -
//! no TUI-specific types. Presentation state (cursors, scroll offsets,
//! prompts) lives in the `tui` module.
//!
//! ```text
//! App
//! ├── catalog: Arc<Catalog>           // subjects, topics, resources, quizzes
//! ├── fetcher: Arc<dyn Fetcher>       // HTTP downloads
//! ├── downloads: DownloadManager      // the downloads/ directory
//! ├── view: View                      // which screen is showing
//! ├── quiz: Option<QuizSession>       // None = NotStarted
//! ├── last_result: Option<QuizResult> // shown on the results screen
//! ├── entries: Vec<DownloadEntry>     // latest listing, filter applied
//! ├── download_filter: String         // substring filter for entries
//! ├── theme: Theme                    // light / dark
//! ├── status_message: String          // status bar text
//! ├── notice: Option<Notice>          // one-shot popup
//! ├── pending_overwrite: Option<...>  // write waiting for a yes/no
//! └── is_downloading: bool            // a fetch is in flight
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.
//! This keeps things predictable, so no surprise mutations.

use std::path::PathBuf;
use std::sync::Arc;

use crate::Theme;
use crate::core::catalog::{Catalog, ResourceMatch};
use crate::core::downloads::{DownloadEntry, DownloadManager, Fetcher};
use crate::core::quiz::{QuizError, QuizPhase, QuizResult, QuizSession};

/// The screen currently shown in the main pane.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Home,
    Subject(String),
    QuizMenu,
    Quiz,
    QuizResult,
    Downloads,
    Search { query: String, hits: Vec<ResourceMatch> },
    About,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// A one-shot notification, shown until dismissed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub body: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn info(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Info, title, body)
    }

    pub fn success(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Success, title, body)
    }

    pub fn warning(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Warning, title, body)
    }

    pub fn error(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self::new(NoticeLevel::Error, title, body)
    }
}

/// A write that hit an existing file and is waiting for the user to confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOverwrite {
    AddFile(PathBuf),
    Download { url: String, file_name: String },
}

impl PendingOverwrite {
    pub fn file_name(&self) -> String {
        match self {
            PendingOverwrite::AddFile(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            PendingOverwrite::Download { file_name, .. } => file_name.clone(),
        }
    }
}

pub struct App {
    pub catalog: Arc<Catalog>,
    pub fetcher: Arc<dyn Fetcher>,
    pub downloads: DownloadManager,
    pub view: View,
    pub quiz: Option<QuizSession>,
    pub last_result: Option<QuizResult>,
    pub entries: Vec<DownloadEntry>,
    pub download_filter: String,
    pub theme: Theme,
    pub status_message: String,
    pub notice: Option<Notice>,
    pub pending_overwrite: Option<PendingOverwrite>,
    pub is_downloading: bool,
}

impl App {
    pub fn new(catalog: Arc<Catalog>, fetcher: Arc<dyn Fetcher>, downloads: DownloadManager) -> Self {
        Self {
            catalog,
            fetcher,
            downloads,
            view: View::Home,
            quiz: None,
            last_result: None,
            entries: Vec::new(),
            download_filter: String::new(),
            theme: Theme::default(),
            status_message: String::from("Welcome to EduHub!"),
            notice: None,
            pending_overwrite: None,
            is_downloading: false,
        }
    }

    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn quiz_phase(&self) -> QuizPhase {
        match &self.quiz {
            None => QuizPhase::NotStarted,
            Some(session) => session.phase(),
        }
    }

    /// Result of the most recently finished session.
    ///
    /// The session itself is dropped when its last answer goes in, so this
    /// reads `last_result`. Fails while a quiz is running or before any has
    /// finished.
    pub fn quiz_result(&self) -> Result<&QuizResult, QuizError> {
        if self.quiz.is_some() {
            return Err(QuizError::InvalidState("quiz is still in progress"));
        }
        self.last_result
            .as_ref()
            .ok_or(QuizError::InvalidState("no quiz has finished"))
    }
}
