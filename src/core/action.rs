//! # Actions
//!
//! Everything that can happen in EduHub becomes an `Action`.
//! User picks a quiz option? That's `Action::SubmitAnswer(option)`.
//! A download completes? That's `Action::DownloadFinished { .. }`.
//!
//! The `update()` function takes the current state and an action, mutates
//! the state, and returns an `Effect` for the adapter to carry out.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Filesystem calls on the downloads directory are quick, so they run right
//! here. Anything that would block (the HTTP fetch) or leave the process
//! (launching a viewer) comes back as an `Effect`.

use std::ffi::OsString;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::core::downloads::{self, DownloadError, FileSystemError, OverwritePolicy};
use crate::core::quiz::QuizSession;
use crate::core::state::{App, Notice, PendingOverwrite, View};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowHome,
    ShowAbout,
    ShowQuizMenu,
    ShowDownloads,
    SelectSubject(String),

    StartQuiz(String),
    SubmitAnswer(String),

    SearchResources(String),
    OpenResource(String),
    /// Open every hit of the current search.
    OpenAllResults,
    RequestDownload { url: String, file_name: String },
    DownloadFinished {
        file_name: String,
        result: Result<u64, DownloadError>,
    },

    RefreshDownloads,
    FilterDownloads(String),
    /// Download actions name files by their exact on-disk name.
    OpenDownload(OsString),
    RenameDownload { from: OsString, to: String },
    DeleteDownload(OsString),
    AddFile(PathBuf),
    ConfirmOverwrite,
    CancelOverwrite,
    OpenFailed { target: String, reason: String },

    DismissNotice,
    ToggleTheme,
    Quit,
}

/// Side effects `update()` asks the adapter to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    StartDownload {
        url: String,
        destination: PathBuf,
        file_name: String,
    },
    /// Hand a URL to the platform opener.
    Open(String),
    OpenAll(Vec<String>),
    /// Hand a downloaded file to the platform opener.
    OpenPath(PathBuf),
}

pub fn update(app: &mut App, action: Action) -> Effect {
    debug!("update: {:?}", action);
    match action {
        Action::ShowHome => {
            app.view = View::Home;
            app.status_message = "Home".to_string();
            Effect::None
        }
        Action::ShowAbout => {
            app.view = View::About;
            app.status_message = "About EduHub".to_string();
            Effect::None
        }
        Action::ShowQuizMenu => {
            app.view = View::QuizMenu;
            app.status_message = "Choose a subject to test your knowledge".to_string();
            Effect::None
        }
        Action::ShowDownloads => {
            app.view = View::Downloads;
            refresh_entries(app);
            Effect::None
        }
        Action::SelectSubject(name) => {
            match app.catalog.subject(&name) {
                Ok(subject) => {
                    app.status_message = format!(
                        "{}: {} topics, {} resources",
                        subject.name,
                        subject.topics.len(),
                        subject.resources.len()
                    );
                    app.view = View::Subject(name);
                }
                Err(e) => {
                    warn!("{}", e);
                    app.notice = Some(Notice::error("Unknown subject", e.to_string()));
                }
            }
            Effect::None
        }

        Action::StartQuiz(name) => {
            let started = app
                .catalog
                .subject(&name)
                .map_err(|e| e.to_string())
                .and_then(|subject| QuizSession::start(subject).map_err(|e| e.to_string()));
            match started {
                Ok(session) => {
                    info!("Quiz started: {} ({} questions)", name, session.total());
                    app.status_message = format!("Quiz: {name}");
                    app.quiz = Some(session);
                    app.last_result = None;
                    app.view = View::Quiz;
                }
                Err(reason) => {
                    warn!("Could not start quiz for {}: {}", name, reason);
                    app.notice = Some(Notice::warning("No quiz available", reason));
                }
            }
            Effect::None
        }
        Action::SubmitAnswer(option) => {
            submit_answer(app, &option);
            Effect::None
        }

        Action::SearchResources(query) => {
            if query.trim().is_empty() {
                app.notice = Some(Notice::info("Search", "Enter a search term."));
                return Effect::None;
            }
            let hits = app.catalog.search_resources(&query);
            app.status_message = format!("{} result(s) for \"{}\"", hits.len(), query.trim());
            if hits.is_empty() {
                app.notice = Some(Notice::info("Search Results", "No matching resources found."));
            }
            app.view = View::Search { query, hits };
            Effect::None
        }
        Action::OpenResource(url) => Effect::Open(url),
        Action::OpenAllResults => match &app.view {
            View::Search { hits, .. } if !hits.is_empty() => {
                app.status_message = format!("Opening {} resources", hits.len());
                Effect::OpenAll(hits.iter().map(|h| h.resource.url.clone()).collect())
            }
            _ => Effect::None,
        },
        Action::RequestDownload { url, file_name } => {
            request_download(app, url, file_name, OverwritePolicy::Refuse)
        }
        Action::DownloadFinished { file_name, result } => {
            app.is_downloading = false;
            match result {
                Ok(bytes) => {
                    info!("Download complete: {} ({} bytes)", file_name, bytes);
                    app.status_message = format!("Downloaded {file_name}");
                    app.notice = Some(Notice::success(
                        "Download Complete",
                        format!("Saved {} ({} bytes)", file_name, bytes),
                    ));
                }
                Err(e) => {
                    warn!("Download of {} failed: {}", file_name, e);
                    app.status_message = "Download failed".to_string();
                    app.notice = Some(Notice::error("Download Failed", e.to_string()));
                }
            }
            refresh_entries(app);
            Effect::None
        }

        Action::RefreshDownloads => {
            refresh_entries(app);
            Effect::None
        }
        Action::FilterDownloads(query) => {
            app.download_filter = query.trim().to_string();
            refresh_entries(app);
            Effect::None
        }
        Action::OpenDownload(name) => match app.downloads.path_of(&name) {
            Ok(path) => Effect::OpenPath(path),
            Err(e) => {
                report_fs_error(app, "File not found", &e);
                refresh_entries(app);
                Effect::None
            }
        },
        Action::RenameDownload { from, to } => {
            match app.downloads.rename(&from, &to) {
                Ok(_) => {
                    app.notice = Some(Notice::success("Renamed", format!("Renamed to: {}", to.trim())));
                }
                Err(e) => report_fs_error(app, "Could not rename file", &e),
            }
            refresh_entries(app);
            Effect::None
        }
        Action::DeleteDownload(name) => {
            match app.downloads.delete(&name) {
                Ok(()) => {
                    app.notice = Some(Notice::success(
                        "Deleted",
                        format!("Removed: {}", name.to_string_lossy()),
                    ));
                }
                Err(e) => report_fs_error(app, "Could not delete file", &e),
            }
            refresh_entries(app);
            Effect::None
        }
        Action::AddFile(source) => {
            add_file(app, source, OverwritePolicy::Refuse);
            Effect::None
        }
        Action::ConfirmOverwrite => {
            app.notice = None;
            match app.pending_overwrite.take() {
                Some(PendingOverwrite::AddFile(source)) => {
                    add_file(app, source, OverwritePolicy::Replace);
                    Effect::None
                }
                Some(PendingOverwrite::Download { url, file_name }) => {
                    request_download(app, url, file_name, OverwritePolicy::Replace)
                }
                None => Effect::None,
            }
        }
        Action::CancelOverwrite => {
            app.notice = None;
            if let Some(pending) = app.pending_overwrite.take() {
                app.status_message = format!("Kept existing {}", pending.file_name());
            }
            Effect::None
        }
        Action::OpenFailed { target, reason } => {
            app.notice = Some(Notice::error(
                "Open failed",
                format!("Could not open {target}:\n{reason}"),
            ));
            Effect::None
        }

        Action::DismissNotice => {
            app.notice = None;
            Effect::None
        }
        Action::ToggleTheme => {
            app.theme = app.theme.toggled();
            app.status_message = format!("{} mode", app.theme.label());
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit_answer(app: &mut App, option: &str) {
    let Some(session) = app.quiz.as_mut() else {
        app.notice = Some(Notice::warning("No quiz", "Start a quiz first."));
        return;
    };

    let outcome = match session.submit_answer(option) {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!("Answer rejected: {}", e);
            app.notice = Some(Notice::error("Quiz", e.to_string()));
            return;
        }
    };

    app.notice = Some(if outcome.correct {
        Notice::success("Correct!", "Your answer is correct!")
    } else {
        Notice::error(
            "Incorrect",
            format!("Sorry, the correct answer is: {}", outcome.correct_answer),
        )
    });

    if outcome.finished {
        // Results are shown, so the session is done with.
        if let Some(session) = app.quiz.take() {
            match session.result() {
                Ok(result) => {
                    info!(
                        "Quiz finished: {} {}/{} ({}%)",
                        result.subject, result.score, result.total, result.percentage
                    );
                    app.last_result = Some(result);
                }
                Err(e) => warn!("Finished quiz has no result: {}", e),
            }
        }
        app.view = View::QuizResult;
        app.status_message = "Quiz complete".to_string();
    } else if let Some(session) = &app.quiz {
        let (n, total) = session.progress();
        app.status_message = format!("Question {n} of {total}");
    }
}

fn request_download(
    app: &mut App,
    url: String,
    file_name: String,
    policy: OverwritePolicy,
) -> Effect {
    if app.is_downloading {
        app.notice = Some(Notice::warning(
            "Download in progress",
            "Wait for the current download to finish.",
        ));
        return Effect::None;
    }

    match app.downloads.destination(&file_name, policy) {
        Ok(destination) => {
            app.is_downloading = true;
            app.status_message = format!("Downloading {}...", file_name.trim());
            Effect::StartDownload {
                url,
                destination,
                file_name: file_name.trim().to_string(),
            }
        }
        Err(FileSystemError::AlreadyExists(_)) => {
            ask_overwrite(app, PendingOverwrite::Download { url, file_name });
            Effect::None
        }
        Err(e) => {
            report_fs_error(app, "Download Failed", &e);
            Effect::None
        }
    }
}

fn add_file(app: &mut App, source: PathBuf, policy: OverwritePolicy) {
    match app.downloads.copy_in(&source, policy) {
        Ok(dest) => {
            app.notice = Some(Notice::success(
                "Added",
                format!("Copied to library:\n{}", dest.display()),
            ));
        }
        Err(FileSystemError::AlreadyExists(_)) => {
            ask_overwrite(app, PendingOverwrite::AddFile(source));
        }
        Err(e) => report_fs_error(app, "Could not add file", &e),
    }
    refresh_entries(app);
}

fn ask_overwrite(app: &mut App, pending: PendingOverwrite) {
    app.notice = Some(Notice::warning(
        "File exists",
        format!(
            "A file named {} already exists. Overwrite? (y/n)",
            pending.file_name().trim()
        ),
    ));
    app.pending_overwrite = Some(pending);
}

fn report_fs_error(app: &mut App, title: &str, err: &FileSystemError) {
    warn!("{}: {}", title, err);
    app.notice = Some(Notice::error(title, err.to_string()));
}

/// Re-list the downloads directory and apply the current filter.
fn refresh_entries(app: &mut App) {
    match app.downloads.list_entries() {
        Ok(all) => {
            app.entries = downloads::filter_entries(&all, &app.download_filter);
            app.status_message = if app.download_filter.is_empty() {
                format!("{} file(s) in {}", all.len(), app.downloads.dir().display())
            } else {
                format!(
                    "{} of {} file(s) match \"{}\"",
                    app.entries.len(),
                    all.len(),
                    app.download_filter
                )
            };
        }
        Err(e) => {
            app.entries.clear();
            report_fs_error(app, "Could not list downloads", &e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use crate::core::downloads::NetworkError;
    use crate::core::quiz::{QuizPhase, Tier};
    use crate::core::state::NoticeLevel;
    use crate::test_support::test_app;
    use std::fs;

    fn answer_current(app: &mut App, correct: bool) {
        let question = app.quiz.as_ref().unwrap().current_question().unwrap().clone();
        let pick = if correct {
            question.correct_answer().to_string()
        } else {
            question
                .options()
                .iter()
                .find(|o| o.as_str() != question.correct_answer())
                .unwrap()
                .clone()
        };
        update(app, Action::SubmitAnswer(pick));
    }

    #[test]
    fn test_select_subject() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::SelectSubject("Science".into()));
        assert_eq!(app.view, View::Subject("Science".into()));
    }

    #[test]
    fn test_select_unknown_subject_notifies() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::SelectSubject("Unknown".into()));
        assert_eq!(app.view, View::Home);
        assert_eq!(app.notice.as_ref().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_quiz_flow_reaches_results() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::StartQuiz("Mathematics".into()));
        assert_eq!(app.view, View::Quiz);
        assert_eq!(app.quiz_phase(), QuizPhase::InProgress);

        answer_current(&mut app, true);
        assert_eq!(app.notice.as_ref().unwrap().title, "Correct!");
        answer_current(&mut app, false);
        assert!(app.notice.as_ref().unwrap().body.contains("correct answer is"));
        answer_current(&mut app, true);

        assert_eq!(app.view, View::QuizResult);
        assert!(app.quiz.is_none());
        let result = app.last_result.as_ref().unwrap();
        assert_eq!((result.score, result.total, result.percentage), (2, 3, 67));
        assert_eq!(result.tier, Tier::Middle);
    }

    #[test]
    fn test_submit_without_quiz_is_rejected() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::SubmitAnswer("3.14".into()));
        assert_eq!(app.notice.as_ref().unwrap().level, NoticeLevel::Warning);
        assert!(app.last_result.is_none());
    }

    #[test]
    fn test_start_quiz_without_questions() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::StartQuiz("Geography".into()));
        assert_eq!(app.view, View::Home);
        assert!(app.quiz.is_none());
        assert!(app.notice.as_ref().unwrap().body.contains("no quiz questions"));
    }

    #[test]
    fn test_new_quiz_replaces_old_session() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::StartQuiz("Science".into()));
        answer_current(&mut app, true);
        update(&mut app, Action::StartQuiz("Programming".into()));
        let session = app.quiz.as_ref().unwrap();
        assert_eq!(session.subject(), "Programming");
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_search_resources() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::SearchResources("khan".into()));
        match &app.view {
            View::Search { hits, .. } => assert_eq!(hits.len(), 2),
            other => panic!("unexpected view {other:?}"),
        }

        update(&mut app, Action::SearchResources("  ".into()));
        assert_eq!(app.notice.as_ref().unwrap().body, "Enter a search term.");
    }

    #[test]
    fn test_open_all_results() {
        let (mut app, _s) = test_app();
        assert_eq!(update(&mut app, Action::OpenAllResults), Effect::None);

        update(&mut app, Action::SearchResources("khan".into()));
        match update(&mut app, Action::OpenAllResults) {
            Effect::OpenAll(urls) => {
                assert_eq!(urls.len(), 2);
                assert!(urls.iter().all(|u| u.starts_with("http")));
            }
            other => panic!("unexpected effect {other:?}"),
        }
        assert_eq!(app.status_message, "Opening 2 resources");
    }

    #[test]
    fn test_request_download_emits_effect() {
        let (mut app, _s) = test_app();
        let effect = update(
            &mut app,
            Action::RequestDownload {
                url: "https://example.com/a.pdf".into(),
                file_name: "a.pdf".into(),
            },
        );
        match effect {
            Effect::StartDownload { destination, file_name, .. } => {
                assert_eq!(file_name, "a.pdf");
                assert_eq!(destination, app.downloads.dir().join("a.pdf"));
            }
            other => panic!("unexpected effect {other:?}"),
        }
        assert!(app.is_downloading);
    }

    #[test]
    fn test_second_download_refused_while_running() {
        let (mut app, _s) = test_app();
        let first = Action::RequestDownload {
            url: "https://example.com/a.pdf".into(),
            file_name: "a.pdf".into(),
        };
        assert!(matches!(update(&mut app, first), Effect::StartDownload { .. }));
        let second = Action::RequestDownload {
            url: "https://example.com/b.pdf".into(),
            file_name: "b.pdf".into(),
        };
        assert_eq!(update(&mut app, second), Effect::None);
        assert_eq!(app.notice.as_ref().unwrap().title, "Download in progress");
    }

    #[test]
    fn test_download_collision_asks_then_replaces() {
        let (mut app, _s) = test_app();
        fs::write(app.downloads.dir().join("a.pdf"), "old").unwrap();

        let effect = update(
            &mut app,
            Action::RequestDownload {
                url: "https://example.com/a.pdf".into(),
                file_name: "a.pdf".into(),
            },
        );
        assert_eq!(effect, Effect::None);
        assert!(app.pending_overwrite.is_some());
        assert!(!app.is_downloading);

        let effect = update(&mut app, Action::ConfirmOverwrite);
        assert!(matches!(effect, Effect::StartDownload { .. }));
        assert!(app.pending_overwrite.is_none());
        assert!(app.notice.is_none());
    }

    #[test]
    fn test_download_finished_clears_flag_and_lists_file() {
        let (mut app, _s) = test_app();
        fs::write(app.downloads.dir().join("a.pdf"), "data").unwrap();
        app.is_downloading = true;
        update(
            &mut app,
            Action::DownloadFinished {
                file_name: "a.pdf".into(),
                result: Ok(4),
            },
        );
        assert!(!app.is_downloading);
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.notice.as_ref().unwrap().title, "Download Complete");
    }

    #[test]
    fn test_download_failure_notice() {
        let (mut app, _s) = test_app();
        app.is_downloading = true;
        update(
            &mut app,
            Action::DownloadFinished {
                file_name: "a.pdf".into(),
                result: Err(DownloadError::Network(NetworkError::Status(404))),
            },
        );
        let notice = app.notice.as_ref().unwrap();
        assert_eq!(notice.level, NoticeLevel::Error);
        assert!(notice.body.contains("404"));
        assert!(!app.is_downloading);
    }

    #[test]
    fn test_add_file_collision_cancel_keeps_old() {
        let (mut app, scratch) = test_app();
        let outside = scratch.path().join("notes.txt");
        fs::write(&outside, "new").unwrap();
        fs::write(app.downloads.dir().join("notes.txt"), "old").unwrap();

        update(&mut app, Action::AddFile(outside.clone()));
        assert_eq!(
            app.pending_overwrite,
            Some(PendingOverwrite::AddFile(outside))
        );
        update(&mut app, Action::CancelOverwrite);
        assert!(app.pending_overwrite.is_none());
        assert!(app.notice.is_none());
        let kept = fs::read_to_string(app.downloads.dir().join("notes.txt")).unwrap();
        assert_eq!(kept, "old");
    }

    #[test]
    fn test_add_file_collision_confirm_replaces() {
        let (mut app, scratch) = test_app();
        let outside = scratch.path().join("notes.txt");
        fs::write(&outside, "new").unwrap();
        fs::write(app.downloads.dir().join("notes.txt"), "old").unwrap();

        update(&mut app, Action::AddFile(outside));
        update(&mut app, Action::ConfirmOverwrite);
        let replaced = fs::read_to_string(app.downloads.dir().join("notes.txt")).unwrap();
        assert_eq!(replaced, "new");
        assert_eq!(app.notice.as_ref().unwrap().title, "Added");
    }

    #[test]
    fn test_rename_delete_and_filter() {
        let (mut app, _s) = test_app();
        fs::write(app.downloads.dir().join("algebra.pdf"), "").unwrap();
        fs::write(app.downloads.dir().join("physics.pdf"), "").unwrap();
        update(&mut app, Action::ShowDownloads);
        assert_eq!(app.entries.len(), 2);

        update(&mut app, Action::FilterDownloads("ALG".into()));
        assert_eq!(app.entries.len(), 1);

        update(
            &mut app,
            Action::RenameDownload {
                from: "algebra.pdf".into(),
                to: "physics.pdf".into(),
            },
        );
        assert_eq!(app.notice.as_ref().unwrap().title, "Could not rename file");

        update(&mut app, Action::FilterDownloads(String::new()));
        update(&mut app, Action::DeleteDownload("physics.pdf".into()));
        assert_eq!(app.entries.len(), 1);
        assert_eq!(app.entries[0].file_name, "algebra.pdf");

        update(&mut app, Action::DeleteDownload("physics.pdf".into()));
        assert_eq!(app.notice.as_ref().unwrap().level, NoticeLevel::Error);
    }

    #[test]
    fn test_whitespace_names_round_trip_through_update() {
        let (mut app, _s) = test_app();
        fs::write(app.downloads.dir().join("notes.pdf "), "").unwrap();
        update(&mut app, Action::ShowDownloads);
        let listed = app.entries[0].name.clone();

        let effect = update(&mut app, Action::OpenDownload(listed.clone()));
        assert!(matches!(effect, Effect::OpenPath(p) if p.ends_with("notes.pdf ")));

        update(
            &mut app,
            Action::RenameDownload {
                from: listed,
                to: "notes.pdf".into(),
            },
        );
        assert_eq!(app.notice.as_ref().unwrap().title, "Renamed");
        assert_eq!(app.entries[0].file_name, "notes.pdf");

        let renamed = app.entries[0].name.clone();
        update(&mut app, Action::DeleteDownload(renamed));
        assert_eq!(app.notice.as_ref().unwrap().title, "Deleted");
        assert!(app.entries.is_empty());
    }

    #[test]
    fn test_open_download_effect() {
        let (mut app, _s) = test_app();
        fs::write(app.downloads.dir().join("a.txt"), "").unwrap();
        let effect = update(&mut app, Action::OpenDownload("a.txt".into()));
        assert!(matches!(effect, Effect::OpenPath(p) if p.ends_with("a.txt")));

        let effect = update(&mut app, Action::OpenDownload("missing.txt".into()));
        assert_eq!(effect, Effect::None);
        assert_eq!(app.notice.as_ref().unwrap().title, "File not found");
    }

    #[test]
    fn test_toggle_theme_and_quit() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme, Theme::Dark);
        update(&mut app, Action::ToggleTheme);
        assert_eq!(app.theme, Theme::Light);
        assert_eq!(update(&mut app, Action::Quit), Effect::Quit);
    }
}
