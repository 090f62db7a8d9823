//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Key Routing
//!
//! Input goes to the topmost layer that wants it:
//!
//! ```text
//! Ctrl+C ─▶ quit
//! pending overwrite ─▶ y / n
//! notice ─▶ Enter / Esc dismiss
//! prompt ─▶ text entry
//! global ─▶ q, t, /, Tab
//! focus ─▶ sidebar or the current view
//! ```
//!
//! ## Redraw Strategy
//!
//! - **Downloading**: draws every ~80ms so the header spinner turns.
//! - **Idle**: sleeps up to 500ms, only redraws on events or background
//!   results.

mod component;
mod components;
mod event;
mod theme;
mod ui;

use log::{debug, info, warn};
use std::ffi::OsStr;
use std::io::stdout;
use std::path::{Path, PathBuf};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableBracketedPaste, EnableBracketedPaste};
use crossterm::execute;
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::downloads::{Fetcher, suggested_file_name};
use crate::core::launcher;
use crate::core::state::{App, View};
use crate::tui::component::EventHandler;
use crate::tui::components::{
    DownloadsEvent, DownloadsState, Prompt, PromptEvent, PromptPurpose, QuizEvent,
    QuizViewState, SearchEvent, SearchViewState, SidebarItem, SidebarState, SubjectEvent, SubjectViewState,
    landing, sidebar,
};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::theme::Palette;

/// Which pane receives navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    Main,
}

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub focus: Focus,
    pub sidebar: SidebarState,
    pub sidebar_items: Vec<SidebarItem>,
    pub subject: SubjectViewState,
    pub quiz: QuizViewState,
    pub downloads: DownloadsState,
    pub search: SearchViewState,
    // Text entry overlay (None = hidden)
    pub prompt: Option<Prompt>,
    // Picked once per run for the home page
    pub quote: &'static str,
}

impl TuiState {
    pub fn new(app: &App) -> Self {
        Self {
            focus: Focus::Sidebar,
            sidebar: SidebarState::new(),
            sidebar_items: sidebar::items(&app.catalog),
            subject: SubjectViewState::new(),
            quiz: QuizViewState::new(),
            downloads: DownloadsState::new(),
            search: SearchViewState::new(),
            prompt: None,
            quote: landing::random_quote(),
        }
    }

    fn open_prompt(&mut self, app: &App, purpose: PromptPurpose, text: String) {
        self.prompt = Some(Prompt::with_text(
            purpose,
            text,
            Palette::for_theme(app.theme),
        ));
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableBracketedPaste, Hide)?;
        info!("Terminal modes enabled (bracketed paste, hidden cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableBracketedPaste, Show);
    }
}

pub fn run(mut app: App) -> std::io::Result<()> {
    let mut tui = TuiState::new(&app);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new()
        .and_then(|_guard| event_loop(&mut terminal, &mut app, &mut tui));
    ratatui::restore();

    info!("EduHub shutting down");
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    app: &mut App,
    tui: &mut TuiState,
) -> std::io::Result<()> {
    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    // Animation timer
    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_downloading;
        if animating {
            needs_redraw = true;
        }

        // Only draw when something changed
        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, app, tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        if first_event.is_some() {
            needs_redraw = true;
        }
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            // Resize just needs a redraw (already flagged above)
            if matches!(event, TuiEvent::Resize) {
                continue;
            }

            if let Some(action) = route_event(app, tui, &event) {
                let effect = update(app, action);
                should_quit |= apply_effect(effect, app, &tx);
            }
        }

        // Handle background task actions (finished downloads, open failures)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(app, action);
            should_quit |= apply_effect(effect, app, &tx);
        }

        if should_quit {
            return Ok(());
        }
    }
}

/// Carry out an effect. Returns true when the app should exit.
fn apply_effect(effect: Effect, app: &App, tx: &mpsc::Sender<Action>) -> bool {
    match effect {
        Effect::None => false,
        Effect::Quit => true,
        Effect::StartDownload {
            url,
            destination,
            file_name,
        } => {
            spawn_download(app.fetcher.clone(), url, destination, file_name, tx.clone());
            false
        }
        Effect::Open(target) => {
            open_target(OsStr::new(&target), tx);
            false
        }
        Effect::OpenAll(targets) => {
            for target in &targets {
                open_target(OsStr::new(target), tx);
            }
            false
        }
        Effect::OpenPath(path) => {
            open_target(path.as_os_str(), tx);
            false
        }
    }
}

fn open_target(target: &OsStr, tx: &mpsc::Sender<Action>) {
    if let Err(e) = launcher::open(target) {
        let action = Action::OpenFailed {
            target: target.to_string_lossy().into_owned(),
            reason: e.to_string(),
        };
        if tx.send(action).is_err() {
            warn!("Failed to report open failure: receiver dropped");
        }
    }
}

fn spawn_download(
    fetcher: Arc<dyn Fetcher>,
    url: String,
    destination: PathBuf,
    file_name: String,
    tx: mpsc::Sender<Action>,
) {
    info!(
        "Spawning download via {}: {} -> {}",
        fetcher.name(),
        url,
        destination.display()
    );
    tokio::spawn(async move {
        let result = fetcher.fetch_and_save(&url, &destination).await;
        if tx
            .send(Action::DownloadFinished { file_name, result })
            .is_err()
        {
            warn!("Failed to send download result for {}: receiver dropped", url);
        }
    });
}

/// Route one input event to whichever layer owns the keyboard right now.
fn route_event(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    // ForceQuit (Ctrl+C) always quits
    if matches!(event, TuiEvent::ForceQuit) {
        return Some(Action::Quit);
    }

    if app.pending_overwrite.is_some() {
        return match event {
            TuiEvent::InputChar('y' | 'Y') => Some(Action::ConfirmOverwrite),
            TuiEvent::InputChar('n' | 'N') | TuiEvent::Escape => Some(Action::CancelOverwrite),
            _ => None,
        };
    }

    if app.notice.is_some() {
        return match event {
            TuiEvent::Submit | TuiEvent::Escape | TuiEvent::InputChar(' ') => {
                Some(Action::DismissNotice)
            }
            _ => None,
        };
    }

    if let Some(prompt) = tui.prompt.as_mut() {
        return match prompt.handle_event(event)? {
            PromptEvent::Cancel => {
                tui.prompt = None;
                None
            }
            PromptEvent::Submit(text) => {
                let purpose = tui.prompt.take()?.purpose;
                prompt_action(app, tui, purpose, text)
            }
        };
    }

    match event {
        TuiEvent::InputChar('q') => return Some(Action::Quit),
        TuiEvent::InputChar('t') => return Some(Action::ToggleTheme),
        TuiEvent::InputChar('/') => {
            tui.open_prompt(app, PromptPurpose::Search, String::new());
            return None;
        }
        TuiEvent::Tab | TuiEvent::BackTab => {
            tui.focus = match tui.focus {
                Focus::Sidebar => Focus::Main,
                Focus::Main => Focus::Sidebar,
            };
            return None;
        }
        _ => {}
    }

    match tui.focus {
        Focus::Sidebar => {
            let item = tui.sidebar.handle_event(event, &tui.sidebar_items)?;
            tui.focus = Focus::Main;
            Some(match item {
                SidebarItem::Home => Action::ShowHome,
                SidebarItem::Subject(name) => {
                    tui.subject.reset();
                    Action::SelectSubject(name)
                }
                SidebarItem::Quiz => {
                    tui.quiz.menu.reset();
                    Action::ShowQuizMenu
                }
                SidebarItem::Downloads => {
                    tui.downloads.selection.reset();
                    Action::ShowDownloads
                }
                SidebarItem::About => Action::ShowAbout,
            })
        }
        Focus::Main => {
            if matches!(event, TuiEvent::Escape) {
                tui.focus = Focus::Sidebar;
                return None;
            }
            route_main(app, tui, event)
        }
    }
}

fn route_main(app: &App, tui: &mut TuiState, event: &TuiEvent) -> Option<Action> {
    match &app.view {
        View::Home | View::About => None,
        View::Subject(name) => {
            let subject = app.catalog.subject(name).ok()?;
            let subject_event = tui.subject.handle_event(event, subject)?;
            resource_action(app, tui, subject_event)
        }
        View::Search { hits, .. } => match tui.search.handle_event(event, hits)? {
            SearchEvent::Open(url) => resource_action(app, tui, SubjectEvent::Open(url)),
            SearchEvent::Download(url) => resource_action(app, tui, SubjectEvent::Download(url)),
            SearchEvent::OpenAll => Some(Action::OpenAllResults),
        },
        View::QuizMenu => {
            let subjects: Vec<&str> = app.catalog.quiz_subjects().collect();
            match tui.quiz.handle_menu_event(event, &subjects)? {
                QuizEvent::Start(name) => Some(Action::StartQuiz(name)),
                _ => None,
            }
        }
        View::Quiz => {
            let session = app.quiz.as_ref()?;
            match tui.quiz.handle_question_event(event, session)? {
                QuizEvent::Answer(option) => Some(Action::SubmitAnswer(option)),
                _ => None,
            }
        }
        View::QuizResult => match tui.quiz.handle_result_event(event)? {
            QuizEvent::Again => {
                tui.quiz.menu.reset();
                Some(Action::ShowQuizMenu)
            }
            _ => None,
        },
        View::Downloads => match tui.downloads.handle_event(event, &app.entries)? {
            DownloadsEvent::Open(name) => Some(Action::OpenDownload(name)),
            DownloadsEvent::Delete(name) => Some(Action::DeleteDownload(name)),
            DownloadsEvent::Reload => Some(Action::RefreshDownloads),
            DownloadsEvent::Rename(name) => {
                let text = name.to_string_lossy().into_owned();
                tui.open_prompt(app, PromptPurpose::Rename { from: name }, text);
                None
            }
            DownloadsEvent::Add => {
                tui.open_prompt(app, PromptPurpose::AddFile, String::new());
                None
            }
            DownloadsEvent::FetchUrl => {
                tui.open_prompt(app, PromptPurpose::FetchUrl, String::new());
                None
            }
            DownloadsEvent::Filter => {
                tui.open_prompt(
                    app,
                    PromptPurpose::FilterDownloads,
                    app.download_filter.clone(),
                );
                None
            }
        },
    }
}

fn resource_action(app: &App, tui: &mut TuiState, event: SubjectEvent) -> Option<Action> {
    match event {
        SubjectEvent::Open(url) => Some(Action::OpenResource(url)),
        SubjectEvent::Download(url) => {
            let name = suggested_file_name(&url);
            tui.open_prompt(app, PromptPurpose::SaveAs { url }, name);
            None
        }
    }
}

fn prompt_action(
    app: &App,
    tui: &mut TuiState,
    purpose: PromptPurpose,
    text: String,
) -> Option<Action> {
    match purpose {
        PromptPurpose::Search => {
            tui.search.selection.reset();
            tui.focus = Focus::Main;
            Some(Action::SearchResources(text))
        }
        PromptPurpose::FilterDownloads => {
            tui.downloads.selection.reset();
            Some(Action::FilterDownloads(text))
        }
        PromptPurpose::Rename { from } => Some(Action::RenameDownload { from, to: text }),
        PromptPurpose::AddFile => Some(Action::AddFile(expand_home(&text))),
        PromptPurpose::FetchUrl => {
            let name = suggested_file_name(&text);
            tui.open_prompt(app, PromptPurpose::SaveAs { url: text }, name);
            None
        }
        PromptPurpose::SaveAs { url } => Some(Action::RequestDownload {
            url,
            file_name: text,
        }),
    }
}

/// Expand a leading `~` to the home directory.
fn expand_home(input: &str) -> PathBuf {
    let rest = match input.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest.trim_start_matches('/'),
        _ => return PathBuf::from(input),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(Path::new(rest)),
        None => PathBuf::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::test_app;
    use std::fs;

    fn type_text(app: &App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            assert_eq!(route_event(app, tui, &TuiEvent::InputChar(c)), None);
        }
    }

    #[test]
    fn test_force_quit_always_wins() {
        let (mut app, _s) = test_app();
        app.notice = Some(crate::core::state::Notice::info("x", "y"));
        let mut tui = TuiState::new(&app);
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::ForceQuit),
            Some(Action::Quit)
        );
    }

    #[test]
    fn test_sidebar_opens_subject_and_focuses_main() {
        let (app, _s) = test_app();
        let mut tui = TuiState::new(&app);
        route_event(&app, &mut tui, &TuiEvent::CursorDown);
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::SelectSubject("Mathematics".into()))
        );
        assert_eq!(tui.focus, Focus::Main);
        route_event(&app, &mut tui, &TuiEvent::Escape);
        assert_eq!(tui.focus, Focus::Sidebar);
    }

    #[test]
    fn test_notice_swallows_keys_until_dismissed() {
        let (mut app, _s) = test_app();
        app.notice = Some(crate::core::state::Notice::info("Search", "Enter a search term."));
        let mut tui = TuiState::new(&app);
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar('q')), None);
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::DismissNotice)
        );
    }

    #[test]
    fn test_overwrite_prompt_keys() {
        let (mut app, _s) = test_app();
        app.pending_overwrite = Some(crate::core::state::PendingOverwrite::AddFile(
            PathBuf::from("/tmp/a.pdf"),
        ));
        let mut tui = TuiState::new(&app);
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::InputChar('y')),
            Some(Action::ConfirmOverwrite)
        );
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Escape),
            Some(Action::CancelOverwrite)
        );
    }

    #[test]
    fn test_search_prompt_flow() {
        let (app, _s) = test_app();
        let mut tui = TuiState::new(&app);
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar('/')), None);
        assert!(tui.prompt.is_some());

        // 'q' is text while the prompt is open
        type_text(&app, &mut tui, "quiz");
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::SearchResources("quiz".into()))
        );
        assert!(tui.prompt.is_none());
        assert_eq!(tui.focus, Focus::Main);
    }

    #[test]
    fn test_download_from_subject_asks_for_name() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::SelectSubject("Mathematics".into()));
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Main;

        assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar('d')), None);
        let prompt = tui.prompt.as_ref().unwrap();
        let url = app.catalog.lookup_resources("Mathematics").unwrap()[0].url.clone();
        assert_eq!(prompt.purpose, PromptPurpose::SaveAs { url: url.clone() });

        let action = route_event(&app, &mut tui, &TuiEvent::Submit);
        assert_eq!(
            action,
            Some(Action::RequestDownload {
                url: url.clone(),
                file_name: suggested_file_name(&url),
            })
        );
    }

    #[test]
    fn test_quiz_through_routing() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::ShowQuizMenu);
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Main;

        let start = route_event(&app, &mut tui, &TuiEvent::Submit).unwrap();
        assert_eq!(start, Action::StartQuiz("Mathematics".into()));
        update(&mut app, start);

        let answer = route_event(&app, &mut tui, &TuiEvent::InputChar('1')).unwrap();
        assert!(matches!(answer, Action::SubmitAnswer(_)));
    }

    #[test]
    fn test_downloads_rename_prompt() {
        let (mut app, _s) = test_app();
        fs::write(app.downloads.dir().join("old.pdf"), "").unwrap();
        update(&mut app, Action::ShowDownloads);
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Main;

        assert_eq!(route_event(&app, &mut tui, &TuiEvent::InputChar('r')), None);
        assert_eq!(tui.prompt.as_ref().unwrap().buffer, "old.pdf");
        for _ in 0.."old.pdf".len() {
            route_event(&app, &mut tui, &TuiEvent::Backspace);
        }
        type_text(&app, &mut tui, "new.pdf");
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::RenameDownload {
                from: "old.pdf".into(),
                to: "new.pdf".into(),
            })
        );
    }

    #[test]
    fn test_fetch_url_then_save_as() {
        let (mut app, _s) = test_app();
        update(&mut app, Action::ShowDownloads);
        let mut tui = TuiState::new(&app);
        tui.focus = Focus::Main;

        route_event(&app, &mut tui, &TuiEvent::InputChar('u'));
        route_event(
            &app,
            &mut tui,
            &TuiEvent::Paste("https://example.com/notes/physics.pdf".into()),
        );
        assert_eq!(route_event(&app, &mut tui, &TuiEvent::Submit), None);
        assert_eq!(tui.prompt.as_ref().unwrap().buffer, "physics.pdf");
        assert_eq!(
            route_event(&app, &mut tui, &TuiEvent::Submit),
            Some(Action::RequestDownload {
                url: "https://example.com/notes/physics.pdf".into(),
                file_name: "physics.pdf".into(),
            })
        );
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home("/tmp/a.pdf"), PathBuf::from("/tmp/a.pdf"));
        assert_eq!(expand_home("~user/a.pdf"), PathBuf::from("~user/a.pdf"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home("~/a.pdf"), home.join("a.pdf"));
            assert_eq!(expand_home("~"), home);
        }
    }

    #[tokio::test]
    async fn test_spawn_download_reports_back() {
        let (app, scratch) = test_app();
        let (tx, rx) = mpsc::channel();
        let destination = scratch.path().join("downloads").join("a.pdf");
        spawn_download(
            app.fetcher.clone(),
            "https://example.com/a.pdf".into(),
            destination.clone(),
            "a.pdf".into(),
            tx,
        );

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(
            action,
            Action::DownloadFinished {
                file_name: "a.pdf".into(),
                result: Ok(0),
            }
        );
        assert!(destination.exists());
    }
}
