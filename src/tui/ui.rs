use crate::core::state::{App, View};
use crate::tui::component::Component;
use crate::tui::components::{
    AboutPage, DownloadsView, LandingPage, NoticeOverlay, Sidebar, SubjectView, TitleBar,
    quiz_view, search_view,
};
use crate::tui::theme::Palette;
use crate::tui::{Focus, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::Style;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};

const SIDEBAR_WIDTH: u16 = 22;

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let palette = Palette::for_theme(app.theme);

    frame.render_widget(Block::default().style(palette.base()), frame.area());

    let [title_area, body_area, status_area] =
        Layout::vertical([Length(1), Min(0), Length(1)]).areas(frame.area());
    let [sidebar_area, main_area] =
        Layout::horizontal([Length(SIDEBAR_WIDTH), Min(0)]).areas(body_area);

    TitleBar::new(app.theme, app.is_downloading, spinner_frame).render(frame, title_area);

    Sidebar::new(
        &mut tui.sidebar,
        &tui.sidebar_items,
        palette,
        tui.focus == Focus::Sidebar,
    )
    .render(frame, sidebar_area);

    draw_main(frame, main_area, app, tui, palette);
    draw_status_bar(frame, status_area, app, tui, palette);

    // Overlays, topmost last
    if let Some(prompt) = tui.prompt.as_mut() {
        prompt.set_palette(palette);
        prompt.render(frame, main_area);
    }
    if let Some(notice) = &app.notice {
        NoticeOverlay::new(notice, app.pending_overwrite.is_some(), palette)
            .render(frame, frame.area());
    }
}

fn draw_main(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState, palette: Palette) {
    let focused = tui.focus == Focus::Main;
    match &app.view {
        View::Home => LandingPage::new(tui.quote, palette).render(frame, area),
        View::About => AboutPage::new(palette).render(frame, area),
        View::Subject(name) => match app.catalog.subject(name) {
            Ok(subject) => {
                SubjectView::new(&mut tui.subject, subject, palette, focused).render(frame, area)
            }
            Err(e) => draw_error_view(frame, area, &e.to_string()),
        },
        View::QuizMenu => {
            let subjects: Vec<&str> = app.catalog.quiz_subjects().collect();
            quiz_view::render_menu(frame, area, &mut tui.quiz, &subjects, palette, focused);
        }
        View::Quiz => match &app.quiz {
            Some(session) => {
                quiz_view::render_question(frame, area, &mut tui.quiz, session, palette, focused)
            }
            None => draw_error_view(frame, area, "No quiz in progress."),
        },
        View::QuizResult => {
            quiz_view::render_result(frame, area, app.quiz_result().ok(), palette, focused)
        }
        View::Downloads => DownloadsView::new(
            &mut tui.downloads,
            &app.entries,
            &app.download_filter,
            palette,
            focused,
        )
        .render(frame, area),
        View::Search { query, hits } => {
            search_view::render(frame, area, &mut tui.search, query, hits, palette, focused)
        }
    }
}

fn draw_error_view(frame: &mut Frame, area: Rect, error_msg: &str) {
    use ratatui::layout::Alignment;

    let error_paragraph = Paragraph::new(error_msg)
        .block(Block::bordered().title("ERROR"))
        .alignment(Alignment::Center);

    frame.render_widget(error_paragraph, area);
}

fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App, tui: &TuiState, palette: Palette) {
    let line = Line::from(vec![
        Span::raw(format!(" {} ", app.status_message)),
        Span::styled(
            format!("| {}", key_hints(tui.focus, &app.view)),
            Style::default().fg(palette.muted),
        ),
    ]);
    frame.render_widget(Paragraph::new(line).style(palette.base()), area);
}

/// Keys that do something right now.
pub fn key_hints(focus: Focus, view: &View) -> &'static str {
    match (focus, view) {
        (Focus::Sidebar, _) => "Enter Open  Tab Switch  / Search  t Theme  q Quit",
        (Focus::Main, View::Subject(_)) => "Left/Right Topic  Enter Open  d Download  Esc Back",
        (Focus::Main, View::Search { .. }) => "Enter Open  d Download  oo Open All  Esc Back",
        (Focus::Main, View::QuizMenu) => "Enter Start  Esc Back",
        (Focus::Main, View::Quiz) => "1-9 or Enter Answer  Esc Back",
        (Focus::Main, View::QuizResult) => "Enter Take Another Quiz  Esc Back",
        (Focus::Main, View::Downloads) => "dd Delete  r Rename  a Add  u URL  Esc Back",
        (Focus::Main, _) => "Tab Switch  / Search  t Theme  q Quit",
    }
}
