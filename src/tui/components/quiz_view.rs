//! # Quiz Views
//!
//! Three screens share this file: the subject menu, the question screen and
//! the results screen. Menu and question keep a cursor in `QuizViewState`.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::core::quiz::{QuizResult, QuizSession, Tier};
use crate::tui::component::Selection;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuizEvent {
    Start(String),
    Answer(String),
    /// "Take Another Quiz" from the results screen
    Again,
}

#[derive(Default)]
pub struct QuizViewState {
    pub menu: Selection,
    pub option: Selection,
}

impl QuizViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle_menu_event(&mut self, event: &TuiEvent, subjects: &[&str]) -> Option<QuizEvent> {
        match event {
            TuiEvent::CursorUp => {
                self.menu.up(subjects.len());
                None
            }
            TuiEvent::CursorDown => {
                self.menu.down(subjects.len());
                None
            }
            TuiEvent::Submit => {
                let start = self
                    .menu
                    .get(subjects.len())
                    .map(|i| QuizEvent::Start(subjects[i].to_string()));
                if start.is_some() {
                    self.option.reset();
                }
                start
            }
            _ => None,
        }
    }

    pub fn handle_question_event(
        &mut self,
        event: &TuiEvent,
        session: &QuizSession,
    ) -> Option<QuizEvent> {
        let options = session.current_question().ok()?.options();
        match event {
            TuiEvent::CursorUp => {
                self.option.up(options.len());
                None
            }
            TuiEvent::CursorDown => {
                self.option.down(options.len());
                None
            }
            // 1-9 picks an option directly
            TuiEvent::InputChar(c) if c.is_ascii_digit() => {
                let n = c.to_digit(10)? as usize;
                let index = n.checked_sub(1).filter(|i| *i < options.len())?;
                self.option.reset();
                Some(QuizEvent::Answer(options[index].clone()))
            }
            TuiEvent::Submit => {
                let answer = self
                    .option
                    .get(options.len())
                    .map(|i| QuizEvent::Answer(options[i].clone()));
                self.option.reset();
                answer
            }
            _ => None,
        }
    }

    pub fn handle_result_event(&mut self, event: &TuiEvent) -> Option<QuizEvent> {
        match event {
            TuiEvent::Submit => Some(QuizEvent::Again),
            _ => None,
        }
    }
}

fn frame_block(palette: &Palette, title: &str, focused: bool) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(focused))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(palette.accent)
                .add_modifier(Modifier::BOLD),
        ))
}

pub fn render_menu(
    frame: &mut Frame,
    area: Rect,
    state: &mut QuizViewState,
    subjects: &[&str],
    palette: Palette,
    focused: bool,
) {
    state.menu.sync(subjects.len());
    let items: Vec<ListItem> = subjects
        .iter()
        .map(|s| ListItem::new(Line::from(format!(" {s} Quiz"))))
        .collect();

    let list = List::new(items)
        .block(
            frame_block(&palette, "Select a Subject for the Quiz", focused)
                .title_bottom(Line::from(" Enter Start ").centered()),
        )
        .style(palette.base())
        .highlight_style(palette.selected());
    frame.render_stateful_widget(list, area, &mut state.menu.list_state);
}

pub fn render_question(
    frame: &mut Frame,
    area: Rect,
    state: &mut QuizViewState,
    session: &QuizSession,
    palette: Palette,
    focused: bool,
) {
    let (number, total) = session.progress();
    let block = frame_block(&palette, &format!("{} Quiz", session.subject()), focused)
        .title_bottom(Line::from(" Up/Down Choose  Enter Submit Answer ").centered());
    let inner = block.inner(area);
    frame.render_widget(block.style(palette.base()), area);

    let Ok(question) = session.current_question() else {
        return;
    };

    let [heading_area, prompt_area, options_area] = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Min(0),
    ])
    .areas(inner);

    let heading = Paragraph::new(format!("Question {number} of {total}"))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    frame.render_widget(heading, heading_area);

    let prompt = Paragraph::new(question.prompt())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(prompt, prompt_area);

    state.option.sync(question.options().len());
    let items: Vec<ListItem> = question
        .options()
        .iter()
        .enumerate()
        .map(|(i, option)| {
            let marker = if state.option.selected == i { "(•)" } else { "( )" };
            ListItem::new(Line::from(format!("   {marker} {}. {option}", i + 1)))
        })
        .collect();
    let list = List::new(items).highlight_style(palette.selected());
    frame.render_stateful_widget(list, options_area, &mut state.option.list_state);
}

pub fn render_result(
    frame: &mut Frame,
    area: Rect,
    result: Option<&QuizResult>,
    palette: Palette,
    focused: bool,
) {
    let block = frame_block(&palette, "Quiz Results", focused)
        .title_bottom(Line::from(" Enter Take Another Quiz ").centered());

    let lines = match result {
        Some(result) => {
            let color = match result.tier {
                Tier::Top => palette.success,
                Tier::Middle => palette.warning,
                Tier::Bottom => palette.error,
            };
            vec![
                Line::default(),
                Line::from(format!(
                    "You scored {} out of {} in {}!",
                    result.score, result.total, result.subject
                )),
                Line::from(format!("{}%", result.percentage)),
                Line::default(),
                Line::from(Span::styled(
                    result.tier.feedback(),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                )),
            ]
        }
        None => vec![Line::from("No quiz has been completed yet.")],
    };

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(palette.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use crate::core::catalog::Catalog;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn session() -> QuizSession {
        let catalog = Catalog::builtin();
        let subject = catalog.subject("Programming").unwrap();
        QuizSession::start_with_rng(subject, &mut StdRng::seed_from_u64(7)).unwrap()
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_menu_start() {
        let mut state = QuizViewState::new();
        let subjects = ["Mathematics", "Science", "Programming"];
        state.handle_menu_event(&TuiEvent::CursorDown, &subjects);
        assert_eq!(
            state.handle_menu_event(&TuiEvent::Submit, &subjects),
            Some(QuizEvent::Start("Science".into()))
        );
    }

    #[test]
    fn test_answer_with_cursor() {
        let session = session();
        let mut state = QuizViewState::new();
        let options = session.current_question().unwrap().options().to_vec();

        state.handle_question_event(&TuiEvent::CursorDown, &session);
        assert_eq!(
            state.handle_question_event(&TuiEvent::Submit, &session),
            Some(QuizEvent::Answer(options[1].clone()))
        );
        assert_eq!(state.option.selected, 0);
    }

    #[test]
    fn test_answer_with_digit() {
        let session = session();
        let mut state = QuizViewState::new();
        let options = session.current_question().unwrap().options().to_vec();

        assert_eq!(
            state.handle_question_event(&TuiEvent::InputChar('3'), &session),
            Some(QuizEvent::Answer(options[2].clone()))
        );
        assert_eq!(state.handle_question_event(&TuiEvent::InputChar('9'), &session), None);
        assert_eq!(state.handle_question_event(&TuiEvent::InputChar('0'), &session), None);
    }

    #[test]
    fn test_render_question_heading() {
        let session = session();
        let mut state = QuizViewState::new();
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                render_question(
                    f,
                    f.area(),
                    &mut state,
                    &session,
                    Palette::for_theme(Theme::Light),
                    true,
                )
            })
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Question 1 of 3"));
        assert!(text.contains("Programming Quiz"));
    }

    #[test]
    fn test_render_result_feedback() {
        let result = QuizResult {
            subject: "Science".into(),
            score: 3,
            total: 3,
            percentage: 100,
            tier: Tier::Top,
        };
        let backend = TestBackend::new(80, 12);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| render_result(f, f.area(), Some(&result), Palette::for_theme(Theme::Dark), true))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("You scored 3 out of 3 in Science!"));
        assert!(text.contains("Excellent job!"));
    }
}
