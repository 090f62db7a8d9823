//! # Landing Page Component
//!
//! Welcome text and a quote, picked once per run.

use rand::seq::SliceRandom;
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use crate::tui::component::Component;
use crate::tui::theme::Palette;

pub const QUOTES: [&str; 3] = [
    "Education is the most powerful weapon which you can use to change the world. - Nelson Mandela",
    "The beautiful thing about learning is that no one can take it away from you. - B.B. King",
    "Live as if you were to die tomorrow. Learn as if you were to live forever. - Mahatma Gandhi",
];

pub fn random_quote() -> &'static str {
    QUOTES
        .choose(&mut rand::thread_rng())
        .copied()
        .unwrap_or(QUOTES[0])
}

const WELCOME: [&str; 9] = [
    "This application provides educational information on various subjects.",
    "",
    "Select a subject from the sidebar to explore topics and resources.",
    "",
    "- Detailed explanations and examples for each topic",
    "- Curriculum links for Geography, Kiswahili, Civics, History and English",
    "- Interactive quizzes to test your knowledge",
    "- A downloads library for saved resources",
    "",
];

pub struct LandingPage {
    quote: &'static str,
    palette: Palette,
}

impl LandingPage {
    pub fn new(quote: &'static str, palette: Palette) -> Self {
        Self { quote, palette }
    }
}

impl Component for LandingPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut lines = vec![
            Line::from(Span::styled(
                "Welcome to EduHub!",
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
        ];
        lines.extend(WELCOME.iter().map(|l| Line::from(*l)));
        lines.push(Line::from(Span::styled(
            format!("v{}", env!("CARGO_PKG_VERSION")),
            Style::default().fg(self.palette.muted),
        )));

        let text_height = lines.len() as u16;
        let [text_area, _, quote_area] = Layout::vertical([
            Constraint::Length(text_height),
            Constraint::Length(1),
            Constraint::Length(5),
        ])
        .flex(Flex::Center)
        .areas(area);

        let welcome = Paragraph::new(lines)
            .style(self.palette.base())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: false });
        frame.render_widget(welcome, text_area);

        let [_, quote_area, _] = Layout::horizontal([
            Constraint::Percentage(10),
            Constraint::Percentage(80),
            Constraint::Percentage(10),
        ])
        .areas(quote_area);

        let quote = Paragraph::new(Span::styled(
            self.quote,
            Style::default().add_modifier(Modifier::ITALIC),
        ))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.palette.muted)),
        )
        .style(self.palette.base())
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
        frame.render_widget(quote, quote_area);
    }
}

/// Static About page.
pub struct AboutPage {
    palette: Palette,
}

impl AboutPage {
    pub fn new(palette: Palette) -> Self {
        Self { palette }
    }
}

impl Component for AboutPage {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let lines = vec![
            Line::from(Span::styled(
                "About EduHub",
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from("EduHub is a terminal study companion."),
            Line::default(),
            Line::from("- Notes on Mathematics, Science and Programming"),
            Line::from("- Interactive quizzes with instant feedback"),
            Line::from("- Links to NECTA, TIE and other online resources"),
            Line::from("- Download and manage resources offline"),
            Line::default(),
            Line::from(format!("Version: {}", env!("CARGO_PKG_VERSION"))),
            Line::default(),
            Line::from(Span::styled(
                "Press Esc to return to the sidebar.",
                Style::default().fg(self.palette.muted),
            )),
        ];

        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" About "))
            .style(self.palette.base())
            .wrap(Wrap { trim: false });
        frame.render_widget(paragraph, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_random_quote_is_known() {
        assert!(QUOTES.contains(&random_quote()));
    }

    #[test]
    fn test_landing_renders_quote() {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut page = LandingPage::new(QUOTES[2], Palette::for_theme(Theme::Light));
        terminal.draw(|f| page.render(f, f.area())).unwrap();

        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("Welcome to EduHub!"));
        assert!(text.contains("Gandhi"));
    }
}
