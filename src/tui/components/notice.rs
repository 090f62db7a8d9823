//! # Notice Overlay
//!
//! Modal popup for a `Notice`. While an overwrite is pending the footer
//! asks y/n instead of offering to dismiss.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::core::state::Notice;
use crate::tui::component::{Component, centered_band};
use crate::tui::theme::Palette;

pub struct NoticeOverlay<'a> {
    notice: &'a Notice,
    confirm: bool,
    palette: Palette,
}

impl<'a> NoticeOverlay<'a> {
    pub fn new(notice: &'a Notice, confirm: bool, palette: Palette) -> Self {
        Self {
            notice,
            confirm,
            palette,
        }
    }
}

impl Component for NoticeOverlay<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let color = self.palette.level(self.notice.level);
        let footer = if self.confirm {
            " y Overwrite  n Keep existing "
        } else {
            " Enter/Esc Dismiss "
        };

        let body_lines = self.notice.body.lines().count().max(1) as u16;
        let overlay = centered_band(60, body_lines + 4, area);
        frame.render_widget(Clear, overlay);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                format!(" {} ", self.notice.title),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(footer).centered());

        let body = Paragraph::new(self.notice.body.as_str())
            .block(block)
            .style(self.palette.base())
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        frame.render_widget(body, overlay);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render(notice: &Notice, confirm: bool) -> String {
        let backend = TestBackend::new(80, 20);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                NoticeOverlay::new(notice, confirm, Palette::for_theme(Theme::Light))
                    .render(f, f.area())
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_notice_dismiss_footer() {
        let text = render(&Notice::success("Correct!", "Your answer is correct!"), false);
        assert!(text.contains("Correct!"));
        assert!(text.contains("Your answer is correct!"));
        assert!(text.contains("Dismiss"));
    }

    #[test]
    fn test_notice_confirm_footer() {
        let text = render(&Notice::warning("File exists", "Overwrite a.pdf?"), true);
        assert!(text.contains("y Overwrite"));
    }
}
