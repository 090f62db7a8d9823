//! # TitleBar Component
//!
//! Top bar showing the application name, the active theme and whether a
//! download is running.
//!
//! ## Design Decisions
//!
//! ### Stateless Component
//!
//! TitleBar is purely presentational. It receives all data as props and has
//! no internal state:
//!
//! ```rust,ignore
//! let mut title_bar = TitleBar::new(app.theme, app.is_downloading, spinner_frame);
//! title_bar.render(frame, area);
//! ```
//!
//! ### Props-in-Struct Pattern
//!
//! Rather than passing props as render() parameters, we store them as struct
//! fields so every component shares the `Component::render` signature.

use crate::Theme;
use crate::tui::component::Component;
use crate::tui::theme::Palette;
use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub struct TitleBar {
    pub theme: Theme,
    /// Whether a download is in flight
    pub is_downloading: bool,
    /// Animation tick for the download spinner
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(theme: Theme, is_downloading: bool, spinner_frame: usize) -> Self {
        Self {
            theme,
            is_downloading,
            spinner_frame,
        }
    }

    fn text(&self) -> String {
        let mut text = format!(
            " EduHub - Educational Resources | {} mode",
            self.theme.label()
        );
        if self.is_downloading {
            let spinner = SPINNER[self.spinner_frame % SPINNER.len()];
            text.push_str(&format!(" | {spinner} Downloading"));
        }
        text
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let palette = Palette::for_theme(self.theme);
        let line = Line::from(Span::raw(self.text()));
        frame.render_widget(Paragraph::new(line).style(palette.title()), area);
    }
}
