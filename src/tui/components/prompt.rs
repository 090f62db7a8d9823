//! # Prompt Component
//!
//! One-line text entry shown as an overlay: search terms, filters, new file
//! names, paths and URLs. `purpose` decides what the submitted text becomes.
//!
//! The cursor is a byte offset into `buffer`, always on a char boundary.
//! Display columns come from `unicode-width` so wide characters line up.

use std::ffi::OsString;

use ratatui::Frame;
use ratatui::layout::{Position, Rect};
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler, centered_band};
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// What the prompt is collecting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPurpose {
    Search,
    FilterDownloads,
    Rename { from: OsString },
    AddFile,
    FetchUrl,
    SaveAs { url: String },
}

impl PromptPurpose {
    pub fn title(&self) -> String {
        match self {
            PromptPurpose::Search => "Search resources".to_string(),
            PromptPurpose::FilterDownloads => "Filter downloads (empty shows all)".to_string(),
            PromptPurpose::Rename { from } => format!("Rename {} to", from.to_string_lossy()),
            PromptPurpose::AddFile => "Path of the file to add".to_string(),
            PromptPurpose::FetchUrl => "URL to download".to_string(),
            PromptPurpose::SaveAs { .. } => "Save as".to_string(),
        }
    }

    /// Whether submitting an empty line means something.
    fn allows_empty(&self) -> bool {
        matches!(self, PromptPurpose::FilterDownloads)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptEvent {
    Submit(String),
    Cancel,
}

pub struct Prompt {
    pub purpose: PromptPurpose,
    pub buffer: String,
    /// Byte offset into `buffer`
    cursor: usize,
    palette: Palette,
}

impl Prompt {
    pub fn new(purpose: PromptPurpose, palette: Palette) -> Self {
        Self::with_text(purpose, String::new(), palette)
    }

    /// A prompt pre-filled with `text`, cursor at the end.
    pub fn with_text(purpose: PromptPurpose, text: String, palette: Palette) -> Self {
        let cursor = text.len();
        Self {
            purpose,
            buffer: text,
            cursor,
            palette,
        }
    }

    pub fn set_palette(&mut self, palette: Palette) {
        self.palette = palette;
    }

    fn prev_boundary(&self) -> usize {
        self.buffer[..self.cursor]
            .char_indices()
            .next_back()
            .map(|(i, _)| i)
            .unwrap_or(0)
    }

    fn next_boundary(&self) -> usize {
        self.buffer[self.cursor..]
            .chars()
            .next()
            .map(|c| self.cursor + c.len_utf8())
            .unwrap_or(self.buffer.len())
    }
}

impl EventHandler for Prompt {
    type Event = PromptEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::Escape => Some(PromptEvent::Cancel),
            TuiEvent::Submit => {
                let text = self.buffer.trim();
                if text.is_empty() && !self.purpose.allows_empty() {
                    None
                } else {
                    Some(PromptEvent::Submit(text.to_string()))
                }
            }
            TuiEvent::InputChar(c) => {
                self.buffer.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                None
            }
            TuiEvent::Paste(text) => {
                // Single line: pasted newlines become spaces
                let text = text.replace(['\r', '\n'], " ");
                self.buffer.insert_str(self.cursor, &text);
                self.cursor += text.len();
                None
            }
            TuiEvent::Backspace => {
                if self.cursor > 0 {
                    let prev = self.prev_boundary();
                    self.buffer.drain(prev..self.cursor);
                    self.cursor = prev;
                }
                None
            }
            TuiEvent::Delete => {
                if self.cursor < self.buffer.len() {
                    let next = self.next_boundary();
                    self.buffer.drain(self.cursor..next);
                }
                None
            }
            TuiEvent::CursorLeft => {
                self.cursor = self.prev_boundary();
                None
            }
            TuiEvent::CursorRight => {
                self.cursor = self.next_boundary();
                None
            }
            TuiEvent::Home => {
                self.cursor = 0;
                None
            }
            TuiEvent::End => {
                self.cursor = self.buffer.len();
                None
            }
            _ => None,
        }
    }
}

impl Component for Prompt {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let overlay = centered_band(60, 3, area);
        frame.render_widget(Clear, overlay);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(self.palette.highlight))
            .title(format!(" {} ", self.purpose.title()))
            .title_bottom(Line::from(" Enter OK  Esc Cancel ").centered());
        let inner = block.inner(overlay);

        // Scroll horizontally so the cursor stays visible
        let before = self.buffer[..self.cursor].width() as u16;
        let scroll = before.saturating_sub(inner.width.saturating_sub(1));

        let input = Paragraph::new(self.buffer.as_str())
            .block(block)
            .style(self.palette.base())
            .scroll((0, scroll));
        frame.render_widget(input, overlay);

        frame.set_cursor_position(Position::new(inner.x + before - scroll, inner.y));
    }
}
