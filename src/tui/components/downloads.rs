//! # Downloads Manager Component
//!
//! Lists the downloads directory and turns keys into file operations.
//! Deleting takes two presses of `d`.
//!
//! Follows the persistent state + transient wrapper pattern:
//! - `DownloadsState` lives in `TuiState`
//! - `DownloadsView` is created each frame with borrowed state

use std::ffi::OsString;
use std::time::SystemTime;

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Padding, Paragraph};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::downloads::DownloadEntry;
use crate::tui::component::Selection;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

/// Persistent state for the downloads view.
#[derive(Default)]
pub struct DownloadsState {
    pub selection: Selection,
    pub confirm_delete: bool,
}

impl DownloadsState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle a key event, returning a DownloadsEvent if the view should act.
    pub fn handle_event(
        &mut self,
        event: &TuiEvent,
        entries: &[DownloadEntry],
    ) -> Option<DownloadsEvent> {
        // Reset delete confirmation on any non-delete key
        let is_delete_key = matches!(event, TuiEvent::InputChar('d'));
        if !is_delete_key {
            self.confirm_delete = false;
        }

        let selected = self
            .selection
            .get(entries.len())
            .map(|i| entries[i].name.clone());

        match event {
            TuiEvent::CursorUp => {
                self.selection.up(entries.len());
                None
            }
            TuiEvent::CursorDown => {
                self.selection.down(entries.len());
                None
            }
            TuiEvent::Submit => selected.map(DownloadsEvent::Open),
            TuiEvent::InputChar('r') => selected.map(DownloadsEvent::Rename),
            TuiEvent::InputChar('a') => Some(DownloadsEvent::Add),
            TuiEvent::InputChar('u') => Some(DownloadsEvent::FetchUrl),
            TuiEvent::InputChar('f') => Some(DownloadsEvent::Filter),
            TuiEvent::InputChar('l') => Some(DownloadsEvent::Reload),
            TuiEvent::InputChar('d') => {
                let name = selected?;
                if self.confirm_delete {
                    self.confirm_delete = false;
                    Some(DownloadsEvent::Delete(name))
                } else {
                    self.confirm_delete = true;
                    None
                }
            }
            _ => None,
        }
    }
}

/// Events emitted by the downloads view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadsEvent {
    Open(OsString),
    Rename(OsString),
    Delete(OsString),
    Add,
    FetchUrl,
    Filter,
    Reload,
}

/// Transient render wrapper for the downloads view.
pub struct DownloadsView<'a> {
    state: &'a mut DownloadsState,
    entries: &'a [DownloadEntry],
    filter: &'a str,
    palette: Palette,
    focused: bool,
}

impl<'a> DownloadsView<'a> {
    pub fn new(
        state: &'a mut DownloadsState,
        entries: &'a [DownloadEntry],
        filter: &'a str,
        palette: Palette,
        focused: bool,
    ) -> Self {
        Self {
            state,
            entries,
            filter,
            palette,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.selection.sync(self.entries.len());

        let help_text = if self.state.confirm_delete {
            " Press d again to confirm delete | any other key cancels "
        } else {
            " Enter Open  r Rename  dd Delete  a Add  u URL  f Filter  l Reload "
        };

        let title = if self.filter.is_empty() {
            " My Downloads ".to_string()
        } else {
            format!(" My Downloads (filter: {}) ", self.filter)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border(self.focused))
            .title(title)
            .title_alignment(Alignment::Left)
            .title_bottom(Line::from(help_text).centered())
            .padding(Padding::horizontal(1));

        if self.entries.is_empty() {
            let message = if self.filter.is_empty() {
                "No downloads or uploaded files yet."
            } else {
                "No files match the filter."
            };
            let empty = Paragraph::new(message)
                .style(Style::default().fg(self.palette.muted).bg(self.palette.bg))
                .alignment(Alignment::Center)
                .block(block);
            frame.render_widget(empty, area);
            return;
        }

        // Layout: "<name>   12.5 KB  Jan 15 09:30"
        let inner_width = area.width.saturating_sub(4) as usize; // borders + padding
        let items: Vec<ListItem> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, entry)| {
                let size = format_size(entry.size);
                let date = entry.modified.map(format_timestamp).unwrap_or_default();
                let fixed_width = 2 + 9 + 2 + date.width();
                let name_width = inner_width.saturating_sub(fixed_width);
                let name = truncate_str(&entry.file_name, name_width);
                let padding = name_width.saturating_sub(name.width());

                let style = if i == self.state.selection.selected {
                    if self.state.confirm_delete {
                        Style::default()
                            .fg(self.palette.error)
                            .add_modifier(Modifier::BOLD | Modifier::REVERSED)
                    } else {
                        self.palette.selected()
                    }
                } else {
                    self.palette.base()
                };

                ListItem::new(Line::from(vec![
                    Span::styled(name, style),
                    Span::styled(" ".repeat(padding + 2), style),
                    Span::styled(format!("{size:>9}"), style),
                    Span::styled("  ", style),
                    Span::styled(date, style),
                ]))
            })
            .collect();

        let list = List::new(items).block(block).style(self.palette.base());
        frame.render_stateful_widget(list, area, &mut self.state.selection.list_state);
    }
}

/// Format a modification time as "Jan 15 09:30" in local time.
fn format_timestamp(ts: SystemTime) -> String {
    use chrono::{DateTime, Local};
    let dt: DateTime<Local> = ts.into();
    dt.format("%b %d %H:%M").to_string()
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}

/// Truncate a string to fit within `max_width` columns, adding "..." if needed.
fn truncate_str(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }

    let budget = max_width - 3;
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Theme;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;
    use std::path::PathBuf;

    fn entry(name: &str, size: u64) -> DownloadEntry {
        DownloadEntry {
            name: OsString::from(name),
            file_name: name.to_string(),
            path: PathBuf::from("/downloads").join(name),
            size,
            modified: None,
        }
    }

    #[test]
    fn test_delete_needs_two_presses() {
        let entries = vec![entry("a.pdf", 1), entry("b.pdf", 2)];
        let mut state = DownloadsState::new();
        state.handle_event(&TuiEvent::CursorDown, &entries);

        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &entries), None);
        assert!(state.confirm_delete);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d'), &entries),
            Some(DownloadsEvent::Delete("b.pdf".into()))
        );
        assert!(!state.confirm_delete);
    }

    #[test]
    fn test_other_key_cancels_delete() {
        let entries = vec![entry("a.pdf", 1)];
        let mut state = DownloadsState::new();
        state.handle_event(&TuiEvent::InputChar('d'), &entries);
        state.handle_event(&TuiEvent::CursorUp, &entries);
        assert!(!state.confirm_delete);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &entries), None);
    }

    #[test]
    fn test_empty_list_events() {
        let mut state = DownloadsState::new();
        assert_eq!(state.handle_event(&TuiEvent::Submit, &[]), None);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('d'), &[]), None);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('a'), &[]),
            Some(DownloadsEvent::Add)
        );
    }

    #[test]
    fn test_open_and_rename_selected() {
        let entries = vec![entry("a.pdf", 1)];
        let mut state = DownloadsState::new();
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &entries),
            Some(DownloadsEvent::Open("a.pdf".into()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('r'), &entries),
            Some(DownloadsEvent::Rename("a.pdf".into()))
        );
    }

    #[test]
    fn test_events_carry_exact_on_disk_name() {
        let entries = vec![entry("notes.pdf ", 1)];
        let mut state = DownloadsState::new();
        state.handle_event(&TuiEvent::InputChar('d'), &entries);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d'), &entries),
            Some(DownloadsEvent::Delete(OsString::from("notes.pdf ")))
        );
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.0 KB");
        assert_eq!(format_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_truncate_str() {
        assert_eq!(truncate_str("short.pdf", 20), "short.pdf");
        assert_eq!(truncate_str("a-very-long-name.pdf", 10), "a-very-...");
        assert_eq!(truncate_str("abc", 2), "..");
        assert_eq!(truncate_str("日本語のファイル", 7), "日本...");
    }

    #[test]
    fn test_render_empty_and_listing() {
        let palette = Palette::for_theme(Theme::Light);
        let mut state = DownloadsState::new();

        let backend = TestBackend::new(80, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| DownloadsView::new(&mut state, &[], "", palette, true).render(f, f.area()))
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("No downloads or uploaded files yet."));

        let entries = vec![entry("algebra.pdf", 2048)];
        terminal
            .draw(|f| {
                DownloadsView::new(&mut state, &entries, "alg", palette, true).render(f, f.area())
            })
            .unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("algebra.pdf"));
        assert!(text.contains("2.0 KB"));
        assert!(text.contains("filter: alg"));
    }
}
