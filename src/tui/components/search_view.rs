//! # Search Results View
//!
//! Resource hits from every subject, tagged with the subject name.
//! Opening every hit at once takes two presses of `o`.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph};

use crate::core::catalog::ResourceMatch;
use crate::tui::component::Selection;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

#[derive(Default)]
pub struct SearchViewState {
    pub selection: Selection,
    pub confirm_open_all: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchEvent {
    Open(String),
    Download(String),
    OpenAll,
}

impl SearchViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Same keys as the subject resource list, plus `oo` for every hit.
    pub fn handle_event(&mut self, event: &TuiEvent, hits: &[ResourceMatch]) -> Option<SearchEvent> {
        if !matches!(event, TuiEvent::InputChar('o')) {
            self.confirm_open_all = false;
        }

        match event {
            TuiEvent::CursorUp => {
                self.selection.up(hits.len());
                None
            }
            TuiEvent::CursorDown => {
                self.selection.down(hits.len());
                None
            }
            TuiEvent::Submit => self
                .selection
                .get(hits.len())
                .map(|i| SearchEvent::Open(hits[i].resource.url.clone())),
            TuiEvent::InputChar('d') => self
                .selection
                .get(hits.len())
                .map(|i| SearchEvent::Download(hits[i].resource.url.clone())),
            TuiEvent::InputChar('o') if !hits.is_empty() => {
                if self.confirm_open_all {
                    self.confirm_open_all = false;
                    Some(SearchEvent::OpenAll)
                } else {
                    self.confirm_open_all = true;
                    None
                }
            }
            _ => None,
        }
    }
}

pub fn render(
    frame: &mut Frame,
    area: Rect,
    state: &mut SearchViewState,
    query: &str,
    hits: &[ResourceMatch],
    palette: Palette,
    focused: bool,
) {
    state.selection.sync(hits.len());

    let footer = if state.confirm_open_all {
        format!(" Press o again to open all {} results in the browser ", hits.len())
    } else {
        " Enter Open  d Download  oo Open All ".to_string()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(focused))
        .title(format!(" Search Results: \"{}\" ", query.trim()))
        .title_bottom(Line::from(footer).centered());

    if hits.is_empty() {
        let empty = Paragraph::new("No matching resources found.")
            .block(block)
            .style(Style::default().fg(palette.muted).bg(palette.bg));
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = hits
        .iter()
        .map(|hit| {
            ListItem::new(Line::from(vec![
                Span::styled(
                    format!(" {}: ", hit.subject),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(hit.resource.display_name.clone()),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .style(palette.base())
        .highlight_style(palette.selected());
    frame.render_stateful_widget(list, area, &mut state.selection.list_state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;

    #[test]
    fn test_search_hits_open_and_download() {
        let hits = Catalog::builtin().search_resources("necta");
        assert!(hits.len() >= 2);
        let mut state = SearchViewState::new();
        state.handle_event(&TuiEvent::CursorDown, &hits);
        assert_eq!(
            state.handle_event(&TuiEvent::Submit, &hits),
            Some(SearchEvent::Open(hits[1].resource.url.clone()))
        );
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('d'), &hits),
            Some(SearchEvent::Download(hits[1].resource.url.clone()))
        );
    }

    #[test]
    fn test_open_all_needs_two_presses() {
        let hits = Catalog::builtin().search_resources("necta");
        let mut state = SearchViewState::new();
        assert_eq!(state.handle_event(&TuiEvent::InputChar('o'), &hits), None);
        assert!(state.confirm_open_all);
        assert_eq!(
            state.handle_event(&TuiEvent::InputChar('o'), &hits),
            Some(SearchEvent::OpenAll)
        );

        state.handle_event(&TuiEvent::InputChar('o'), &hits);
        state.handle_event(&TuiEvent::CursorDown, &hits);
        assert!(!state.confirm_open_all);
        assert_eq!(state.handle_event(&TuiEvent::InputChar('o'), &[]), None);
        assert!(!state.confirm_open_all);
    }

    #[test]
    fn test_no_hits() {
        let mut state = SearchViewState::new();
        assert_eq!(state.handle_event(&TuiEvent::Submit, &[]), None);
    }
}
