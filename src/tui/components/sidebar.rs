//! # Sidebar Component
//!
//! Subject list plus the fixed Quiz / Downloads / About entries.
//! Follows the persistent state + transient wrapper pattern:
//! - `SidebarState` lives in `TuiState`
//! - `Sidebar` is created each frame with borrowed state and props

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, List, ListItem};

use crate::core::catalog::Catalog;
use crate::tui::component::Selection;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    Home,
    Subject(String),
    Quiz,
    Downloads,
    About,
}

impl SidebarItem {
    pub fn label(&self) -> &str {
        match self {
            SidebarItem::Home => "Home",
            SidebarItem::Subject(name) => name,
            SidebarItem::Quiz => "Take a Quiz",
            SidebarItem::Downloads => "My Downloads",
            SidebarItem::About => "About",
        }
    }
}

/// Sidebar entries in display order.
pub fn items(catalog: &Catalog) -> Vec<SidebarItem> {
    let mut items = vec![SidebarItem::Home];
    items.extend(catalog.subjects().map(|s| SidebarItem::Subject(s.to_string())));
    items.extend([SidebarItem::Quiz, SidebarItem::Downloads, SidebarItem::About]);
    items
}

#[derive(Default)]
pub struct SidebarState {
    pub selection: Selection,
}

impl SidebarState {
    pub fn new() -> Self {
        let mut selection = Selection::new();
        selection.sync(1);
        Self { selection }
    }

    /// Up/Down move, Enter activates the highlighted entry.
    pub fn handle_event(&mut self, event: &TuiEvent, items: &[SidebarItem]) -> Option<SidebarItem> {
        match event {
            TuiEvent::CursorUp => {
                self.selection.up(items.len());
                None
            }
            TuiEvent::CursorDown => {
                self.selection.down(items.len());
                None
            }
            TuiEvent::Home => {
                self.selection.reset();
                self.selection.sync(items.len());
                None
            }
            TuiEvent::End => {
                self.selection.selected = items.len().saturating_sub(1);
                self.selection.sync(items.len());
                None
            }
            TuiEvent::Submit => self
                .selection
                .get(items.len())
                .map(|i| items[i].clone()),
            _ => None,
        }
    }
}

pub struct Sidebar<'a> {
    state: &'a mut SidebarState,
    items: &'a [SidebarItem],
    palette: Palette,
    focused: bool,
}

impl<'a> Sidebar<'a> {
    pub fn new(
        state: &'a mut SidebarState,
        items: &'a [SidebarItem],
        palette: Palette,
        focused: bool,
    ) -> Self {
        Self {
            state,
            items,
            palette,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.selection.sync(self.items.len());

        let list_items: Vec<ListItem> = self
            .items
            .iter()
            .map(|item| ListItem::new(Line::from(format!(" {}", item.label()))))
            .collect();

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border(self.focused))
            .title(" Subjects ");

        let list = List::new(list_items)
            .block(block)
            .style(self.palette.base())
            .highlight_style(self.palette.selected());

        frame.render_stateful_widget(list, area, &mut self.state.selection.list_state);
    }
}
