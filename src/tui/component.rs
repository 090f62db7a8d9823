use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::ListState;

/// A reusable UI component.
///
/// Components in this architecture follow the React pattern:
/// - They receive data via props (struct fields).
/// - They may hold internal state (via `&mut State` fields).
/// - They render to a `Frame` within a given `Rect`.
///
/// # Mutability
///
/// The `render` method takes `&mut self` so components can update
/// presentation state (list offsets) during rendering.
///
/// This aligns with Ratatui's `StatefulWidget` pattern.
pub trait Component {
    /// Render the component into the given area.
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that handles terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}

/// Cursor over a list whose length can change between frames.
#[derive(Debug, Default)]
pub struct Selection {
    pub selected: usize,
    pub list_state: ListState,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn up(&mut self, len: usize) {
        self.selected = self.selected.saturating_sub(1);
        self.sync(len);
    }

    pub fn down(&mut self, len: usize) {
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
        self.sync(len);
    }

    pub fn reset(&mut self) {
        self.selected = 0;
        *self.list_state.offset_mut() = 0;
    }

    /// Clamp to `len` and mirror into the ratatui `ListState`.
    pub fn sync(&mut self, len: usize) {
        if len == 0 {
            self.selected = 0;
            self.list_state.select(None);
        } else {
            self.selected = self.selected.min(len - 1);
            self.list_state.select(Some(self.selected));
        }
    }

    /// The selected index, if `len` has anything to select.
    pub fn get(&self, len: usize) -> Option<usize> {
        (self.selected < len).then_some(self.selected)
    }
}

/// A rect of fixed `height` rows, horizontally `percent_x` wide, centered in `outer`.
pub fn centered_band(percent_x: u16, height: u16, outer: Rect) -> Rect {
    let [_, band, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(outer.height)),
        Constraint::Fill(1),
    ])
    .areas(outer);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(band);
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_band_height() {
        let outer = Rect::new(0, 0, 100, 40);
        let band = centered_band(60, 5, outer);
        assert_eq!(band.height, 5);
        assert_eq!(band.width, 60);
        assert!(band.y > 0);
    }

    #[test]
    fn test_selection_clamps() {
        let mut sel = Selection::new();
        sel.down(3);
        sel.down(3);
        sel.down(3);
        assert_eq!(sel.selected, 2);
        sel.sync(1);
        assert_eq!(sel.selected, 0);
        assert_eq!(sel.list_state.selected(), Some(0));
    }

    #[test]
    fn test_selection_empty() {
        let mut sel = Selection::new();
        sel.down(0);
        assert_eq!(sel.get(0), None);
        assert_eq!(sel.list_state.selected(), None);
        sel.up(0);
        assert_eq!(sel.selected, 0);
    }
}
