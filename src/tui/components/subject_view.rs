//! # Subject View
//!
//! Topic tabs on top, the selected topic's notes in the middle and the
//! subject's resources below. Resource-only subjects show just the list.

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap};

use crate::core::catalog::Subject;
use crate::tui::component::Selection;
use crate::tui::event::TuiEvent;
use crate::tui::theme::Palette;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubjectEvent {
    /// Open the resource's URL in the browser
    Open(String),
    /// Save the resource into the downloads directory
    Download(String),
}

#[derive(Default)]
pub struct SubjectViewState {
    pub topic: usize,
    pub resources: Selection,
}

impl SubjectViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Back to the first topic and resource, for a freshly opened subject.
    pub fn reset(&mut self) {
        self.topic = 0;
        self.resources.reset();
    }

    pub fn handle_event(&mut self, event: &TuiEvent, subject: &Subject) -> Option<SubjectEvent> {
        let topics = subject.topics.len();
        let resources = subject.resources.len();
        match event {
            TuiEvent::CursorLeft if topics > 0 => {
                self.topic = (self.topic + topics - 1) % topics;
                None
            }
            TuiEvent::CursorRight if topics > 0 => {
                self.topic = (self.topic + 1) % topics;
                None
            }
            TuiEvent::CursorUp => {
                self.resources.up(resources);
                None
            }
            TuiEvent::CursorDown => {
                self.resources.down(resources);
                None
            }
            TuiEvent::Submit => self
                .resources
                .get(resources)
                .map(|i| SubjectEvent::Open(subject.resources[i].url.clone())),
            TuiEvent::InputChar('d') => self
                .resources
                .get(resources)
                .map(|i| SubjectEvent::Download(subject.resources[i].url.clone())),
            _ => None,
        }
    }
}

pub struct SubjectView<'a> {
    state: &'a mut SubjectViewState,
    subject: &'a Subject,
    palette: Palette,
    focused: bool,
}

impl<'a> SubjectView<'a> {
    pub fn new(
        state: &'a mut SubjectViewState,
        subject: &'a Subject,
        palette: Palette,
        focused: bool,
    ) -> Self {
        Self {
            state,
            subject,
            palette,
            focused,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(self.palette.border(self.focused))
            .title(Span::styled(
                format!(" {} ", self.subject.name),
                Style::default()
                    .fg(self.palette.accent)
                    .add_modifier(Modifier::BOLD),
            ));
        let inner = block.inner(area);
        frame.render_widget(block.style(self.palette.base()), area);

        if self.subject.topics.is_empty() {
            self.render_resources(frame, inner);
            return;
        }

        let resources_height = (self.subject.resources.len() as u16 + 2).min(inner.height / 2);
        let [tabs_area, notes_area, resources_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(resources_height),
        ])
        .areas(inner);

        self.state.topic = self.state.topic.min(self.subject.topics.len() - 1);
        let tabs = Tabs::new(self.subject.topics.iter().map(|t| t.name.as_str()))
            .select(self.state.topic)
            .style(Style::default().fg(self.palette.muted))
            .highlight_style(self.palette.selected());
        frame.render_widget(tabs, tabs_area);

        let topic = &self.subject.topics[self.state.topic];
        let mut lines = vec![
            Line::from(Span::styled(
                topic.name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::default(),
            Line::from(topic.description.clone()),
            Line::default(),
            Line::from(Span::styled(
                "Examples:",
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ];
        lines.extend(topic.examples.iter().map(|e| Line::from(format!("  • {e}"))));

        let notes = Paragraph::new(lines)
            .style(self.palette.base())
            .wrap(Wrap { trim: false });
        frame.render_widget(notes, notes_area);

        self.render_resources(frame, resources_area);
    }

    fn render_resources(&mut self, frame: &mut Frame, area: Rect) {
        self.state.resources.sync(self.subject.resources.len());

        let items: Vec<ListItem> = self
            .subject
            .resources
            .iter()
            .map(|r| ListItem::new(Line::from(format!(" {}", r.display_name))))
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::TOP)
                    .border_style(Style::default().fg(self.palette.muted))
                    .title(" Additional Resources ")
                    .title_bottom(Line::from(" Enter Open  d Download ").centered()),
            )
            .style(self.palette.base())
            .highlight_style(self.palette.selected());

        frame.render_stateful_widget(list, area, &mut self.state.resources.list_state);
    }
}
