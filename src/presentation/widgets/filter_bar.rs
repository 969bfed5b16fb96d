//! Username filter input and status selector.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use tui_textarea::TextArea;

use crate::domain::entities::StatusFilter;
use crate::presentation::theme::Theme;

const PLACEHOLDER_TEXT: &str = "Filter by username...";

/// What a key press in the filter input produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterBarAction {
    /// The live text changed; the table should refilter.
    QueryChanged,
    /// Enter: commit the current text into the view parameters.
    CommitQuery(String),
}

/// State of the username filter input.
pub struct FilterBarState {
    textarea: TextArea<'static>,
    focused: bool,
}

impl FilterBarState {
    #[must_use]
    pub fn new() -> Self {
        let mut textarea = TextArea::default();
        textarea.set_placeholder_text(PLACEHOLDER_TEXT);
        Self {
            textarea,
            focused: false,
        }
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Live input text.
    #[must_use]
    pub fn value(&self) -> String {
        self.textarea.lines().join("")
    }

    /// Replaces the input text, e.g. when history navigation restores an
    /// earlier query.
    pub fn set_value(&mut self, value: &str) {
        self.textarea.select_all();
        self.textarea.cut();
        self.textarea.insert_str(value);
    }

    /// Handles a key while the filter input is focused.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<FilterBarAction> {
        match key.code {
            KeyCode::Enter => Some(FilterBarAction::CommitQuery(self.value())),
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.textarea.insert_char(c);
                Some(FilterBarAction::QueryChanged)
            }
            KeyCode::Backspace => {
                if self.textarea.delete_char() {
                    Some(FilterBarAction::QueryChanged)
                } else {
                    None
                }
            }
            KeyCode::Delete => {
                if self.textarea.delete_next_char() {
                    Some(FilterBarAction::QueryChanged)
                } else {
                    None
                }
            }
            KeyCode::Left => {
                self.textarea.move_cursor(tui_textarea::CursorMove::Back);
                None
            }
            KeyCode::Right => {
                self.textarea.move_cursor(tui_textarea::CursorMove::Forward);
                None
            }
            KeyCode::Home => {
                self.textarea.move_cursor(tui_textarea::CursorMove::Head);
                None
            }
            KeyCode::End => {
                self.textarea.move_cursor(tui_textarea::CursorMove::End);
                None
            }
            _ => None,
        }
    }
}

impl Default for FilterBarState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the filter input next to the status selector.
pub struct FilterBar<'a> {
    status: StatusFilter,
    theme: &'a Theme,
}

impl<'a> FilterBar<'a> {
    #[must_use]
    pub const fn new(status: StatusFilter, theme: &'a Theme) -> Self {
        Self { status, theme }
    }

    pub fn render(&self, state: &FilterBarState, area: Rect, buf: &mut Buffer) {
        let layout = Layout::horizontal([Constraint::Min(20), Constraint::Length(18)]);
        let [input_area, status_area] = layout.areas(area);

        let border_style = if state.focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(Color::Gray)
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Username ");
        let inner = block.inner(input_area);
        block.render(input_area, buf);

        let value = state.value();
        let (text, style) = if value.is_empty() {
            (PLACEHOLDER_TEXT.to_string(), self.theme.dimmed_style)
        } else {
            (value, Style::default())
        };
        Paragraph::new(Line::from(Span::styled(text, style))).render(inner, buf);

        if state.focused {
            let (_, col) = state.textarea.cursor();
            let cursor_x = inner.x + u16::try_from(col).unwrap_or(u16::MAX);
            if cursor_x < inner.right()
                && let Some(cell) = buf.cell_mut((cursor_x, inner.y))
            {
                cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }

        let status_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Gray))
            .title(" Status ");
        let status_inner = status_block.inner(status_area);
        status_block.render(status_area, buf);
        Paragraph::new(Line::from(Span::styled(
            self.status.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )))
        .render(status_inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_typing_updates_value() {
        let mut state = FilterBarState::new();
        assert_eq!(
            state.handle_key(key(KeyCode::Char('a'))),
            Some(FilterBarAction::QueryChanged)
        );
        state.handle_key(key(KeyCode::Char('n')));
        assert_eq!(state.value(), "an");
    }

    #[test]
    fn test_enter_commits_current_text() {
        let mut state = FilterBarState::new();
        state.handle_key(key(KeyCode::Char('a')));
        assert_eq!(
            state.handle_key(key(KeyCode::Enter)),
            Some(FilterBarAction::CommitQuery("a".into()))
        );
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let mut state = FilterBarState::new();
        assert_eq!(state.handle_key(key(KeyCode::Backspace)), None);
    }

    #[test]
    fn test_set_value_replaces_text() {
        let mut state = FilterBarState::new();
        state.handle_key(key(KeyCode::Char('x')));
        state.set_value("restored");
        assert_eq!(state.value(), "restored");
    }

    #[test]
    fn test_render_shows_status() {
        let state = FilterBarState::new();
        let theme = Theme::default();
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        FilterBar::new(StatusFilter::Inactive, &theme).render(&state, area, &mut buf);

        let mut text = String::new();
        for y in 0..3 {
            for x in 0..60 {
                text.push_str(buf[(x, y)].symbol());
            }
        }
        assert!(text.contains("Inactive"));
    }
}
