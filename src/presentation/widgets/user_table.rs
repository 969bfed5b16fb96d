//! User table and pagination bar.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, StatefulWidget, Table, TableState, Widget},
};
use unicode_width::UnicodeWidthStr;

use crate::application::services::ListPage;
use crate::presentation::theme::Theme;

/// What a key press on the table asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserTableAction {
    /// Move to the previous page (clamped).
    PreviousPage,
    /// Move to the next page (clamped).
    NextPage,
    /// Jump to a specific page; the screen validates the number.
    JumpToPage(usize),
    /// Cycle the status filter.
    CycleStatus,
}

/// Row-selection state of the table.
#[derive(Debug, Default)]
pub struct UserTableState {
    selected: usize,
    focused: bool,
}

impl UserTableState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    #[must_use]
    pub const fn selected(&self) -> usize {
        self.selected
    }

    /// Clamps the selection to the current page length.
    pub fn clamp_selection(&mut self, row_count: usize) {
        if row_count == 0 {
            self.selected = 0;
        } else if self.selected >= row_count {
            self.selected = row_count - 1;
        }
    }

    /// Handles a key while the table is focused.
    pub fn handle_key(&mut self, key: KeyEvent, row_count: usize) -> Option<UserTableAction> {
        match key.code {
            KeyCode::Left | KeyCode::Char('p') => Some(UserTableAction::PreviousPage),
            KeyCode::Right | KeyCode::Char('n') => Some(UserTableAction::NextPage),
            KeyCode::Char('s') => Some(UserTableAction::CycleStatus),
            KeyCode::Char(c @ '1'..='9') => {
                let page = c.to_digit(10).map(|d| d as usize)?;
                Some(UserTableAction::JumpToPage(page))
            }
            KeyCode::Up => {
                self.selected = self.selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if row_count > 0 && self.selected + 1 < row_count {
                    self.selected += 1;
                }
                None
            }
            _ => None,
        }
    }
}

fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + w + 1 > max_width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}

/// Renders one page of users plus the pagination bar.
pub struct UserTable<'a> {
    page: &'a ListPage,
    current_page: usize,
    date_format: &'a str,
    loading: bool,
    theme: &'a Theme,
}

impl<'a> UserTable<'a> {
    #[must_use]
    pub const fn new(
        page: &'a ListPage,
        current_page: usize,
        date_format: &'a str,
        loading: bool,
        theme: &'a Theme,
    ) -> Self {
        Self {
            page,
            current_page,
            date_format,
            loading,
            theme,
        }
    }

    fn pagination_line(&self) -> Line<'static> {
        let mut spans = vec![Span::styled("  ‹ prev ", self.theme.dimmed_style)];
        for page in 1..=self.page.total_pages {
            if page == self.current_page {
                spans.push(Span::styled(
                    format!(" {page} "),
                    Style::default()
                        .fg(Color::Black)
                        .bg(self.theme.accent)
                        .add_modifier(Modifier::BOLD),
                ));
            } else {
                spans.push(Span::styled(
                    format!(" {page} "),
                    Style::default().fg(Color::Gray),
                ));
            }
        }
        spans.push(Span::styled(" next › ", self.theme.dimmed_style));
        Line::from(spans)
    }
}

impl StatefulWidget for UserTable<'_> {
    type State = UserTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let border_style = if state.focused {
            Style::default().fg(self.theme.accent)
        } else {
            Style::default().fg(Color::Gray)
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(" Users ");
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(1)]);
        let [table_area, pagination_area] = layout.areas(inner);

        if self.loading {
            Paragraph::new("Loading...").render(table_area, buf);
            return;
        }

        if self.page.records.is_empty() {
            Paragraph::new(Span::styled("No users match.", self.theme.dimmed_style))
                .render(table_area, buf);
            Paragraph::new(self.pagination_line()).render(pagination_area, buf);
            return;
        }

        state.clamp_selection(self.page.records.len());

        let header = Row::new(
            ["Avatar", "Full Name", "Username", "Created At", "Active"]
                .into_iter()
                .map(|title| Cell::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))),
        );

        let rows = self.page.records.iter().map(|user| {
            let created = user.created_at().format(self.date_format).to_string();
            Row::new(vec![
                Cell::from(truncate(user.avatar_url(), 24)),
                Cell::from(user.full_name().to_string()),
                Cell::from(user.username().to_string()),
                Cell::from(created),
                Cell::from(user.status_label()),
            ])
        });

        let table = Table::new(
            rows,
            [
                Constraint::Length(26),
                Constraint::Min(16),
                Constraint::Min(12),
                Constraint::Length(12),
                Constraint::Length(8),
            ],
        )
        .header(header)
        .row_highlight_style(self.theme.selection_style);

        let mut table_state = TableState::default();
        if state.focused {
            table_state.select(Some(state.selected));
        }
        StatefulWidget::render(table, table_area, buf, &mut table_state);

        Paragraph::new(self.pagination_line()).render(pagination_area, buf);
    }
}
