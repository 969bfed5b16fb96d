//! Suggestion popups for the chat input.
//!
//! Emoji matches render as a fixed-width glyph grid, mention and command
//! matches as vertical lists. The focused entry is highlighted and kept
//! inside the visible window as focus moves.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, StatefulWidget, Widget},
};

use crate::application::services::{EMOJI_GRID_WIDTH, SuggestionSet};
use crate::presentation::theme::Theme;

/// Scroll position of the popup, in grid rows or list items.
#[derive(Debug, Clone, Copy, Default)]
pub struct SuggestionPopupState {
    offset: usize,
}

impl SuggestionPopupState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resets the scroll position, for when the match list changes.
    pub const fn reset(&mut self) {
        self.offset = 0;
    }

    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Moves the window so `focused` (a row or item index) stays visible
    /// within `visible` slots.
    const fn ensure_visible(&mut self, focused: usize, visible: usize) {
        if visible == 0 {
            return;
        }
        if focused < self.offset {
            self.offset = focused;
        } else if focused >= self.offset + visible {
            self.offset = focused - visible + 1;
        }
    }
}

/// Renders the active suggestion set above the chat input.
pub struct SuggestionPopup<'a> {
    set: &'a SuggestionSet,
    theme: &'a Theme,
}

impl<'a> SuggestionPopup<'a> {
    #[must_use]
    pub const fn new(set: &'a SuggestionSet, theme: &'a Theme) -> Self {
        Self { set, theme }
    }

    /// Height the popup wants for its content, capped at `max_rows`.
    #[must_use]
    pub fn desired_height(&self, max_rows: u16) -> u16 {
        let content_rows = match self.set {
            SuggestionSet::Emoji { matches, .. } => matches.len().div_ceil(EMOJI_GRID_WIDTH),
            SuggestionSet::Mention { matches, .. } => matches.len(),
            SuggestionSet::Command { matches, .. } => matches.len(),
        };
        let content_rows = u16::try_from(content_rows).unwrap_or(u16::MAX);
        // Two border rows on top of the content.
        content_rows.saturating_add(2).min(max_rows)
    }

    fn render_emoji_grid(
        &self,
        matches: &[crate::domain::entities::Emoji],
        focused: usize,
        area: Rect,
        buf: &mut Buffer,
        state: &mut SuggestionPopupState,
    ) {
        let visible_rows = area.height as usize;
        if visible_rows == 0 || area.width == 0 {
            return;
        }
        state.ensure_visible(focused / EMOJI_GRID_WIDTH, visible_rows);

        let cell_width = (area.width as usize / EMOJI_GRID_WIDTH).max(2);
        for (index, emoji) in matches.iter().enumerate() {
            let row = index / EMOJI_GRID_WIDTH;
            if row < state.offset || row >= state.offset + visible_rows {
                continue;
            }
            let column = index % EMOJI_GRID_WIDTH;
            let x = area.x + u16::try_from(column * cell_width).unwrap_or(u16::MAX);
            let y = area.y + u16::try_from(row - state.offset).unwrap_or(u16::MAX);
            if x >= area.right() || y >= area.bottom() {
                continue;
            }

            let style = if index == focused {
                self.theme.selection_style
            } else {
                Style::default()
            };
            let glyph = format!(" {} ", emoji.native_glyph());
            buf.set_stringn(x, y, glyph, cell_width, style);
        }
    }

    fn render_list(
        &self,
        items: Vec<ListItem<'static>>,
        focused: usize,
        area: Rect,
        buf: &mut Buffer,
    ) {
        let list = List::new(items)
            .highlight_style(self.theme.selection_style)
            .highlight_symbol(">> ");

        let mut list_state = ListState::default();
        list_state.select(Some(focused));
        StatefulWidget::render(list, area, buf, &mut list_state);
    }
}

impl StatefulWidget for SuggestionPopup<'_> {
    type State = SuggestionPopupState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        if self.set.is_empty() {
            return;
        }

        Widget::render(Clear, area, buf);

        let title = match self.set {
            SuggestionSet::Emoji { .. } => " Emoji ",
            SuggestionSet::Mention { .. } => " Mention User ",
            SuggestionSet::Command { .. } => " Command ",
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(title)
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        block.render(area, buf);

        match self.set {
            SuggestionSet::Emoji { matches, focused } => {
                self.render_emoji_grid(matches, *focused, inner, buf, state);
            }
            SuggestionSet::Mention { matches, focused } => {
                let items = matches
                    .iter()
                    .map(|user| {
                        ListItem::new(Span::raw(format!(
                            "@{} ({})",
                            user.username(),
                            user.full_name()
                        )))
                    })
                    .collect();
                self.render_list(items, *focused, inner, buf);
            }
            SuggestionSet::Command { matches, focused } => {
                let items = matches
                    .iter()
                    .map(|command| ListItem::new(Span::raw(command.command())))
                    .collect();
                self.render_list(items, *focused, inner, buf);
            }
        }
    }
}
