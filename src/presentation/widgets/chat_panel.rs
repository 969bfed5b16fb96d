//! Chat panel: message list, input line, and suggestion popups.

use chrono::Utc;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget},
};
use tui_textarea::TextArea;

use super::suggestion_popup::{SuggestionPopup, SuggestionPopupState};
use crate::application::services::{
    MentionLookup, NavKey, NavOutcome, NavigationController, SuggestionEngine,
};
use crate::domain::entities::{ChatMessage, Emoji, UserRecord};
use crate::presentation::theme::Theme;

const PLACEHOLDER_TEXT: &str = "Type a message...";
const POPUP_MAX_ROWS: u16 = 8;

/// What a chat key press asked the screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatPanelAction {
    /// Escape: close the whole chat surface.
    Close,
    /// Run a mention lookup against the directory.
    Lookup(MentionLookup),
}

/// State of the chat panel.
pub struct ChatPanelState {
    messages: Vec<ChatMessage>,
    input: TextArea<'static>,
    engine: SuggestionEngine,
    controller: NavigationController,
    popup_state: SuggestionPopupState,
    username: String,
}

impl ChatPanelState {
    #[must_use]
    pub fn new(corpus: Vec<Emoji>, username: impl Into<String>) -> Self {
        let mut input = TextArea::default();
        input.set_placeholder_text(PLACEHOLDER_TEXT);
        Self {
            messages: Vec::new(),
            input,
            engine: SuggestionEngine::new(corpus),
            controller: NavigationController::new(),
            popup_state: SuggestionPopupState::new(),
            username: username.into(),
        }
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn input_value(&self) -> String {
        self.input.lines().join("")
    }

    #[must_use]
    pub const fn engine(&self) -> &SuggestionEngine {
        &self.engine
    }

    fn set_input_value(&mut self, value: &str) {
        self.input.select_all();
        self.input.cut();
        self.input.insert_str(value);
    }

    /// Routes a completed mention lookup into the engine.
    pub fn apply_mention_results(&mut self, seq: u64, candidates: Vec<UserRecord>) {
        if self.engine.apply_mention_results(seq, candidates) {
            self.popup_state.reset();
        }
    }

    /// Routes a failed mention lookup into the engine.
    pub fn apply_mention_failure(&mut self, seq: u64) {
        self.engine.apply_mention_failure(seq);
    }

    /// Handles a key while the chat panel is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ChatPanelAction> {
        if let Some(nav_key) = Self::nav_key(&key) {
            let input = self.input_value();
            return match self.controller.handle_key(&mut self.engine, nav_key, &input) {
                NavOutcome::CloseChat => Some(ChatPanelAction::Close),
                NavOutcome::Committed(new_input) => {
                    // Programmatic rewrites do not re-run the detectors.
                    self.set_input_value(&new_input);
                    self.popup_state.reset();
                    None
                }
                NavOutcome::Submit => {
                    self.send_current_input();
                    None
                }
                NavOutcome::FocusMoved(_) => None,
                NavOutcome::Ignored => {
                    // Without an active suggestion set the horizontal keys
                    // fall back to cursor movement.
                    match nav_key {
                        NavKey::Left => {
                            self.input.move_cursor(tui_textarea::CursorMove::Back);
                        }
                        NavKey::Right => {
                            self.input.move_cursor(tui_textarea::CursorMove::Forward);
                        }
                        _ => {}
                    }
                    None
                }
            };
        }

        let mutated = match key.code {
            KeyCode::Char(c)
                if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
            {
                self.input.insert_char(c);
                true
            }
            KeyCode::Backspace => self.input.delete_char(),
            KeyCode::Delete => self.input.delete_next_char(),
            KeyCode::Home => {
                self.input.move_cursor(tui_textarea::CursorMove::Head);
                false
            }
            KeyCode::End => {
                self.input.move_cursor(tui_textarea::CursorMove::End);
                false
            }
            _ => false,
        };

        if mutated {
            self.popup_state.reset();
            let value = self.input_value();
            if let Some(lookup) = self.engine.process_input(&value) {
                return Some(ChatPanelAction::Lookup(lookup));
            }
        }
        None
    }

    /// Appends the current input as a message. A blank input changes
    /// nothing and stays in the box.
    fn send_current_input(&mut self) {
        let content = self.input_value();
        if content.trim().is_empty() {
            return;
        }
        self.messages
            .push(ChatMessage::new(self.username.clone(), content, Utc::now()));
        self.set_input_value("");
        self.engine.reset();
        self.popup_state.reset();
    }

    const fn nav_key(key: &KeyEvent) -> Option<NavKey> {
        match key.code {
            KeyCode::Up => Some(NavKey::Up),
            KeyCode::Down => Some(NavKey::Down),
            KeyCode::Left => Some(NavKey::Left),
            KeyCode::Right => Some(NavKey::Right),
            KeyCode::Enter => Some(NavKey::Enter),
            KeyCode::Esc => Some(NavKey::Escape),
            _ => None,
        }
    }
}

/// Renders the chat panel as an overlay box.
pub struct ChatPanel<'a> {
    theme: &'a Theme,
}

impl<'a> ChatPanel<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn render_messages(&self, state: &ChatPanelState, area: Rect, buf: &mut Buffer) {
        let mut lines: Vec<Line> = Vec::new();
        for message in state.messages() {
            let author_style = if message.mentions(&state.username) {
                self.theme.mention_style
            } else {
                Style::default().fg(self.theme.accent)
            };
            lines.push(Line::from(Span::styled(
                format!("@{}", message.author()),
                author_style,
            )));
            lines.push(Line::from(Span::raw(message.content().to_string())));
        }

        // Tail the transcript: the newest message is always in view.
        let height = area.height as usize;
        let skip = lines.len().saturating_sub(height);
        let visible: Vec<Line> = lines.into_iter().skip(skip).collect();
        Paragraph::new(visible).render(area, buf);
    }

    fn render_input(&self, state: &ChatPanelState, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent));
        let inner = block.inner(area);
        block.render(area, buf);

        let value = state.input_value();
        let (text, style) = if value.is_empty() {
            (PLACEHOLDER_TEXT.to_string(), self.theme.dimmed_style)
        } else {
            (value, Style::default())
        };
        Paragraph::new(Line::from(Span::styled(text, style))).render(inner, buf);

        let (_, col) = state.input.cursor();
        let cursor_x = inner.x + u16::try_from(col).unwrap_or(u16::MAX);
        if cursor_x < inner.right()
            && let Some(cell) = buf.cell_mut((cursor_x, inner.y))
        {
            cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
        }
    }
}

impl StatefulWidget for ChatPanel<'_> {
    type State = ChatPanelState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Widget::render(Clear, area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(" Chat ");
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::vertical([Constraint::Min(3), Constraint::Length(3)]);
        let [messages_area, input_area] = layout.areas(inner);

        self.render_messages(state, messages_area, buf);
        self.render_input(state, input_area, buf);

        if let Some(set) = state.engine.active().cloned() {
            let popup = SuggestionPopup::new(&set, self.theme);
            let max_rows = messages_area.height.min(POPUP_MAX_ROWS);
            let height = popup.desired_height(max_rows);
            if height >= 3 {
                let popup_area = Rect {
                    x: input_area.x,
                    y: input_area.y.saturating_sub(height),
                    width: input_area.width,
                    height,
                };
                popup.render(popup_area, buf, &mut state.popup_state);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::SuggestionSet;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut ChatPanelState, text: &str) -> Option<ChatPanelAction> {
        let mut last = None;
        for c in text.chars() {
            last = state.handle_key(key(KeyCode::Char(c)));
        }
        last
    }

    fn corpus() -> Vec<Emoji> {
        vec![
            Emoji::new("grinning", "Grinning Face")
                .with_keywords(vec!["smile".into()])
                .with_native("😀"),
        ]
    }

    #[test]
    fn test_send_appends_message_and_clears_input() {
        let mut state = ChatPanelState::new(corpus(), "vanshika");
        type_text(&mut state, "hello world");
        state.handle_key(key(KeyCode::Enter));

        assert_eq!(state.messages().len(), 1);
        assert_eq!(state.messages()[0].content(), "hello world");
        assert_eq!(state.messages()[0].author(), "vanshika");
        assert_eq!(state.input_value(), "");
    }

    #[test]
    fn test_blank_send_is_a_noop_and_keeps_input() {
        let mut state = ChatPanelState::new(corpus(), "vanshika");
        type_text(&mut state, "   ");
        state.handle_key(key(KeyCode::Enter));

        assert!(state.messages().is_empty());
        assert_eq!(state.input_value(), "   ");
    }

    #[test]
    fn test_emoji_flow_commits_into_input() {
        let mut state = ChatPanelState::new(corpus(), "vanshika");
        type_text(&mut state, "hi :smi");
        assert!(matches!(
            state.engine().active(),
            Some(SuggestionSet::Emoji { .. })
        ));

        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.input_value(), "hi 😀");
        assert!(state.engine().active().is_none());
        assert!(state.messages().is_empty());
    }

    #[test]
    fn test_mention_flow_bubbles_lookup_and_commits() {
        let mut state = ChatPanelState::new(corpus(), "vanshika");
        let action = type_text(&mut state, "hey @va");
        let Some(ChatPanelAction::Lookup(lookup)) = action else {
            panic!("expected a lookup, got {action:?}");
        };
        assert_eq!(lookup.query, "va");

        state.apply_mention_results(
            lookup.seq,
            vec![UserRecord::new(
                "1",
                "vanshika",
                "Vanshika M",
                chrono::DateTime::UNIX_EPOCH,
                true,
            )],
        );

        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.input_value(), "@vanshika");
    }

    #[test]
    fn test_escape_closes_chat() {
        let mut state = ChatPanelState::new(corpus(), "vanshika");
        type_text(&mut state, ":smi");
        assert_eq!(
            state.handle_key(key(KeyCode::Esc)),
            Some(ChatPanelAction::Close)
        );
        assert!(state.engine().active().is_none());
    }

    #[test]
    fn test_arrow_keys_move_cursor_when_no_suggestions() {
        let mut state = ChatPanelState::new(corpus(), "vanshika");
        type_text(&mut state, "ab");
        state.handle_key(key(KeyCode::Left));
        state.handle_key(key(KeyCode::Char('x')));
        assert_eq!(state.input_value(), "axb");
    }

    #[test]
    fn test_command_flow() {
        let mut state = ChatPanelState::new(corpus(), "vanshika");
        type_text(&mut state, "/mu");
        assert!(matches!(
            state.engine().active(),
            Some(SuggestionSet::Command { .. })
        ));

        state.handle_key(key(KeyCode::Enter));
        assert_eq!(state.input_value(), "/mute");
    }
}
