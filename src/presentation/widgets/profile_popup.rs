//! Profile-image popup.
//!
//! The keyboard stand-in for the avatar drop zone: type a file path, let
//! the compressor run in the background, then save or discard the preview.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, StatefulWidget, Widget},
};
use tui_textarea::TextArea;

use crate::infrastructure::image::CompressedImage;
use crate::presentation::theme::Theme;

const PATH_PLACEHOLDER: &str = "Path to an image file...";

/// Where the popup is in its flow.
#[derive(Debug, Clone)]
pub enum ProfilePhase {
    /// Waiting for a file path.
    EnteringPath,
    /// Compression running in the background.
    Compressing,
    /// Compressed image ready to save or discard.
    Preview(CompressedImage),
}

/// What a popup key press asked the screen to do.
#[derive(Debug, Clone)]
pub enum ProfilePopupAction {
    /// Compress the image at this path off the UI thread.
    Compress(PathBuf),
    /// Apply the previewed image as the new avatar and close.
    Save(CompressedImage),
    /// Close without changing the avatar.
    Cancel,
}

/// State of the profile popup.
pub struct ProfilePopupState {
    path_input: TextArea<'static>,
    phase: ProfilePhase,
}

impl ProfilePopupState {
    #[must_use]
    pub fn new() -> Self {
        let mut path_input = TextArea::default();
        path_input.set_placeholder_text(PATH_PLACEHOLDER);
        Self {
            path_input,
            phase: ProfilePhase::EnteringPath,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> &ProfilePhase {
        &self.phase
    }

    #[must_use]
    pub fn path_value(&self) -> String {
        self.path_input.lines().join("")
    }

    /// Puts the popup back at the path prompt, e.g. after a failed
    /// compression (the previous avatar is untouched).
    pub fn reset(&mut self) {
        self.phase = ProfilePhase::EnteringPath;
    }

    /// Receives the background compression result. Failures return to the
    /// prompt; the caller is responsible for logging them.
    pub fn on_compressed(&mut self, result: Option<CompressedImage>) {
        self.phase = match result {
            Some(image) => ProfilePhase::Preview(image),
            None => ProfilePhase::EnteringPath,
        };
    }

    /// Handles a key while the popup is open.
    pub fn handle_key(&mut self, key: KeyEvent) -> Option<ProfilePopupAction> {
        if key.code == KeyCode::Esc {
            return Some(ProfilePopupAction::Cancel);
        }

        match &self.phase {
            ProfilePhase::EnteringPath => match key.code {
                KeyCode::Enter => {
                    let path = self.path_value();
                    if path.trim().is_empty() {
                        return None;
                    }
                    self.phase = ProfilePhase::Compressing;
                    Some(ProfilePopupAction::Compress(PathBuf::from(path.trim())))
                }
                KeyCode::Char(c)
                    if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
                {
                    self.path_input.insert_char(c);
                    None
                }
                KeyCode::Backspace => {
                    self.path_input.delete_char();
                    None
                }
                KeyCode::Left => {
                    self.path_input.move_cursor(tui_textarea::CursorMove::Back);
                    None
                }
                KeyCode::Right => {
                    self.path_input
                        .move_cursor(tui_textarea::CursorMove::Forward);
                    None
                }
                _ => None,
            },
            ProfilePhase::Compressing => None,
            ProfilePhase::Preview(image) => match key.code {
                KeyCode::Char('s') => Some(ProfilePopupAction::Save(image.clone())),
                KeyCode::Char('c') => Some(ProfilePopupAction::Cancel),
                _ => None,
            },
        }
    }
}

impl Default for ProfilePopupState {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the profile popup overlay.
pub struct ProfilePopup<'a> {
    theme: &'a Theme,
}

impl<'a> ProfilePopup<'a> {
    #[must_use]
    pub const fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }
}

impl StatefulWidget for ProfilePopup<'_> {
    type State = ProfilePopupState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        Widget::render(Clear, area, buf);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.accent))
            .title(" Profile Image ")
            .title_style(Style::default().add_modifier(Modifier::BOLD));
        let inner = block.inner(area);
        block.render(area, buf);

        let lines: Vec<Line> = match &state.phase {
            ProfilePhase::EnteringPath => {
                let path = state.path_value();
                let (text, style) = if path.is_empty() {
                    (PATH_PLACEHOLDER.to_string(), self.theme.dimmed_style)
                } else {
                    (path, Style::default())
                };
                vec![
                    Line::from("Drop in a new profile image:"),
                    Line::from(Span::styled(text, style)),
                    Line::from(Span::styled(
                        "Enter to load, Esc to cancel",
                        self.theme.dimmed_style,
                    )),
                ]
            }
            ProfilePhase::Compressing => vec![Line::from("Compressing...")],
            ProfilePhase::Preview(image) => vec![
                Line::from(format!(
                    "{}x{} · {} KB · quality {}",
                    image.width,
                    image.height,
                    image.len() / 1024,
                    image.quality
                )),
                Line::from(Span::styled(
                    "s to save, c or Esc to cancel",
                    self.theme.dimmed_style,
                )),
            ],
        };

        Paragraph::new(lines).render(inner, buf);

        if matches!(state.phase, ProfilePhase::EnteringPath) {
            let (_, col) = state.path_input.cursor();
            let cursor_x = inner.x + u16::try_from(col).unwrap_or(u16::MAX);
            let cursor_y = inner.y + 1;
            if cursor_x < inner.right()
                && cursor_y < inner.bottom()
                && let Some(cell) = buf.cell_mut((cursor_x, cursor_y))
            {
                cell.set_style(Style::default().bg(Color::White).fg(Color::Black));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn sample_image() -> CompressedImage {
        CompressedImage {
            bytes: vec![0xFF; 2048],
            width: 640,
            height: 480,
            quality: 85,
        }
    }

    #[test]
    fn test_enter_requests_compression() {
        let mut state = ProfilePopupState::new();
        for c in "/tmp/a.png".chars() {
            state.handle_key(key(KeyCode::Char(c)));
        }
        let action = state.handle_key(key(KeyCode::Enter));
        assert!(matches!(
            action,
            Some(ProfilePopupAction::Compress(path)) if path == PathBuf::from("/tmp/a.png")
        ));
        assert!(matches!(state.phase(), ProfilePhase::Compressing));
    }

    #[test]
    fn test_enter_on_empty_path_is_ignored() {
        let mut state = ProfilePopupState::new();
        assert!(state.handle_key(key(KeyCode::Enter)).is_none());
        assert!(matches!(state.phase(), ProfilePhase::EnteringPath));
    }

    #[test]
    fn test_failed_compression_returns_to_prompt() {
        let mut state = ProfilePopupState::new();
        state.phase = ProfilePhase::Compressing;
        state.on_compressed(None);
        assert!(matches!(state.phase(), ProfilePhase::EnteringPath));
    }

    #[test]
    fn test_preview_save_and_cancel() {
        let mut state = ProfilePopupState::new();
        state.on_compressed(Some(sample_image()));

        let save = state.handle_key(key(KeyCode::Char('s')));
        assert!(matches!(save, Some(ProfilePopupAction::Save(_))));

        state.on_compressed(Some(sample_image()));
        let cancel = state.handle_key(key(KeyCode::Char('c')));
        assert!(matches!(cancel, Some(ProfilePopupAction::Cancel)));
    }

    #[test]
    fn test_escape_always_cancels() {
        let mut state = ProfilePopupState::new();
        assert!(matches!(
            state.handle_key(key(KeyCode::Esc)),
            Some(ProfilePopupAction::Cancel)
        ));
    }
}
