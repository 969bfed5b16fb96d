//! Keyboard navigation over the active suggestion set.
//!
//! All suggestion-relevant keys funnel through this one controller instead
//! of per-surface handlers, so exactly one suggestion surface ever reacts
//! to a key press.

use super::suggestion::{SuggestionEngine, SuggestionKind, SuggestionSet};

/// Emoji suggestions render as a grid this many glyphs wide; vertical
/// movement jumps by a full row.
pub const EMOJI_GRID_WIDTH: usize = 6;

/// The keys the controller reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavKey {
    /// Arrow up.
    Up,
    /// Arrow down.
    Down,
    /// Arrow left.
    Left,
    /// Arrow right.
    Right,
    /// Enter.
    Enter,
    /// Escape.
    Escape,
}

/// What a key press did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavOutcome {
    /// The key is not the controller's to handle.
    Ignored,
    /// Focus moved to the given index; the rendering layer must scroll the
    /// entry into view.
    FocusMoved(usize),
    /// The focused suggestion was committed; the input becomes this text.
    Committed(String),
    /// No suggestions were active; the current input should be submitted
    /// as an outgoing message.
    Submit,
    /// Escape: close the chat surface entirely, discarding suggestions.
    CloseChat,
}

/// Routes navigation keys to whichever suggestion set is active.
#[derive(Debug, Default)]
pub struct NavigationController;

impl NavigationController {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Handles one key against the engine state and the live input text.
    pub fn handle_key(
        &self,
        engine: &mut SuggestionEngine,
        key: NavKey,
        input: &str,
    ) -> NavOutcome {
        match key {
            NavKey::Escape => {
                engine.reset();
                NavOutcome::CloseChat
            }
            NavKey::Enter => match engine.commit_focused(input) {
                Some(new_input) => NavOutcome::Committed(new_input),
                None => NavOutcome::Submit,
            },
            NavKey::Up | NavKey::Down | NavKey::Left | NavKey::Right => {
                let Some(active) = engine.active_mut() else {
                    return NavOutcome::Ignored;
                };
                match Self::step(active, key) {
                    Some(index) => {
                        active.set_focused(index);
                        NavOutcome::FocusMoved(index)
                    }
                    None => NavOutcome::Ignored,
                }
            }
        }
    }

    /// Computes the wrapped focus index for one movement key, or `None`
    /// when the key does not move this kind of surface.
    fn step(active: &SuggestionSet, key: NavKey) -> Option<usize> {
        let len = active.len();
        if len == 0 {
            return None;
        }

        // Emoji render as a grid, mentions and commands as vertical lists.
        let delta: isize = match (active.kind(), key) {
            (SuggestionKind::Emoji, NavKey::Up) => -(EMOJI_GRID_WIDTH as isize),
            (SuggestionKind::Emoji, NavKey::Down) => EMOJI_GRID_WIDTH as isize,
            (SuggestionKind::Emoji, NavKey::Left) => -1,
            (SuggestionKind::Emoji, NavKey::Right) => 1,
            (_, NavKey::Up) => -1,
            (_, NavKey::Down) => 1,
            _ => return None,
        };

        let len = len as isize;
        let current = active.focused() as isize;
        #[allow(clippy::cast_sign_loss)]
        let next = (current + delta).rem_euclid(len) as usize;
        Some(next)
    }
}
