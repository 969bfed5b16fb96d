//! Color theme derived from configuration.

use ratatui::style::{Color, Modifier, Style};
use std::str::FromStr;

/// Styles shared across the widgets.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Accent color used for focus borders and highlights.
    pub accent: Color,
    /// Style of the focused suggestion or table row.
    pub selection_style: Style,
    /// De-emphasized chrome text.
    pub dimmed_style: Style,
    /// Style for chat messages that mention the local user.
    pub mention_style: Style,
}

impl Theme {
    /// Builds a theme around an accent color name; unknown names fall back
    /// to the default accent.
    #[must_use]
    pub fn new(accent_color: &str) -> Self {
        let accent = Color::from_str(accent_color).unwrap_or(Color::Magenta);
        Self::from_color(accent)
    }

    #[must_use]
    pub fn from_color(accent: Color) -> Self {
        Self {
            accent,
            selection_style: Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
            dimmed_style: Style::default().fg(Color::DarkGray),
            mention_style: Style::default().fg(accent).add_modifier(Modifier::BOLD),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_color(Color::Magenta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_color_name() {
        let theme = Theme::new("Cyan");
        assert_eq!(theme.accent, Color::Cyan);
    }

    #[test]
    fn test_unknown_color_falls_back() {
        let theme = Theme::new("not-a-color");
        assert_eq!(theme.accent, Color::Magenta);
    }
}
