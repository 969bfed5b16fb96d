//! Top chrome bar.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::presentation::theme::Theme;

/// One-line header: app name, version, local username, and avatar status.
pub struct HeaderBar<'a> {
    name: &'a str,
    version: &'a str,
    username: &'a str,
    avatar_info: Option<String>,
    accent: Color,
}

impl<'a> HeaderBar<'a> {
    #[must_use]
    pub fn new(name: &'a str, version: &'a str, username: &'a str) -> Self {
        Self {
            name,
            version,
            username,
            avatar_info: None,
            accent: Theme::default().accent,
        }
    }

    /// Short avatar descriptor, e.g. `640x480 · 213 KB`.
    #[must_use]
    pub fn avatar_info(mut self, info: Option<String>) -> Self {
        self.avatar_info = info;
        self
    }

    #[must_use]
    pub const fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for HeaderBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.name),
                Style::default()
                    .fg(Color::Black)
                    .bg(self.accent)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!(" v{} ", self.version),
                Style::default().fg(Color::DarkGray),
            ),
        ];

        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("@{}", self.username),
            Style::default().fg(self.accent),
        ));

        if let Some(info) = &self.avatar_info {
            spans.push(Span::styled(
                format!("  avatar: {info}"),
                Style::default().fg(Color::DarkGray),
            ));
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_renders_name_and_user() {
        let area = Rect::new(0, 0, 60, 1);
        let mut buf = Buffer::empty(area);
        HeaderBar::new("rosterdeck", "0.1.0", "vanshika").render(area, &mut buf);

        let line: String = (0..60).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains("rosterdeck"));
        assert!(line.contains("@vanshika"));
    }
}
