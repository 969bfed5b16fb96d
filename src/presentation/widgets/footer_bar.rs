//! Bottom chrome bar with focus context and key hints.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Which surface currently receives plain key input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FocusContext {
    /// Username filter input.
    #[default]
    FilterInput,
    /// User table.
    Table,
    /// Chat panel input.
    Chat,
    /// Profile image popup.
    Profile,
}

impl FocusContext {
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::FilterInput => "FILTER",
            Self::Table => "TABLE",
            Self::Chat => "CHAT",
            Self::Profile => "PROFILE",
        }
    }

    const fn hints(self) -> &'static [(&'static str, &'static str)] {
        match self {
            Self::FilterInput => &[
                ("Enter", "apply filter"),
                ("Tab", "table"),
                ("^O", "chat"),
                ("^P", "profile"),
            ],
            Self::Table => &[
                ("←/→", "page"),
                ("1-9", "jump"),
                ("s", "status"),
                ("⌥←/⌥→", "history"),
                ("^O", "chat"),
            ],
            Self::Chat => &[
                ("Enter", "send/pick"),
                ("↑↓←→", "navigate"),
                ("Esc", "close"),
            ],
            Self::Profile => &[("Enter", "load"), ("s", "save"), ("Esc", "cancel")],
        }
    }
}

/// One-line footer listing the focus context and its key hints.
pub struct FooterBar {
    focus: FocusContext,
    right_info: Option<String>,
    accent: Color,
}

impl FooterBar {
    #[must_use]
    pub fn new(focus: FocusContext) -> Self {
        Self {
            focus,
            right_info: None,
            accent: Color::Magenta,
        }
    }

    /// Trailing info text, e.g. the current location query string.
    #[must_use]
    pub fn right_info(mut self, info: Option<String>) -> Self {
        self.right_info = info;
        self
    }

    #[must_use]
    pub const fn accent(mut self, accent: Color) -> Self {
        self.accent = accent;
        self
    }
}

impl Widget for FooterBar {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::styled(
            format!(" {} ", self.focus.display_name()),
            Style::default()
                .fg(Color::Black)
                .bg(self.accent)
                .add_modifier(Modifier::BOLD),
        )];

        for (key, label) in self.focus.hints() {
            spans.push(Span::styled(
                format!(" {key} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::styled(
                format!(" {label} "),
                Style::default().fg(Color::Gray),
            ));
        }

        if let Some(info) = &self.right_info {
            let used: usize = spans.iter().map(|s| s.content.width()).sum();
            let width = area.width as usize;
            if used + info.width() + 1 < width {
                spans.push(Span::raw(" ".repeat(width - used - info.width() - 1)));
                spans.push(Span::styled(
                    info.clone(),
                    Style::default().fg(Color::DarkGray),
                ));
            }
        }

        Paragraph::new(Line::from(spans)).render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footer_shows_focus_context() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        FooterBar::new(FocusContext::Table).render(area, &mut buf);

        let line: String = (0..80).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains("TABLE"));
    }

    #[test]
    fn test_footer_right_info() {
        let area = Rect::new(0, 0, 80, 1);
        let mut buf = Buffer::empty(area);
        FooterBar::new(FocusContext::Table)
            .right_info(Some("?page=2".into()))
            .render(area, &mut buf);

        let line: String = (0..80).map(|x| buf[(x, 0)].symbol().to_string()).collect();
        assert!(line.contains("?page=2"));
    }
}
