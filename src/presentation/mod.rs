//! Presentation layer with UI components and event handling.

/// Color theme.
pub mod theme;
/// UI screens.
pub mod ui;
/// Reusable widgets.
pub mod widgets;

pub use ui::App;
