//! Rosterdeck - A terminal user-directory browser with chat.
//!
//! This crate renders a paginated, filterable table of user records fetched
//! from an HTTP directory, plus a chat panel with emoji, mention, and
//! slash-command autocompletion.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing the suggestion, navigation, and list services.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer containing UI components and event handling.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "rosterdeck";
