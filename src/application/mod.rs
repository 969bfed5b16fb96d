//! Application layer with the suggestion, navigation, and list services.

/// Service implementations.
pub mod services;

pub use services::{
    ListViewPipeline, LocationHistory, NavKey, NavOutcome, NavigationController, SuggestionEngine,
    SuggestionSet,
};
