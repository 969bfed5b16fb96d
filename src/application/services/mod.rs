//! Application services.

pub mod history;
pub mod list_view;
pub mod navigation;
pub mod suggestion;

pub use history::LocationHistory;
pub use list_view::{ListPage, ListViewPipeline};
pub use navigation::{EMOJI_GRID_WIDTH, NavKey, NavOutcome, NavigationController};
pub use suggestion::{
    MENTION_BARE_LIMIT, MENTION_LOOKUP_LIMIT, MENTION_SCORE_THRESHOLD, MentionLookup,
    SuggestionEngine, SuggestionKind, SuggestionSet, fuzzy_match,
};
