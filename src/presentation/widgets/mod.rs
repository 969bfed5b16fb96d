//! Reusable widgets.

mod chat_panel;
mod filter_bar;
mod footer_bar;
mod header_bar;
mod profile_popup;
mod suggestion_popup;
mod user_table;

pub use chat_panel::{ChatPanel, ChatPanelAction, ChatPanelState};
pub use filter_bar::{FilterBar, FilterBarAction, FilterBarState};
pub use footer_bar::{FocusContext, FooterBar};
pub use header_bar::HeaderBar;
pub use profile_popup::{ProfilePhase, ProfilePopup, ProfilePopupAction, ProfilePopupState};
pub use suggestion_popup::{SuggestionPopup, SuggestionPopupState};
pub use user_table::{UserTable, UserTableAction, UserTableState};
