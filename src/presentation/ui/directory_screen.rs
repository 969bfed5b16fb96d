//! Directory screen: filter bar, user table, chat and profile overlays.

use std::path::PathBuf;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{StatefulWidget, Widget},
};

use crate::application::services::{
    ListPage, ListViewPipeline, LocationHistory, MentionLookup,
};
use crate::domain::entities::{Emoji, UserRecord, ViewParams};
use crate::infrastructure::image::CompressedImage;
use crate::presentation::theme::Theme;
use crate::presentation::widgets::{
    ChatPanel, ChatPanelAction, ChatPanelState, FilterBar, FilterBarAction, FilterBarState,
    FocusContext, FooterBar, HeaderBar, ProfilePopup, ProfilePopupAction, ProfilePopupState,
    UserTable, UserTableAction, UserTableState,
};
use crate::{NAME, VERSION};

const CHAT_WIDTH_PERCENT: u16 = 40;
const CHAT_MIN_WIDTH: u16 = 34;
const CHAT_HEIGHT_PERCENT: u16 = 70;
const CHAT_MIN_HEIGHT: u16 = 12;

/// Which primary surface receives plain keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryFocus {
    /// Username filter input.
    FilterInput,
    /// User table.
    Table,
}

impl DirectoryFocus {
    const fn toggled(self) -> Self {
        match self {
            Self::FilterInput => Self::Table,
            Self::Table => Self::FilterInput,
        }
    }
}

/// What a key press asked the app layer to do.
#[derive(Debug, Clone, PartialEq)]
pub enum DirectoryKeyResult {
    /// Nothing for the app layer.
    Consumed,
    /// Exit the application.
    Quit,
    /// Run a mention lookup against the directory.
    MentionLookup(MentionLookup),
    /// Compress an image off the UI thread.
    CompressImage(PathBuf),
}

/// Full state of the directory screen.
pub struct DirectoryScreenState {
    users: Vec<UserRecord>,
    loading: bool,
    params: ViewParams,
    history: LocationHistory,
    pipeline: ListViewPipeline,
    focus: DirectoryFocus,
    chat_open: bool,
    profile_open: bool,
    filter_state: FilterBarState,
    table_state: UserTableState,
    chat_state: ChatPanelState,
    profile_state: ProfilePopupState,
    avatar: Option<CompressedImage>,
    theme: Theme,
    date_format: String,
    username: String,
}

impl DirectoryScreenState {
    #[must_use]
    pub fn new(corpus: Vec<Emoji>, username: String, theme: Theme, date_format: String) -> Self {
        let params = ViewParams::default();
        let mut filter_state = FilterBarState::new();
        filter_state.set_focused(true);
        filter_state.set_value(&params.username_query);

        Self {
            users: Vec::new(),
            loading: true,
            history: LocationHistory::new(&params),
            params,
            pipeline: ListViewPipeline::new(),
            focus: DirectoryFocus::FilterInput,
            chat_open: false,
            profile_open: false,
            filter_state,
            table_state: UserTableState::new(),
            chat_state: ChatPanelState::new(corpus, username.clone()),
            profile_state: ProfilePopupState::new(),
            avatar: None,
            theme,
            date_format,
            username,
        }
    }

    /// Restores a screen whose params come from a saved location query.
    #[must_use]
    pub fn with_initial_query(mut self, query: &str) -> Self {
        self.params = ViewParams::from_query_string(query);
        self.filter_state.set_value(&self.params.username_query);
        self.history = LocationHistory::new(&self.params);
        self
    }

    #[must_use]
    pub const fn focus(&self) -> DirectoryFocus {
        self.focus
    }

    #[must_use]
    pub const fn is_chat_open(&self) -> bool {
        self.chat_open
    }

    #[must_use]
    pub const fn is_profile_open(&self) -> bool {
        self.profile_open
    }

    #[must_use]
    pub const fn params(&self) -> &ViewParams {
        &self.params
    }

    #[must_use]
    pub const fn avatar(&self) -> Option<&CompressedImage> {
        self.avatar.as_ref()
    }

    #[must_use]
    pub const fn chat_state(&self) -> &ChatPanelState {
        &self.chat_state
    }

    /// Raw directory records arrived.
    pub fn set_users(&mut self, users: Vec<UserRecord>) {
        self.users = users;
        self.loading = false;
    }

    /// The load failed; degrade to an empty table.
    pub fn set_load_failed(&mut self) {
        self.users = Vec::new();
        self.loading = false;
    }

    /// Routes a completed mention lookup into the chat panel.
    pub fn apply_mention_results(&mut self, seq: u64, candidates: Vec<UserRecord>) {
        self.chat_state.apply_mention_results(seq, candidates);
    }

    /// Routes a failed mention lookup into the chat panel.
    pub fn apply_mention_failure(&mut self, seq: u64) {
        self.chat_state.apply_mention_failure(seq);
    }

    /// Receives the background compression result.
    pub fn on_image_compressed(&mut self, result: Option<CompressedImage>) {
        self.profile_state.on_compressed(result);
    }

    /// Header descriptor of the stored avatar.
    #[must_use]
    pub fn avatar_info(&self) -> Option<String> {
        self.avatar.as_ref().map(|image| {
            format!(
                "{}x{} · {} KB",
                image.width,
                image.height,
                image.len() / 1024
            )
        })
    }

    /// The parameters the table actually renders with: committed status and
    /// page, but the live filter text.
    #[must_use]
    pub fn effective_params(&self) -> ViewParams {
        ViewParams {
            username_query: self.filter_state.value(),
            ..self.params.clone()
        }
    }

    /// Current page through the pipeline.
    #[must_use]
    pub fn current_page(&self) -> ListPage {
        self.pipeline.compute(&self.users, &self.effective_params())
    }

    /// The current location query string, shown in the footer.
    #[must_use]
    pub fn location_query(&self) -> String {
        let query = self.history.current_query();
        if query.is_empty() {
            "/users".to_string()
        } else {
            format!("/users?{query}")
        }
    }

    fn set_focus(&mut self, focus: DirectoryFocus) {
        self.focus = focus;
        self.filter_state
            .set_focused(focus == DirectoryFocus::FilterInput);
        self.table_state.set_focused(focus == DirectoryFocus::Table);
    }

    fn apply_params(&mut self, params: ViewParams, push: bool) {
        if push {
            self.history.navigate(&params);
        }
        self.filter_state.set_value(&params.username_query);
        self.params = params;
    }

    /// Handles one key press.
    pub fn handle_key(&mut self, key: KeyEvent) -> DirectoryKeyResult {
        if key.code == KeyCode::Char('c') && key.modifiers == KeyModifiers::CONTROL {
            return DirectoryKeyResult::Quit;
        }

        if self.profile_open {
            return self.handle_profile_key(key);
        }
        if self.chat_open {
            return self.handle_chat_key(key);
        }

        if let Some(result) = self.handle_global_key(key) {
            return result;
        }

        match self.focus {
            DirectoryFocus::FilterInput => self.handle_filter_key(key),
            DirectoryFocus::Table => self.handle_table_key(key),
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Option<DirectoryKeyResult> {
        match (key.code, key.modifiers) {
            (KeyCode::Char('o'), KeyModifiers::CONTROL) => {
                self.chat_open = true;
                Some(DirectoryKeyResult::Consumed)
            }
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => {
                self.profile_open = true;
                Some(DirectoryKeyResult::Consumed)
            }
            (KeyCode::Tab, _) => {
                self.set_focus(self.focus.toggled());
                Some(DirectoryKeyResult::Consumed)
            }
            (KeyCode::Left, KeyModifiers::ALT) => {
                if let Some(params) = self.history.back() {
                    self.apply_params(params, false);
                }
                Some(DirectoryKeyResult::Consumed)
            }
            (KeyCode::Right, KeyModifiers::ALT) => {
                if let Some(params) = self.history.forward() {
                    self.apply_params(params, false);
                }
                Some(DirectoryKeyResult::Consumed)
            }
            _ => None,
        }
    }

    fn handle_filter_key(&mut self, key: KeyEvent) -> DirectoryKeyResult {
        if let Some(action) = self.filter_state.handle_key(key) {
            match action {
                FilterBarAction::QueryChanged => {}
                FilterBarAction::CommitQuery(query) => {
                    let params = ViewParams {
                        username_query: query,
                        ..self.params.clone()
                    }
                    .with_first_page();
                    self.apply_params(params, true);
                }
            }
        }
        DirectoryKeyResult::Consumed
    }

    fn handle_table_key(&mut self, key: KeyEvent) -> DirectoryKeyResult {
        let page = self.current_page();
        if let Some(action) = self.table_state.handle_key(key, page.records.len()) {
            match action {
                UserTableAction::PreviousPage => {
                    let params = ViewParams {
                        page: self.pipeline.previous_page(self.params.page),
                        ..self.params.clone()
                    };
                    self.apply_params(params, true);
                }
                UserTableAction::NextPage => {
                    let params = ViewParams {
                        page: self.pipeline.next_page(self.params.page, page.total_pages),
                        ..self.params.clone()
                    };
                    self.apply_params(params, true);
                }
                UserTableAction::JumpToPage(target) => {
                    // The pipeline does not clamp direct selection; reject
                    // out-of-range jumps here.
                    if target >= 1 && target <= page.total_pages {
                        let params = ViewParams {
                            page: target,
                            ..self.params.clone()
                        };
                        self.apply_params(params, true);
                    }
                }
                UserTableAction::CycleStatus => {
                    let params = ViewParams {
                        status_filter: self.params.status_filter.next(),
                        ..self.params.clone()
                    }
                    .with_first_page();
                    self.apply_params(params, true);
                }
            }
        }
        DirectoryKeyResult::Consumed
    }

    fn handle_chat_key(&mut self, key: KeyEvent) -> DirectoryKeyResult {
        if let Some(action) = self.chat_state.handle_key(key) {
            match action {
                ChatPanelAction::Close => {
                    self.chat_open = false;
                }
                ChatPanelAction::Lookup(lookup) => {
                    return DirectoryKeyResult::MentionLookup(lookup);
                }
            }
        }
        DirectoryKeyResult::Consumed
    }

    fn handle_profile_key(&mut self, key: KeyEvent) -> DirectoryKeyResult {
        if let Some(action) = self.profile_state.handle_key(key) {
            match action {
                ProfilePopupAction::Compress(path) => {
                    return DirectoryKeyResult::CompressImage(path);
                }
                ProfilePopupAction::Save(image) => {
                    self.avatar = Some(image);
                    self.profile_open = false;
                    self.profile_state.reset();
                }
                ProfilePopupAction::Cancel => {
                    self.profile_open = false;
                    self.profile_state.reset();
                }
            }
        }
        DirectoryKeyResult::Consumed
    }

    const fn focus_context(&self) -> FocusContext {
        if self.profile_open {
            FocusContext::Profile
        } else if self.chat_open {
            FocusContext::Chat
        } else {
            match self.focus {
                DirectoryFocus::FilterInput => FocusContext::FilterInput,
                DirectoryFocus::Table => FocusContext::Table,
            }
        }
    }
}

/// Renders the directory screen.
pub struct DirectoryScreen;

impl DirectoryScreen {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Default for DirectoryScreen {
    fn default() -> Self {
        Self::new()
    }
}

fn anchored_bottom_right(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.right().saturating_sub(width),
        y: area.bottom().saturating_sub(height),
        width,
        height,
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

impl StatefulWidget for DirectoryScreen {
    type State = DirectoryScreenState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        let layout = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
        ]);
        let [header_area, filter_area, table_area, footer_area] = layout.areas(area);

        HeaderBar::new(NAME, VERSION, &state.username)
            .avatar_info(state.avatar_info())
            .accent(state.theme.accent)
            .render(header_area, buf);

        FilterBar::new(state.params.status_filter, &state.theme).render(
            &state.filter_state,
            filter_area,
            buf,
        );

        let page = state.current_page();
        let table = UserTable::new(
            &page,
            state.params.page,
            &state.date_format,
            state.loading,
            &state.theme,
        );
        table.render(table_area, buf, &mut state.table_state);

        FooterBar::new(state.focus_context())
            .right_info(Some(state.location_query()))
            .accent(state.theme.accent)
            .render(footer_area, buf);

        if state.chat_open {
            let chat_area = anchored_bottom_right(
                table_area,
                (table_area.width * CHAT_WIDTH_PERCENT / 100).max(CHAT_MIN_WIDTH),
                (table_area.height * CHAT_HEIGHT_PERCENT / 100).max(CHAT_MIN_HEIGHT),
            );
            let theme = state.theme;
            ChatPanel::new(&theme).render(chat_area, buf, &mut state.chat_state);
        }

        if state.profile_open {
            let popup_area = centered_rect(60, 30, area);
            let theme = state.theme;
            ProfilePopup::new(&theme).render(popup_area, buf, &mut state.profile_state);
        }
    }
}
