//! Main application orchestrator.

use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEvent};
use futures_util::StreamExt;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::application::services::MentionLookup;
use crate::domain::entities::UserRecord;
use crate::domain::ports::UserDirectoryPort;
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::emoji::EmojiCorpus;
use crate::infrastructure::image::{CompressedImage, compress_profile_image};
use crate::presentation::theme::Theme;
use crate::presentation::ui::directory_screen::{
    DirectoryKeyResult, DirectoryScreen, DirectoryScreenState,
};

#[derive(Debug)]
enum Action {
    UsersLoaded(Vec<UserRecord>),
    UsersLoadFailed(String),
    MentionLoaded { seq: u64, users: Vec<UserRecord> },
    MentionFailed { seq: u64, error: String },
    ImageCompressed(Result<CompressedImage, String>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AppState {
    Running,
    Exiting,
}

/// Ties the directory port, the screen state, and the event loop together.
pub struct App {
    state: AppState,
    screen: DirectoryScreenState,
    directory: Arc<dyn UserDirectoryPort>,
    action_tx: mpsc::UnboundedSender<Action>,
    action_rx: mpsc::UnboundedReceiver<Action>,
}

impl App {
    #[must_use]
    pub fn new(directory: Arc<dyn UserDirectoryPort>, config: &AppConfig) -> Self {
        let (action_tx, action_rx) = mpsc::unbounded_channel();
        let corpus = EmojiCorpus::bundled();
        debug!(emoji = corpus.len(), "Loaded bundled emoji corpus");

        let screen = DirectoryScreenState::new(
            corpus.into_emojis(),
            config.username.clone(),
            Theme::new(&config.ui.accent_color),
            config.ui.date_format.clone(),
        );

        Self {
            state: AppState::Running,
            screen,
            directory,
            action_tx,
            action_rx,
        }
    }

    /// Runs the event loop until exit.
    ///
    /// # Errors
    /// Returns error if the terminal cannot be drawn to.
    pub async fn run(mut self, terminal: &mut DefaultTerminal) -> color_eyre::Result<()> {
        self.spawn_user_load();

        let mut terminal_events = EventStream::new();
        terminal.draw(|frame| self.render(frame))?;

        while self.state != AppState::Exiting {
            tokio::select! {
                Some(action) = self.action_rx.recv() => {
                    self.handle_action(action);
                    terminal.draw(|frame| self.render(frame))?;
                }

                Some(Ok(event)) = terminal_events.next() => {
                    self.handle_terminal_event(&event);
                    terminal.draw(|frame| self.render(frame))?;
                }
            }
        }

        info!("Application exiting normally");
        Ok(())
    }

    fn render(&mut self, frame: &mut Frame) {
        frame.render_stateful_widget(DirectoryScreen::new(), frame.area(), &mut self.screen);
    }

    fn handle_terminal_event(&mut self, event: &Event) {
        if let Event::Key(key) = event {
            self.handle_key(*key);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        match self.screen.handle_key(key) {
            DirectoryKeyResult::Quit => {
                self.state = AppState::Exiting;
            }
            DirectoryKeyResult::MentionLookup(lookup) => {
                self.spawn_mention_lookup(lookup);
            }
            DirectoryKeyResult::CompressImage(path) => {
                self.spawn_compression(path);
            }
            DirectoryKeyResult::Consumed => {}
        }
    }

    fn handle_action(&mut self, action: Action) {
        match action {
            Action::UsersLoaded(users) => {
                debug!(count = users.len(), "Directory loaded");
                self.screen.set_users(users);
            }
            Action::UsersLoadFailed(error) => {
                warn!(%error, "Directory load failed, showing empty table");
                self.screen.set_load_failed();
            }
            Action::MentionLoaded { seq, users } => {
                self.screen.apply_mention_results(seq, users);
            }
            Action::MentionFailed { seq, error } => {
                warn!(%error, "Mention lookup failed");
                self.screen.apply_mention_failure(seq);
            }
            Action::ImageCompressed(Ok(image)) => {
                debug!(size = image.len(), "Profile image compressed");
                self.screen.on_image_compressed(Some(image));
            }
            Action::ImageCompressed(Err(error)) => {
                warn!(%error, "Image compression failed, keeping previous image");
                self.screen.on_image_compressed(None);
            }
        }
    }

    fn spawn_user_load(&self) {
        let directory = Arc::clone(&self.directory);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match directory.fetch_users(None).await {
                Ok(users) => {
                    let _ = tx.send(Action::UsersLoaded(users));
                }
                Err(e) => {
                    let _ = tx.send(Action::UsersLoadFailed(e.to_string()));
                }
            }
        });
    }

    fn spawn_mention_lookup(&self, lookup: MentionLookup) {
        let directory = Arc::clone(&self.directory);
        let tx = self.action_tx.clone();
        tokio::spawn(async move {
            match directory.fetch_users(Some(lookup.limit)).await {
                Ok(users) => {
                    let _ = tx.send(Action::MentionLoaded {
                        seq: lookup.seq,
                        users,
                    });
                }
                Err(e) => {
                    let _ = tx.send(Action::MentionFailed {
                        seq: lookup.seq,
                        error: e.to_string(),
                    });
                }
            }
        });
    }

    fn spawn_compression(&self, path: std::path::PathBuf) {
        let tx = self.action_tx.clone();
        tokio::task::spawn_blocking(move || {
            let result = compress_profile_image(&path).map_err(|e| e.to_string());
            let _ = tx.send(Action::ImageCompressed(result));
        });
    }
}
