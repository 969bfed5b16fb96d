//! Location history for the table view.
//!
//! The terminal stand-in for browser history: every applied set of view
//! parameters becomes a query-string location on a stack, and back/forward
//! replay earlier locations.

use crate::domain::entities::ViewParams;

/// A navigable stack of view-parameter locations.
#[derive(Debug, Clone)]
pub struct LocationHistory {
    entries: Vec<String>,
    cursor: usize,
}

impl LocationHistory {
    /// Starts the history at the given initial location.
    #[must_use]
    pub fn new(initial: &ViewParams) -> Self {
        Self {
            entries: vec![initial.to_query_string()],
            cursor: 0,
        }
    }

    /// The parameters at the current location.
    #[must_use]
    pub fn current(&self) -> ViewParams {
        ViewParams::from_query_string(&self.entries[self.cursor])
    }

    /// The current location as a query string, for display.
    #[must_use]
    pub fn current_query(&self) -> &str {
        &self.entries[self.cursor]
    }

    /// Pushes a new location, truncating any forward tail. Pushing the
    /// current location again is a no-op.
    pub fn navigate(&mut self, params: &ViewParams) {
        let query = params.to_query_string();
        if self.entries[self.cursor] == query {
            return;
        }
        self.entries.truncate(self.cursor + 1);
        self.entries.push(query);
        self.cursor += 1;
    }

    /// Steps back, returning the parameters to restore.
    pub fn back(&mut self) -> Option<ViewParams> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        Some(self.current())
    }

    /// Steps forward, returning the parameters to restore.
    pub fn forward(&mut self) -> Option<ViewParams> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        Some(self.current())
    }
}

impl Default for LocationHistory {
    fn default() -> Self {
        Self::new(&ViewParams::default())
    }
}
