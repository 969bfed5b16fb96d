//! Table view parameters and their query-string form.

use serde::{Deserialize, Serialize};

/// Fixed page size of the user table.
pub const PAGE_SIZE: usize = 10;

/// Status filter applied to the `active` flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    /// No status filtering.
    #[default]
    All,
    /// Only active users.
    Active,
    /// Only inactive users.
    Inactive,
}

impl StatusFilter {
    /// Whether a record with the given `active` flag passes the filter.
    #[must_use]
    pub const fn accepts(self, active: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => active,
            Self::Inactive => !active,
        }
    }

    /// Wire value used in the location query string; `All` is unrepresented.
    #[must_use]
    pub const fn wire_value(self) -> Option<&'static str> {
        match self {
            Self::All => None,
            Self::Active => Some("true"),
            Self::Inactive => Some("false"),
        }
    }

    #[must_use]
    pub fn from_wire_value(value: &str) -> Self {
        match value {
            "true" => Self::Active,
            "false" => Self::Inactive,
            _ => Self::All,
        }
    }

    /// Cycles All -> Active -> Inactive -> All.
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::All => Self::Active,
            Self::Active => Self::Inactive,
            Self::Inactive => Self::All,
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Active => write!(f, "Active"),
            Self::Inactive => write!(f, "Inactive"),
        }
    }
}

/// Filter, status, and page state of the user table. Always round-trips
/// through the location history so back/forward restores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewParams {
    /// Username substring filter.
    pub username_query: String,
    /// Active-flag filter.
    pub status_filter: StatusFilter,
    /// 1-based page number.
    pub page: usize,
    /// Records per page.
    pub page_size: usize,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            username_query: String::new(),
            status_filter: StatusFilter::All,
            page: 1,
            page_size: PAGE_SIZE,
        }
    }
}

impl ViewParams {
    /// Serializes to a `page`/`username`/`status` query string. Default
    /// values are omitted; an all-default state serializes to "".
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Vec::new();
        if self.page != 1 {
            pairs.push(format!("page={}", self.page));
        }
        if !self.username_query.is_empty() {
            pairs.push(format!("username={}", escape(&self.username_query)));
        }
        if let Some(status) = self.status_filter.wire_value() {
            pairs.push(format!("status={status}"));
        }
        pairs.join("&")
    }

    /// Parses a query string produced by [`Self::to_query_string`].
    /// Unknown keys and malformed values fall back to defaults.
    #[must_use]
    pub fn from_query_string(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            match key {
                "page" => params.page = value.parse().unwrap_or(1).max(1),
                "username" => params.username_query = unescape(value),
                "status" => params.status_filter = StatusFilter::from_wire_value(value),
                _ => {}
            }
        }
        params
    }

    /// A copy with the page reset to 1, used whenever a filter changes.
    #[must_use]
    pub fn with_first_page(mut self) -> Self {
        self.page = 1;
        self
    }
}

fn escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '%' | '&' | '=' | ' ' => out.push_str(&format!("%{:02X}", ch as u32)),
            _ => out.push(ch),
        }
    }
    out
}

fn unescape(value: &str) -> String {
    let bytes = value.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && let Some(hex) = value.get(i + 1..i + 3)
            && let Ok(byte) = u8::from_str_radix(hex, 16)
        {
            out.push(byte);
            i += 3;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    String::from_utf8(out).unwrap_or_else(|_| value.to_string())
}
