//! Directory user entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier of a directory user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(pub String);

impl UserId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for UserId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for UserId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A single record from the user directory. Read-only to the core: the
/// directory endpoint is the only writer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    id: UserId,
    username: String,
    full_name: String,
    avatar_url: String,
    created_at: DateTime<Utc>,
    active: bool,
}

impl UserRecord {
    #[must_use]
    pub fn new(
        id: impl Into<UserId>,
        username: impl Into<String>,
        full_name: impl Into<String>,
        created_at: DateTime<Utc>,
        active: bool,
    ) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            full_name: full_name.into(),
            avatar_url: String::new(),
            created_at,
            active,
        }
    }

    #[must_use]
    pub fn with_avatar_url(mut self, avatar_url: impl Into<String>) -> Self {
        self.avatar_url = avatar_url.into();
        self
    }

    #[must_use]
    pub const fn id(&self) -> &UserId {
        &self.id
    }

    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    #[must_use]
    pub fn avatar_url(&self) -> &str {
        &self.avatar_url
    }

    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Human-readable status label used by the table view.
    #[must_use]
    pub const fn status_label(&self) -> &'static str {
        if self.active { "Active" } else { "Inactive" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn epoch() -> DateTime<Utc> {
        DateTime::<Utc>::UNIX_EPOCH
    }

    #[test]
    fn test_user_record_creation() {
        let user = UserRecord::new("17", "amara", "Amara Okafor", epoch(), true)
            .with_avatar_url("https://cdn.example.com/17.jpg");

        assert_eq!(user.id().as_str(), "17");
        assert_eq!(user.username(), "amara");
        assert_eq!(user.full_name(), "Amara Okafor");
        assert_eq!(user.avatar_url(), "https://cdn.example.com/17.jpg");
        assert!(user.is_active());
    }

    #[test]
    fn test_status_label() {
        let active = UserRecord::new("1", "a", "A", epoch(), true);
        let inactive = UserRecord::new("2", "b", "B", epoch(), false);
        assert_eq!(active.status_label(), "Active");
        assert_eq!(inactive.status_label(), "Inactive");
    }

    #[test]
    fn test_user_id_display() {
        let id = UserId::from("42");
        assert_eq!(id.to_string(), "42");
    }
}
