//! Directory API response structures.

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::domain::entities::UserRecord;

/// One user object as returned by the directory endpoint.
#[derive(Debug, Deserialize)]
pub struct UserDto {
    /// Unique user ID.
    pub id: String,
    /// Login-style username.
    pub username: String,
    /// Display name.
    #[serde(default, rename = "fullName")]
    pub full_name: String,
    /// Avatar image URL.
    #[serde(default)]
    pub avatar: String,
    /// Account creation timestamp.
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    /// Whether the account is active.
    #[serde(default)]
    pub active: bool,
}

impl From<UserDto> for UserRecord {
    fn from(dto: UserDto) -> Self {
        Self::new(dto.id, dto.username, dto.full_name, dto.created_at, dto.active)
            .with_avatar_url(dto.avatar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_dto_maps_to_record() {
        let json = r#"{
            "id": "7",
            "username": "amara",
            "fullName": "Amara Okafor",
            "avatar": "https://cdn.example.com/7.jpg",
            "createdAt": "2024-05-28T12:00:00Z",
            "active": true
        }"#;

        let dto: UserDto = serde_json::from_str(json).expect("valid dto");
        let record = UserRecord::from(dto);

        assert_eq!(record.id().as_str(), "7");
        assert_eq!(record.username(), "amara");
        assert_eq!(record.full_name(), "Amara Okafor");
        assert!(record.is_active());
    }

    #[test]
    fn test_optional_fields_default() {
        let json = r#"{
            "id": "8",
            "username": "bare",
            "createdAt": "2024-05-28T12:00:00Z"
        }"#;

        let dto: UserDto = serde_json::from_str(json).expect("valid dto");
        assert_eq!(dto.full_name, "");
        assert_eq!(dto.avatar, "");
        assert!(!dto.active);
    }
}
