//! User-directory port definition.

use async_trait::async_trait;

use crate::domain::entities::UserRecord;
use crate::domain::errors::DirectoryError;

/// Port for fetching user records from the directory service.
///
/// Both the table load (no limit) and the mention-candidate lookups
/// (limit 100, or 5 for a bare trigger) go through this port.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectoryPort: Send + Sync {
    /// Fetches user records, optionally capped at `limit` entries.
    async fn fetch_users(&self, limit: Option<u32>) -> Result<Vec<UserRecord>, DirectoryError>;
}
