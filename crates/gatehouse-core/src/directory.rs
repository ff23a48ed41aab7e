// User directory abstraction
// Decision: Trait seam so the in-memory fixture store can be replaced by a
// persistent store without touching the verifier or token logic

use async_trait::async_trait;

use crate::user::UserRecord;

/// Read-only lookup of user records by username.
///
/// Implementations must be safe to share across request handlers; the
/// handshake never writes through this interface.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Resolve a username to its record, if one exists.
    async fn lookup(&self, username: &str) -> Option<UserRecord>;
}
