// In-memory user store
// Decision: Plain HashMap behind Arc, no locking - the store is populated
// once at startup and never written to at runtime

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::Path;

use gatehouse_core::password::hash_password;
use gatehouse_core::{UserDirectory, UserRecord};

/// Read-only user store keyed by username.
pub struct InMemoryUserStore {
    users: HashMap<String, UserRecord>,
}

impl InMemoryUserStore {
    pub fn from_records(records: Vec<UserRecord>) -> Self {
        let users = records
            .into_iter()
            .map(|u| (u.username.clone(), u))
            .collect();
        Self { users }
    }

    /// Load user records from a JSON fixture file.
    ///
    /// The fixture is a JSON array of records whose `password_hash` fields
    /// are already-hashed PHC strings; plaintext never lives on disk.
    pub fn from_fixture(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read user fixture {}", path.display()))?;
        let records: Vec<UserRecord> = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse user fixture {}", path.display()))?;

        tracing::info!(count = records.len(), "Loaded user fixture");
        Ok(Self::from_records(records))
    }

    /// Built-in development seed: one active user and one deactivated one.
    ///
    /// Hashing happens at startup so the binary carries no precomputed
    /// hashes; the cost is two Argon2 invocations at boot.
    pub fn dev_seed() -> Result<Self> {
        let records = vec![
            UserRecord {
                username: "johndoe".to_string(),
                email: "johndoe@example.com".to_string(),
                full_name: "John Doe".to_string(),
                disabled: false,
                password_hash: hash_password("secret")?,
            },
            UserRecord {
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                full_name: "Alice Wonderson".to_string(),
                disabled: true,
                password_hash: hash_password("secret2")?,
            },
        ];

        tracing::info!("No user fixture configured, using built-in dev seed");
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserStore {
    async fn lookup(&self, username: &str) -> Option<UserRecord> {
        self.users.get(username).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup() {
        let store = InMemoryUserStore::from_records(vec![UserRecord {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            full_name: "Alice Wonderson".to_string(),
            disabled: false,
            password_hash: "$argon2id$v=19$x".to_string(),
        }]);

        assert!(store.lookup("alice").await.is_some());
        assert!(store.lookup("bob").await.is_none());
    }

    #[tokio::test]
    async fn test_dev_seed_contents() {
        let store = InMemoryUserStore::dev_seed().unwrap();
        assert_eq!(store.len(), 2);

        let john = store.lookup("johndoe").await.unwrap();
        assert!(!john.disabled);

        let alice = store.lookup("alice").await.unwrap();
        assert!(alice.disabled);
    }

    #[test]
    fn test_fixture_parsing() {
        let dir = std::env::temp_dir().join("gatehouse-fixture-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("users.json");
        std::fs::write(
            &path,
            r#"[
                {
                    "username": "alice",
                    "email": "alice@example.com",
                    "full_name": "Alice Wonderson",
                    "disabled": false,
                    "password_hash": "$argon2id$v=19$x"
                }
            ]"#,
        )
        .unwrap();

        let store = InMemoryUserStore::from_fixture(&path).unwrap();
        assert_eq!(store.len(), 1);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn test_fixture_missing_file_is_an_error() {
        let result = InMemoryUserStore::from_fixture(Path::new("/nonexistent/users.json"));
        assert!(result.is_err());
    }
}
