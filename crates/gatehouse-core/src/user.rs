// User record domain type

#[cfg(feature = "openapi")]
use utoipa::ToSchema;

use serde::{Deserialize, Serialize};

/// A stored user account.
///
/// Loaded once at process start and never mutated at runtime. The
/// `password_hash` field holds a PHC-format Argon2id hash, never a
/// plaintext secret.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(ToSchema))]
pub struct UserRecord {
    /// Unique login name (store key)
    pub username: String,
    /// Contact email
    pub email: String,
    /// Display name
    pub full_name: String,
    /// Whether the account is deactivated
    #[serde(default)]
    pub disabled: bool,
    /// Argon2id hash of the account secret (PHC string)
    #[serde(skip_serializing)]
    pub password_hash: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_not_serialized() {
        let user = UserRecord {
            username: "johndoe".to_string(),
            email: "johndoe@example.com".to_string(),
            full_name: "John Doe".to_string(),
            disabled: false,
            password_hash: "$argon2id$v=19$secret".to_string(),
        };

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("argon2id"));
        assert!(!json.contains("password_hash"));
        assert!(json.contains("johndoe"));
    }

    #[test]
    fn test_disabled_defaults_to_false() {
        let json = r#"{
            "username": "alice",
            "email": "alice@example.com",
            "full_name": "Alice Wonderson",
            "password_hash": "$argon2id$v=19$secret"
        }"#;

        let user: UserRecord = serde_json::from_str(json).unwrap();
        assert!(!user.disabled);
    }
}
