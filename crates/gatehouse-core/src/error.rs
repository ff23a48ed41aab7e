// Authentication failure taxonomy
// Decision: One closed enum instead of stringly-typed errors; the HTTP layer
// maps each variant to a status without inspecting messages
// Decision: Unknown-user and wrong-password collapse to InvalidCredentials so
// responses cannot be used for username enumeration

use thiserror::Error;

/// Terminal, per-attempt authentication failures.
///
/// All variants are recoverable by the caller (resubmit with corrected
/// input); none are retried server-side. Infrastructure problems such as a
/// misconfigured signing secret are not represented here - those are fatal
/// startup errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthFailure {
    /// Unknown username or wrong password (deliberately indistinguishable)
    #[error("incorrect username or password")]
    InvalidCredentials,
    /// Credentials were correct but the account is deactivated
    #[error("inactive user")]
    AccountDisabled,
    /// Bad signature, malformed token, expired, or unresolvable subject
    /// (deliberately indistinguishable)
    #[error("could not validate credentials")]
    InvalidToken,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_do_not_leak_which_check_failed() {
        // Both credential failures and all token failures share one message
        // per variant; there is no "user not found" or "expired" text.
        assert_eq!(
            AuthFailure::InvalidCredentials.to_string(),
            "incorrect username or password"
        );
        assert_eq!(
            AuthFailure::InvalidToken.to_string(),
            "could not validate credentials"
        );
        assert_eq!(AuthFailure::AccountDisabled.to_string(), "inactive user");
    }
}
