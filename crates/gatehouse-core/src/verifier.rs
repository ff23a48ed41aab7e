// Credential verification and token validation
// Decision: Both operations take the directory as a parameter rather than
// holding it, so the same TokenService can serve any store implementation

use crate::directory::UserDirectory;
use crate::error::AuthFailure;
use crate::password::verify_password;
use crate::token::TokenService;
use crate::user::UserRecord;

/// Verify a username/password pair against the directory.
///
/// Unknown usernames and wrong passwords are indistinguishable from the
/// outside. A correct password for a deactivated account fails with
/// [`AuthFailure::AccountDisabled`]. The directory is never mutated.
pub async fn authenticate(
    directory: &dyn UserDirectory,
    username: &str,
    password: &str,
) -> Result<UserRecord, AuthFailure> {
    let user = directory
        .lookup(username)
        .await
        .ok_or(AuthFailure::InvalidCredentials)?;

    let valid = verify_password(password, &user.password_hash).map_err(|e| {
        // Corrupt stored hash; log it, but the caller sees the same
        // generic failure as a wrong password.
        tracing::error!("Password verification error for stored hash: {}", e);
        AuthFailure::InvalidCredentials
    })?;

    if !valid {
        return Err(AuthFailure::InvalidCredentials);
    }

    if user.disabled {
        return Err(AuthFailure::AccountDisabled);
    }

    Ok(user)
}

/// Validate a presented token and resolve its subject to a user record.
///
/// Signature, structure, and expiration are checked by the token service;
/// an unresolvable subject collapses into the same [`AuthFailure::InvalidToken`]
/// so a caller cannot distinguish a forged token from a stale one.
pub async fn validate(
    service: &TokenService,
    directory: &dyn UserDirectory,
    token: &str,
) -> Result<UserRecord, AuthFailure> {
    let claims = service.decode(token)?;

    directory
        .lookup(&claims.sub)
        .await
        .ok_or(AuthFailure::InvalidToken)
}
