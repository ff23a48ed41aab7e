// Gatehouse core authentication primitives
// Decision: The handshake is three injectable operations (authenticate, issue, validate)
// Decision: User lookup goes through the UserDirectory trait so storage is swappable

pub mod directory;
pub mod error;
pub mod password;
pub mod token;
pub mod user;
pub mod verifier;

pub use directory::UserDirectory;
pub use error::AuthFailure;
pub use token::{Claims, TokenConfig, TokenService};
pub use user::UserRecord;
pub use verifier::{authenticate, validate};
