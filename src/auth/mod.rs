/// Authentication module
///
/// Handles password hashing, JWT issuance/verification, the admin
/// role gate, and the user credential store.

mod claims;
mod guard;
mod jwt;
mod password;
mod role;
pub mod store;

pub use claims::Claims;
pub use guard::{authorize, check_request, extract_bearer};
pub use jwt::{issue_token, issue_token_at, verify_token};
pub use password::PasswordHasher;
pub use role::Role;
