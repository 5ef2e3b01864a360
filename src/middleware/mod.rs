/// Middleware module
///
/// Custom middleware for authorization.

mod require_role;

pub use require_role::RequireRole;
