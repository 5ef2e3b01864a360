/// Password Hashing and Verification
///
/// Thin wrapper over bcrypt. The cost is configurable so tests can run
/// with the minimum cost.

use std::sync::Arc;

use crate::error::AppError;

const DUMMY_PASSWORD: &str = "jnparts-login-placeholder";

#[derive(Debug, Clone)]
pub struct PasswordHasher {
    cost: u32,
    /// Hash at `cost` checked when a login names no known user, so every
    /// login pays for exactly one verification.
    dummy_hash: Arc<str>,
}

impl PasswordHasher {
    /// Precomputes the placeholder hash; an out-of-range cost leaves it
    /// empty and `hash` reports the error instead.
    pub fn new(cost: u32) -> Self {
        let dummy_hash = bcrypt::hash(DUMMY_PASSWORD, cost).unwrap_or_default();
        Self {
            cost,
            dummy_hash: Arc::from(dummy_hash),
        }
    }

    pub fn dummy_hash(&self) -> &str {
        &self.dummy_hash
    }

    /// Hash a password with a fresh salt.
    ///
    /// Empty passwords are accepted; callers decide whether to reject them.
    ///
    /// # Errors
    /// Returns error if bcrypt fails (e.g. cost out of range)
    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        bcrypt::hash(password, self.cost)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))
    }

    /// Verify a password against a stored hash.
    ///
    /// Salt and cost come from the hash itself, not from `self`.
    ///
    /// # Errors
    /// Returns error if the stored value is not a bcrypt hash
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, AppError> {
        bcrypt::verify(password, hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> PasswordHasher {
        PasswordHasher::new(4)
    }

    #[test]
    fn test_hash_password() {
        let hash = hasher().hash("hunter2").expect("Failed to hash password");

        assert_ne!(hash, "hunter2");
        assert!(hash.starts_with("$2"));
    }

    #[test]
    fn test_verify_password() {
        let hasher = hasher();
        let hash = hasher.hash("hunter2").expect("Failed to hash password");

        assert!(hasher.verify("hunter2", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_verify_wrong_password() {
        let hasher = hasher();
        let hash = hasher.hash("hunter2").expect("Failed to hash password");

        assert!(!hasher.verify("hunter3", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn same_password_hashes_differently() {
        let hasher = hasher();
        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same", &first).unwrap());
        assert!(hasher.verify("same", &second).unwrap());
    }

    #[test]
    fn empty_password_is_hashed() {
        let hasher = hasher();
        let hash = hasher.hash("").expect("Empty password should hash");

        assert!(hasher.verify("", &hash).unwrap());
        assert!(!hasher.verify("x", &hash).unwrap());
    }

    #[test]
    fn verify_uses_cost_embedded_in_hash() {
        let hash = PasswordHasher::new(5).hash("pw").unwrap();
        assert!(PasswordHasher::new(4).verify("pw", &hash).unwrap());
    }

    #[test]
    fn dummy_hash_uses_configured_cost() {
        let hasher = PasswordHasher::new(5);

        assert!(hasher.dummy_hash().starts_with("$2b$05$"));
        assert!(!hasher.verify("hunter2", hasher.dummy_hash()).unwrap());
    }

    #[test]
    fn non_bcrypt_hash_is_an_error() {
        assert!(hasher().verify("pw", "plaintext-password").is_err());
    }
}
