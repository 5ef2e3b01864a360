/// JWT Claims structure
///
/// Payload of an admin access token: the user id as a string, the role tag
/// and the standard `iat`/`exp` timestamps.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Subject (user id as decimal string)
    pub sub: String,
    /// Role tag; absent in foreign tokens, which then fail authorization
    #[serde(default)]
    pub role: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i64, role: &str, issued_at: i64, expiry_seconds: i64) -> Self {
        Self {
            sub: user_id.to_string(),
            role: role.to_string(),
            iat: issued_at,
            exp: issued_at + expiry_seconds,
        }
    }

    /// # Errors
    /// Returns error if the subject is not an integer id
    pub fn user_id(&self) -> Result<i64, AppError> {
        self.sub
            .parse::<i64>()
            .map_err(|_| AppError::Internal("Invalid user ID in token".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(42, "admin", 1_000, 900);

        assert_eq!(claims.sub, "42");
        assert_eq!(claims.role, "admin");
        assert_eq!(claims.iat, 1_000);
        assert_eq!(claims.exp, 1_900);
    }

    #[test]
    fn test_user_id_extraction() {
        assert_eq!(Claims::new(7, "admin", 0, 60).user_id().unwrap(), 7);
    }

    #[test]
    fn test_invalid_user_id() {
        let mut claims = Claims::new(7, "admin", 0, 60);
        claims.sub = "not-a-number".to_string();

        assert!(claims.user_id().is_err());
    }

    #[test]
    fn missing_role_deserializes_empty() {
        let claims: Claims =
            serde_json::from_str(r#"{"sub":"1","iat":0,"exp":10}"#).unwrap();
        assert_eq!(claims.role, "");
    }
}
