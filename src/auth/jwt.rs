/// JWT Token Generation and Validation
///
/// HS256 access tokens signed with the configured secret. Verification
/// is purely cryptographic; nothing here touches the database.

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::auth::claims::Claims;
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError};

/// Issue an access token for a user, valid from now.
///
/// # Errors
/// Returns error if token encoding fails
pub fn issue_token(user_id: i64, role: &str, config: &JwtSettings) -> Result<String, AppError> {
    issue_token_at(user_id, role, chrono::Utc::now().timestamp(), config)
}

/// Issue an access token with an explicit issue time.
///
/// # Errors
/// Returns error if token encoding fails
pub fn issue_token_at(
    user_id: i64,
    role: &str,
    issued_at: i64,
    config: &JwtSettings,
) -> Result<String, AppError> {
    let claims = Claims::new(user_id, role, issued_at, config.access_token_expiry);

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))
}

/// Verify signature and expiry, returning the embedded claims.
///
/// Expiry is checked with zero leeway.
pub fn verify_token(token: &str, config: &JwtSettings) -> Result<Claims, AuthError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        kind => AuthError::MalformedToken(malformed_detail(kind)),
    })?;

    check_not_revoked(&claims)?;
    Ok(claims)
}

/// Client-facing reason for a token that failed to decode or verify.
fn malformed_detail(kind: &ErrorKind) -> String {
    match kind {
        ErrorKind::InvalidSignature => "Signature verification failed".to_string(),
        ErrorKind::InvalidToken => "Not enough segments".to_string(),
        ErrorKind::Base64(_) => "Invalid base64 encoding".to_string(),
        ErrorKind::Json(_) | ErrorKind::Utf8(_) => "Invalid payload".to_string(),
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            "Algorithm not allowed".to_string()
        }
        ErrorKind::MissingRequiredClaim(claim) => format!("Missing required claim: {}", claim),
        _ => "Token could not be verified".to_string(),
    }
}

/// There is no revocation store; every token that verifies is live.
fn check_not_revoked(_claims: &Claims) -> Result<(), AuthError> {
    Ok(())
}
