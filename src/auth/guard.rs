/// Admin gate
///
/// `extract_bearer -> verify_token -> authorize`, short-circuiting on the
/// first failure. Used by the `RequireRole` middleware before any admin
/// handler runs.

use actix_web::http::header::{HeaderMap, AUTHORIZATION};

use crate::auth::claims::Claims;
use crate::auth::jwt::verify_token;
use crate::auth::role::Role;
use crate::configuration::JwtSettings;
use crate::error::AuthError;

const BEARER_PREFIX: &str = "Bearer ";

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn extract_bearer(headers: &HeaderMap) -> Result<&str, AuthError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix(BEARER_PREFIX))
        .ok_or(AuthError::MissingToken)
}

/// Exact match of the role claim; `superadmin` does not satisfy `admin`.
pub fn authorize(claims: &Claims, required: Role) -> Result<(), AuthError> {
    if claims.role == required.as_str() {
        Ok(())
    } else {
        Err(AuthError::Forbidden)
    }
}

pub fn check_request(
    headers: &HeaderMap,
    config: &JwtSettings,
    required: Role,
) -> Result<Claims, AuthError> {
    let token = extract_bearer(headers)?;
    let claims = verify_token(token, config)?;
    authorize(&claims, required)?;
    Ok(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::jwt::{issue_token, issue_token_at};
    use actix_web::http::header::HeaderValue;

    fn config() -> JwtSettings {
        JwtSettings {
            secret: "guard-test-secret".to_string(),
            access_token_expiry: 900,
        }
    }

    fn headers_with(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn missing_header_is_missing_token() {
        assert_eq!(extract_bearer(&HeaderMap::new()), Err(AuthError::MissingToken));
    }

    #[test]
    fn wrong_scheme_is_missing_token() {
        assert_eq!(
            extract_bearer(&headers_with("Basic dXNlcjpwdw==")),
            Err(AuthError::MissingToken)
        );
        assert_eq!(
            extract_bearer(&headers_with("bearer abc")),
            Err(AuthError::MissingToken)
        );
    }

    #[test]
    fn non_utf8_header_is_missing_token() {
        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_bytes(b"Bearer \xfftoken").unwrap(),
        );
        assert_eq!(extract_bearer(&headers), Err(AuthError::MissingToken));
    }

    #[test]
    fn bearer_token_is_extracted() {
        assert_eq!(extract_bearer(&headers_with("Bearer abc.def")), Ok("abc.def"));
    }

    #[test]
    fn admin_token_is_authorized() {
        let token = issue_token(42, "admin", &config()).unwrap();
        let claims = check_request(
            &headers_with(&format!("Bearer {}", token)),
            &config(),
            Role::Admin,
        )
        .expect("admin token should pass");

        assert_eq!(claims.user_id().unwrap(), 42);
    }

    #[test]
    fn other_roles_are_forbidden() {
        for role in ["customer", "superadmin", ""] {
            let token = issue_token(1, role, &config()).unwrap();
            assert_eq!(
                check_request(
                    &headers_with(&format!("Bearer {}", token)),
                    &config(),
                    Role::Admin
                ),
                Err(AuthError::Forbidden),
                "role {:?} should be forbidden",
                role
            );
        }
    }

    #[test]
    fn expiry_is_checked_before_role() {
        let long_ago = chrono::Utc::now().timestamp() - 10_000;
        let token = issue_token_at(1, "customer", long_ago, &config()).unwrap();

        assert_eq!(
            check_request(
                &headers_with(&format!("Bearer {}", token)),
                &config(),
                Role::Admin
            ),
            Err(AuthError::TokenExpired)
        );
    }

    #[test]
    fn garbage_token_is_malformed() {
        let result = check_request(&headers_with("Bearer not-a-jwt"), &config(), Role::Admin);
        assert!(matches!(result, Err(AuthError::MalformedToken(_))));
    }
}
