/// Admin login
///
/// Exchanges email and password for a signed access token.

use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::audit::AuditLog;
use crate::auth::store::{self, User};
use crate::auth::{issue_token, PasswordHasher};
use crate::configuration::JwtSettings;
use crate::error::{AppError, AuthError, ErrorContext};

/// Both fields optional so a missing one is a credentials failure, not a 400
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}

/// POST /admin/api/login
///
/// # Errors
/// - 401: unknown email, wrong password, or missing field. The response is
///   identical in every case.
/// - 500: stored hash unreadable or token signing failed
pub async fn login(
    form: web::Json<LoginRequest>,
    pool: web::Data<PgPool>,
    jwt_config: web::Data<JwtSettings>,
    hasher: web::Data<PasswordHasher>,
) -> Result<HttpResponse, AppError> {
    let context = ErrorContext::new("admin_login");
    let LoginRequest { email, password } = form.into_inner();

    let password_given = password.is_some();
    let password = password.unwrap_or_default();

    let user = match email {
        Some(email) => store::find_by_email(pool.get_ref(), &email).await?,
        None => None,
    };

    // One bcrypt verification on every path, known user or not
    let hasher = hasher.get_ref().clone();
    let hash = hash_to_check(user.as_ref(), &hasher);
    let matches = web::block(move || hasher.verify(&password, &hash)).await??;

    let user = match user {
        Some(user) if matches && password_given => user,
        Some(_) => return Err(reject(&context, "wrong password")),
        None => return Err(reject(&context, "unknown or missing email")),
    };

    let access_token = issue_token(user.id, &user.role, jwt_config.get_ref())?;

    AuditLog::success("LOGIN", "user", "Admin logged in")
        .with_resource_id(user.id)
        .with_user_id(user.id.to_string())
        .record();
    tracing::info!(
        request_id = %context.request_id,
        user_id = user.id,
        "User logged in successfully"
    );

    Ok(HttpResponse::Ok().json(LoginResponse { access_token }))
}

/// The stored hash of a known user, otherwise the hasher's placeholder.
fn hash_to_check(user: Option<&User>, hasher: &PasswordHasher) -> String {
    match user {
        Some(user) => user.password_hash.clone(),
        None => hasher.dummy_hash().to_string(),
    }
}

fn reject(context: &ErrorContext, reason: &str) -> AppError {
    AuditLog::failure("LOGIN", "user", "Invalid credentials").record();
    let error = AppError::Auth(AuthError::InvalidCredentials);
    tracing::debug!(request_id = %context.request_id, reason = reason, "Login rejected");
    context.log_error(&error);
    error
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn unknown_user_is_checked_against_placeholder_hash() {
        let hasher = PasswordHasher::new(4);

        let hash = hash_to_check(None, &hasher);

        assert_eq!(hash, hasher.dummy_hash());
        assert!(!hasher.verify("any password", &hash).unwrap());
    }

    #[test]
    fn known_user_is_checked_against_stored_hash() {
        let hasher = PasswordHasher::new(4);
        let user = User {
            id: 1,
            email: "owner@jnparts.test".into(),
            password_hash: hasher.hash("pw").unwrap(),
            role: "admin".into(),
            created_at: Utc::now(),
        };

        let hash = hash_to_check(Some(&user), &hasher);

        assert_eq!(hash, user.password_hash);
        assert!(hasher.verify("pw", &hash).unwrap());
    }
}
