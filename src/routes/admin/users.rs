/// Admin user management
///
/// Users can be listed and created, never deleted.

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::audit::AuditLog;
use crate::auth::store::{self, NewUser, UserSummary};
use crate::auth::{Claims, PasswordHasher, Role};
use crate::error::{AppError, DatabaseError, ValidationError};
use crate::models::Created;
use crate::validators::is_valid_email;

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

/// GET /admin/api/users
pub async fn list(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let users: Vec<UserSummary> = store::list(pool.get_ref())
        .await?
        .into_iter()
        .map(UserSummary::from)
        .collect();

    Ok(HttpResponse::Ok().json(users))
}

/// POST /admin/api/users
///
/// # Errors
/// - 400: email or password missing, bad email, unknown role
/// - 400: "User already exists", from the pre-check or the UNIQUE constraint
pub async fn create(
    form: web::Json<CreateUserRequest>,
    pool: web::Data<PgPool>,
    hasher: web::Data<PasswordHasher>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let CreateUserRequest { email, password, role } = form.into_inner();

    let email = email.unwrap_or_default();
    let password = password.unwrap_or_default();
    if email.trim().is_empty() || password.is_empty() {
        return Err(ValidationError::MissingCredentials.into());
    }
    let email = is_valid_email(&email)?;
    let role = match role {
        Some(r) => Role::parse(&r)?,
        None => Role::default(),
    };

    if store::exists_by_email(pool.get_ref(), &email).await? {
        AuditLog::failure("CREATE", "user", "User already exists")
            .with_user_id(claims.sub.clone())
            .record();
        return Err(DatabaseError::UniqueConstraintViolation("users_email_key".to_string()).into());
    }

    let hasher = hasher.get_ref().clone();
    let password_hash = web::block(move || hasher.hash(&password)).await??;

    let user = store::save(
        pool.get_ref(),
        NewUser {
            email,
            password_hash,
            role,
        },
    )
    .await?;

    AuditLog::success("CREATE", "user", format!("Admin user created with role {}", role))
        .with_resource_id(user.id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Created().json(Created { id: user.id }))
}
