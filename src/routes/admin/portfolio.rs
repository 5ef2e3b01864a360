use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::audit::AuditLog;
use crate::auth::Claims;
use crate::error::{not_found, AppError, ValidationError};
use crate::models::{sent_value, Created, Message, PortfolioItem, PortfolioPayload};
use crate::validators::{
    optional_text, required_text, MAX_LONG_TEXT_LENGTH, MAX_SHORT_TEXT_LENGTH, MAX_TEXT_LENGTH,
    MAX_URL_LENGTH,
};

fn check_fields(payload: &PortfolioPayload) -> Result<(), ValidationError> {
    optional_text(payload.title.as_deref(), "title", MAX_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.tag), "tag", MAX_SHORT_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.description), "description", MAX_LONG_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.image_url), "image_url", MAX_URL_LENGTH)?;
    Ok(())
}

/// GET /admin/api/portfolio, newest first
pub async fn list(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let items = sqlx::query_as::<_, PortfolioItem>(
        "SELECT id, title, tag, description, image_url, created_at FROM portfolio_items ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(items))
}

/// POST /admin/api/portfolio
pub async fn create(
    form: web::Json<PortfolioPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let payload = form.into_inner();
    let title = required_text(payload.title.as_deref(), "Title", MAX_TEXT_LENGTH)?;
    check_fields(&payload)?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO portfolio_items (title, tag, description, image_url)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&title)
    .bind(sent_value(&payload.tag))
    .bind(sent_value(&payload.description))
    .bind(sent_value(&payload.image_url))
    .fetch_one(pool.get_ref())
    .await?;

    AuditLog::success("CREATE", "portfolio_item", format!("Portfolio item '{}' created", title))
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Created().json(Created { id }))
}

/// PUT /admin/api/portfolio/{id}
///
/// Fields sent as `null` are cleared, except `title`, which is kept.
pub async fn update(
    path: web::Path<i64>,
    form: web::Json<PortfolioPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payload = form.into_inner();
    check_fields(&payload)?;
    if matches!(payload.title.as_deref(), Some(t) if t.trim().is_empty()) {
        return Err(ValidationError::Required("Title").into());
    }

    let result = sqlx::query(
        r#"
        UPDATE portfolio_items SET
            title = COALESCE($2, title),
            tag = CASE WHEN $3 THEN $4 ELSE tag END,
            description = CASE WHEN $5 THEN $6 ELSE description END,
            image_url = CASE WHEN $7 THEN $8 ELSE image_url END
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.title.as_deref().map(str::trim))
    .bind(payload.tag.is_some())
    .bind(sent_value(&payload.tag))
    .bind(payload.description.is_some())
    .bind(sent_value(&payload.description))
    .bind(payload.image_url.is_some())
    .bind(sent_value(&payload.image_url))
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_found("Portfolio item"));
    }

    AuditLog::success("UPDATE", "portfolio_item", "Portfolio item updated")
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Ok().json(Message { message: "Updated" }))
}

/// DELETE /admin/api/portfolio/{id}
pub async fn delete(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM portfolio_items WHERE id = $1")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found("Portfolio item"));
    }

    AuditLog::success("DELETE", "portfolio_item", "Portfolio item deleted")
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Ok().json(Message { message: "Deleted" }))
}
