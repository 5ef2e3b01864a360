use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::audit::AuditLog;
use crate::auth::Claims;
use crate::error::{not_found, AppError, ValidationError};
use crate::models::{sent_value, AdminProduct, Created, Message, Product, ProductPayload};
use crate::validators::{
    optional_text, required_text, MAX_LONG_TEXT_LENGTH, MAX_SHORT_TEXT_LENGTH, MAX_TEXT_LENGTH,
    MAX_URL_LENGTH,
};

/// Exclusive upper bound of a NUMERIC(10,2) price
const PRICE_LIMIT: i64 = 100_000_000;

fn check_fields(payload: &ProductPayload) -> Result<(), ValidationError> {
    optional_text(payload.name.as_deref(), "name", MAX_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.category), "category", MAX_SHORT_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.description), "description", MAX_LONG_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.image_url), "image_url", MAX_URL_LENGTH)?;
    if let Some(price) = payload.price {
        if price < Decimal::ZERO || price >= Decimal::from(PRICE_LIMIT) {
            return Err(ValidationError::InvalidFormat("price"));
        }
    }
    Ok(())
}

/// GET /admin/api/products, newest first
pub async fn list(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, category, price, description, image_url, created_at FROM products ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    let body: Vec<AdminProduct> = products.into_iter().map(AdminProduct::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /admin/api/products
///
/// `name` is required; `price` defaults to 0.
pub async fn create(
    form: web::Json<ProductPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let payload = form.into_inner();
    let name = required_text(payload.name.as_deref(), "Product name", MAX_TEXT_LENGTH)?;
    check_fields(&payload)?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO products (name, category, price, description, image_url)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&name)
    .bind(sent_value(&payload.category))
    .bind(payload.price.unwrap_or(Decimal::ZERO))
    .bind(sent_value(&payload.description))
    .bind(sent_value(&payload.image_url))
    .fetch_one(pool.get_ref())
    .await?;

    AuditLog::success("CREATE", "product", format!("Product '{}' created", name))
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Created().json(Created { id }))
}

/// PUT /admin/api/products/{id}
///
/// Only fields present in the body are changed; `category`, `description`
/// and `image_url` sent as `null` are cleared.
pub async fn update(
    path: web::Path<i64>,
    form: web::Json<ProductPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payload = form.into_inner();
    check_fields(&payload)?;
    if matches!(payload.name.as_deref(), Some(n) if n.trim().is_empty()) {
        return Err(ValidationError::Required("Product name").into());
    }

    let result = sqlx::query(
        r#"
        UPDATE products SET
            name = COALESCE($2, name),
            category = CASE WHEN $3 THEN $4 ELSE category END,
            price = COALESCE($5, price),
            description = CASE WHEN $6 THEN $7 ELSE description END,
            image_url = CASE WHEN $8 THEN $9 ELSE image_url END
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.name.as_deref().map(str::trim))
    .bind(payload.category.is_some())
    .bind(sent_value(&payload.category))
    .bind(payload.price)
    .bind(payload.description.is_some())
    .bind(sent_value(&payload.description))
    .bind(payload.image_url.is_some())
    .bind(sent_value(&payload.image_url))
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_found("Product"));
    }

    AuditLog::success("UPDATE", "product", "Product updated")
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Ok().json(Message { message: "Product updated" }))
}

/// DELETE /admin/api/products/{id}
pub async fn delete(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found("Product"));
    }

    AuditLog::success("DELETE", "product", "Product deleted")
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Ok().json(Message { message: "Product deleted" }))
}
