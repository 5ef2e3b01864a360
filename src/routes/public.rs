/// Public site endpoints
///
/// Read-only catalogue and content listings plus the contact form.
/// No authentication.

use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::error::{not_found, AppError, ValidationError};
use crate::models::{
    ContactPayload, Created, PortfolioItem, Product, PublicProduct, PublicTestimonial,
    Testimonial,
};
use crate::validators::{
    is_valid_email, optional_text, required_text, MAX_LONG_TEXT_LENGTH, MAX_SHORT_TEXT_LENGTH,
    MAX_TEXT_LENGTH,
};

/// GET /api/products
pub async fn list_products(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, name, category, price, description, image_url, created_at FROM products ORDER BY id",
    )
    .fetch_all(pool.get_ref())
    .await?;

    let body: Vec<PublicProduct> = products.into_iter().map(PublicProduct::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/products/{id}
pub async fn get_product(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, name, category, price, description, image_url, created_at FROM products WHERE id = $1",
    )
    .bind(path.into_inner())
    .fetch_optional(pool.get_ref())
    .await?
    .ok_or_else(|| not_found("Product"))?;

    Ok(HttpResponse::Ok().json(PublicProduct::from(product)))
}

/// GET /api/testimonials, newest first
pub async fn list_testimonials(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let items = sqlx::query_as::<_, Testimonial>(
        "SELECT id, name, location, rating, message, created_at FROM testimonials ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    let body: Vec<PublicTestimonial> = items.into_iter().map(PublicTestimonial::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/portfolio, newest first
pub async fn list_portfolio(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let items = sqlx::query_as::<_, PortfolioItem>(
        "SELECT id, title, tag, description, image_url, created_at FROM portfolio_items ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    Ok(HttpResponse::Ok().json(items))
}

/// POST /api/contact-requests
///
/// # Validation
/// - `name` and `message` are required
/// - `email`, when given, must be a valid address
pub async fn submit_contact_request(
    form: web::Json<ContactPayload>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse, AppError> {
    let payload = form.into_inner();

    let name = required_text(payload.name.as_deref(), "Name", MAX_TEXT_LENGTH)?;
    let message = required_text(payload.message.as_deref(), "Message", MAX_LONG_TEXT_LENGTH)?;
    let email = payload
        .email
        .as_deref()
        .filter(|e| !e.trim().is_empty())
        .map(is_valid_email)
        .transpose()?;
    optional_text(payload.phone.as_deref(), "phone", MAX_SHORT_TEXT_LENGTH)?;
    optional_text(payload.vehicle_model.as_deref(), "vehicle_model", MAX_TEXT_LENGTH)?;

    if email.is_none() && payload.phone.as_deref().map_or(true, |p| p.trim().is_empty()) {
        return Err(ValidationError::Required("Email or phone").into());
    }

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO contact_requests (name, email, phone, vehicle_model, message)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&name)
    .bind(&email)
    .bind(&payload.phone)
    .bind(&payload.vehicle_model)
    .bind(&message)
    .fetch_one(pool.get_ref())
    .await?;

    tracing::info!(contact_id = id, "Contact request received");

    Ok(HttpResponse::Created().json(Created { id }))
}
