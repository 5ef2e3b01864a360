use actix_web::{web, HttpResponse};
use sqlx::PgPool;

use crate::audit::AuditLog;
use crate::auth::Claims;
use crate::error::{not_found, AppError, ValidationError};
use crate::models::{sent_value, AdminTestimonial, Created, Message, Testimonial, TestimonialPayload};
use crate::validators::{
    is_valid_rating, optional_text, MAX_LONG_TEXT_LENGTH, MAX_RATING, MAX_TEXT_LENGTH,
};

fn check_fields(payload: &TestimonialPayload) -> Result<(), ValidationError> {
    optional_text(sent_value(&payload.name), "name", MAX_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.location), "location", MAX_TEXT_LENGTH)?;
    optional_text(sent_value(&payload.message), "message", MAX_LONG_TEXT_LENGTH)?;
    if let Some(rating) = payload.rating {
        is_valid_rating(rating)?;
    }
    Ok(())
}

/// GET /admin/api/testimonials, newest first
pub async fn list(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let items = sqlx::query_as::<_, Testimonial>(
        "SELECT id, name, location, rating, message, created_at FROM testimonials ORDER BY created_at DESC, id DESC",
    )
    .fetch_all(pool.get_ref())
    .await?;

    let body: Vec<AdminTestimonial> = items.into_iter().map(AdminTestimonial::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /admin/api/testimonials
pub async fn create(
    form: web::Json<TestimonialPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let payload = form.into_inner();
    check_fields(&payload)?;

    let id = sqlx::query_scalar::<_, i64>(
        r#"
        INSERT INTO testimonials (name, location, rating, message)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(sent_value(&payload.name))
    .bind(sent_value(&payload.location))
    .bind(payload.rating.unwrap_or(MAX_RATING))
    .bind(sent_value(&payload.message))
    .fetch_one(pool.get_ref())
    .await?;

    AuditLog::success("CREATE", "testimonial", "Testimonial created")
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Created().json(Created { id }))
}

/// PUT /admin/api/testimonials/{id}
///
/// Fields sent as `null` are cleared, except `rating`, which is kept.
pub async fn update(
    path: web::Path<i64>,
    form: web::Json<TestimonialPayload>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let payload = form.into_inner();
    check_fields(&payload)?;

    let result = sqlx::query(
        r#"
        UPDATE testimonials SET
            name = CASE WHEN $2 THEN $3 ELSE name END,
            location = CASE WHEN $4 THEN $5 ELSE location END,
            rating = COALESCE($6, rating),
            message = CASE WHEN $7 THEN $8 ELSE message END
        WHERE id = $1
        "#,
    )
    .bind(id)
    .bind(payload.name.is_some())
    .bind(sent_value(&payload.name))
    .bind(payload.location.is_some())
    .bind(sent_value(&payload.location))
    .bind(payload.rating)
    .bind(payload.message.is_some())
    .bind(sent_value(&payload.message))
    .execute(pool.get_ref())
    .await?;

    if result.rows_affected() == 0 {
        return Err(not_found("Testimonial"));
    }

    AuditLog::success("UPDATE", "testimonial", "Testimonial updated")
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Ok().json(Message { message: "Updated" }))
}

/// DELETE /admin/api/testimonials/{id}
pub async fn delete(
    path: web::Path<i64>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();

    let result = sqlx::query("DELETE FROM testimonials WHERE id = $1")
        .bind(id)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found("Testimonial"));
    }

    AuditLog::success("DELETE", "testimonial", "Testimonial deleted")
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Ok().json(Message { message: "Deleted" }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rating_outside_range_is_rejected() {
        let payload = TestimonialPayload {
            rating: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            check_fields(&payload),
            Err(ValidationError::OutOfRange("rating", _, _))
        ));
    }

    #[test]
    fn long_message_is_rejected() {
        let payload = TestimonialPayload {
            message: Some(Some("x".repeat(MAX_LONG_TEXT_LENGTH + 1))),
            ..Default::default()
        };
        assert!(matches!(
            check_fields(&payload),
            Err(ValidationError::TooLong("message", MAX_LONG_TEXT_LENGTH))
        ));
    }
}
