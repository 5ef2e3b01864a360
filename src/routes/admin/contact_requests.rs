use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;

use crate::audit::AuditLog;
use crate::auth::Claims;
use crate::error::{not_found, AppError};
use crate::models::{AdminContactRequest, ContactRequest, Message};

#[derive(Deserialize)]
pub struct MarkHandledRequest {
    pub handled: Option<bool>,
}

/// GET /admin/api/contact-requests, newest first
pub async fn list(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let items = sqlx::query_as::<_, ContactRequest>(
        r#"
        SELECT id, name, email, phone, vehicle_model, message, handled, created_at
        FROM contact_requests
        ORDER BY created_at DESC, id DESC
        "#,
    )
    .fetch_all(pool.get_ref())
    .await?;

    let body: Vec<AdminContactRequest> = items.into_iter().map(AdminContactRequest::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /admin/api/contact-requests/{id}/mark-handled
///
/// The body is optional; `handled` defaults to true.
pub async fn mark_handled(
    path: web::Path<i64>,
    form: Option<web::Json<MarkHandledRequest>>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse, AppError> {
    let id = path.into_inner();
    let handled = form.and_then(|f| f.handled).unwrap_or(true);

    let result = sqlx::query("UPDATE contact_requests SET handled = $2 WHERE id = $1")
        .bind(id)
        .bind(handled)
        .execute(pool.get_ref())
        .await?;

    if result.rows_affected() == 0 {
        return Err(not_found("Contact request"));
    }

    AuditLog::success("UPDATE", "contact_request", format!("handled = {}", handled))
        .with_resource_id(id)
        .with_user_id(claims.sub.clone())
        .record();

    Ok(HttpResponse::Ok().json(Message { message: "Updated" }))
}
