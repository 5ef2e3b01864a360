use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::configuration::ApplicationSettings;

#[derive(Serialize)]
struct HealthResponse<'a> {
    status: &'static str,
    env: &'a str,
}

pub async fn health_check(app: web::Data<ApplicationSettings>) -> HttpResponse {
    tracing::debug!("Health check endpoint called");
    HttpResponse::Ok().json(HealthResponse {
        status: "ok",
        env: &app.environment,
    })
}
