use actix_web::{web, HttpResponse};
use serde::Serialize;
use sqlx::PgPool;

use crate::auth::store;
use crate::error::AppError;

#[derive(Serialize)]
pub struct Overview {
    pub products: i64,
    pub contacts: i64,
    pub admins: i64,
}

/// GET /admin/api/overview
pub async fn overview(pool: web::Data<PgPool>) -> Result<HttpResponse, AppError> {
    let products = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
        .fetch_one(pool.get_ref())
        .await?;
    let contacts = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM contact_requests")
        .fetch_one(pool.get_ref())
        .await?;
    let admins = store::count(pool.get_ref()).await?;

    Ok(HttpResponse::Ok().json(Overview {
        products,
        contacts,
        admins,
    }))
}
