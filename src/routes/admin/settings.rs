use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::configuration::ApplicationSettings;

#[derive(Serialize)]
pub struct SiteSettings<'a> {
    pub site_name: &'a str,
    pub version: &'static str,
    pub maintenance_mode: bool,
}

/// GET /admin/api/settings
pub async fn settings(app: web::Data<ApplicationSettings>) -> HttpResponse {
    HttpResponse::Ok().json(SiteSettings {
        site_name: &app.site_name,
        version: env!("CARGO_PKG_VERSION"),
        maintenance_mode: app.maintenance_mode,
    })
}
