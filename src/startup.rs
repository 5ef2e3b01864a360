use actix_web::dev::Server;
use actix_web::{error, middleware::Logger, web, App, HttpServer};
use sqlx::PgPool;
use std::net::TcpListener;

use crate::auth::{PasswordHasher, Role};
use crate::configuration::Settings;
use crate::error::{AppError, ValidationError};
use crate::logger::LoggerMiddleware;
use crate::middleware::RequireRole;
use crate::routes::{
    admin, get_product, health_check, list_portfolio, list_products, list_testimonials, login,
    submit_contact_request,
};

pub fn run(
    listener: TcpListener,
    connection: PgPool,
    settings: Settings,
) -> Result<Server, std::io::Error> {
    let connection = web::Data::new(connection);
    let jwt_config = settings.jwt.clone();
    let jwt_config_data = web::Data::new(settings.jwt);
    let app_settings = web::Data::new(settings.application);
    let hasher = web::Data::new(PasswordHasher::new(settings.password.bcrypt_cost));

    let server = HttpServer::new(move || {
        App::new()
            // Global middleware
            .wrap(Logger::default())
            .wrap(LoggerMiddleware)

            // Shared state
            .app_data(connection.clone())
            .app_data(jwt_config_data.clone())
            .app_data(app_settings.clone())
            .app_data(hasher.clone())
            .app_data(json_config())

            .route("/health", web::get().to(health_check))

            // Public site API
            .service(
                web::scope("/api")
                    .route("/products", web::get().to(list_products))
                    .route("/products/{id}", web::get().to(get_product))
                    .route("/testimonials", web::get().to(list_testimonials))
                    .route("/portfolio", web::get().to(list_portfolio))
                    .route("/contact-requests", web::post().to(submit_contact_request)),
            )

            // Login must be registered ahead of the guarded scope
            .route("/admin/api/login", web::post().to(login))
            .service(
                web::scope("/admin/api")
                    .wrap(RequireRole::new(jwt_config.clone(), Role::Admin))
                    .configure(admin::configure),
            )
    })
    .listen(listener)?
    .run();

    Ok(server)
}

/// Malformed or non-JSON bodies become 400 `{"message": ...}`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let detail = err.to_string();
        error::Error::from(AppError::Validation(ValidationError::InvalidBody(detail)))
    })
}
