/// Admin API, mounted under `/admin/api` behind `RequireRole`.

pub mod contact_requests;
pub mod overview;
pub mod portfolio;
pub mod products;
pub mod settings;
pub mod testimonials;
pub mod users;

use actix_web::web;

/// Register every guarded admin route on the given scope.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/products")
            .route(web::get().to(products::list))
            .route(web::post().to(products::create)),
    )
    .service(
        web::resource("/products/{id}")
            .route(web::put().to(products::update))
            .route(web::delete().to(products::delete)),
    )
    .service(
        web::resource("/testimonials")
            .route(web::get().to(testimonials::list))
            .route(web::post().to(testimonials::create)),
    )
    .service(
        web::resource("/testimonials/{id}")
            .route(web::put().to(testimonials::update))
            .route(web::delete().to(testimonials::delete)),
    )
    .service(
        web::resource("/portfolio")
            .route(web::get().to(portfolio::list))
            .route(web::post().to(portfolio::create)),
    )
    .service(
        web::resource("/portfolio/{id}")
            .route(web::put().to(portfolio::update))
            .route(web::delete().to(portfolio::delete)),
    )
    .route("/contact-requests", web::get().to(contact_requests::list))
    .route(
        "/contact-requests/{id}/mark-handled",
        web::post().to(contact_requests::mark_handled),
    )
    .service(
        web::resource("/users")
            .route(web::get().to(users::list))
            .route(web::post().to(users::create)),
    )
    .route("/overview", web::get().to(overview::overview))
    .route("/settings", web::get().to(settings::settings));
}
