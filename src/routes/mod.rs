pub mod admin;
mod auth;
mod health_check;
mod public;

pub use auth::login;
pub use health_check::health_check;
pub use public::{
    get_product, list_portfolio, list_products, list_testimonials, submit_contact_request,
};
