pub mod audit;
pub mod auth;
pub mod bootstrap;
pub mod configuration;
pub mod error;
pub mod logger;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod startup;
pub mod telemetry;
pub mod validators;
