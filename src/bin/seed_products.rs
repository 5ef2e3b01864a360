//! Inserts the demo catalogue products.

use jnparts::configuration::get_configuration;
use jnparts::telemetry::init_telemetry;
use rust_decimal::Decimal;
use sqlx::postgres::PgPoolOptions;

struct SeedProduct {
    name: &'static str,
    category: &'static str,
    // Whole shillings
    price: i64,
    description: &'static str,
    image_url: &'static str,
}

const PRODUCTS: [SeedProduct; 4] = [
    SeedProduct {
        name: "Performance Exhaust System",
        category: "engine",
        price: 15000,
        description: "High-performance exhaust system for maximum efficiency.",
        image_url: "https://images.unsplash.com/photo-1619405399517-d7fce0f13302?w=800&q=80",
    },
    SeedProduct {
        name: "Body Kit & Spoilers",
        category: "exterior",
        price: 25000,
        description: "Aerodynamic body kits for improved style and stability.",
        image_url: "https://images.unsplash.com/photo-1603584173870-7f23fdae1b7a?w=800&q=80",
    },
    SeedProduct {
        name: "Premium Seats & Upholstery",
        category: "interior",
        price: 30000,
        description: "Luxury leather seats and custom upholstery.",
        image_url: "https://images.unsplash.com/photo-1618843479313-40f8afb4b4d8?w=800&q=80",
    },
    SeedProduct {
        name: "LED Lighting Kit",
        category: "electronics",
        price: 8000,
        description: "Ultra bright car LED lighting kit.",
        image_url: "https://images.unsplash.com/photo-1552519507-da3b142c6e3d?w=800&q=80",
    },
];

#[tokio::main]
async fn main() -> std::io::Result<()> {
    init_telemetry();

    let configuration = get_configuration().map_err(|e| {
        tracing::error!("Failed to read configuration: {}", e);
        std::io::Error::new(std::io::ErrorKind::InvalidInput, "Configuration error")
    })?;

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&configuration.database.connection_string())
        .await
        .map_err(|e| {
            tracing::error!("Failed to connect to database: {}", e);
            std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "Database connection error")
        })?;

    let mut tx = pool.begin().await.map_err(to_io)?;
    for product in PRODUCTS.iter() {
        sqlx::query(
            "INSERT INTO products (name, category, price, description, image_url) VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(product.name)
        .bind(product.category)
        .bind(Decimal::from(product.price))
        .bind(product.description)
        .bind(product.image_url)
        .execute(&mut tx)
        .await
        .map_err(to_io)?;
    }
    tx.commit().await.map_err(to_io)?;

    tracing::info!(count = PRODUCTS.len(), "Demo products added");
    Ok(())
}

fn to_io(e: sqlx::Error) -> std::io::Error {
    tracing::error!("Seeding failed: {}", e);
    std::io::Error::new(std::io::ErrorKind::Other, "Seeding failed")
}
