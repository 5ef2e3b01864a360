/// Catalogue and site-content rows
///
/// Row types shared by the public and admin routes. Timestamps are
/// serialized as RFC 3339 strings where they are exposed at all.
///
/// Update payloads tell a field sent as `null` (`Some(None)`, clear it)
/// apart from a field left out (`None`, keep it).

use chrono::{DateTime, Utc};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Wraps whatever was sent, `null` included, in `Some`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// The value to store for a nullable field; `None` when absent or `null`.
pub fn sent_value(field: &Option<Option<String>>) -> Option<&str> {
    field.as_ref().and_then(|value| value.as_deref())
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub price: Decimal,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Public catalogue view; price stays numeric
#[derive(Debug, Serialize)]
pub struct PublicProduct {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<Product> for PublicProduct {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            price: p.price.to_f64().unwrap_or_default(),
            category: p.category,
            description: p.description,
            image_url: p.image_url,
        }
    }
}

/// Admin view; price rendered as a fixed two-decimal string
#[derive(Debug, Serialize)]
pub struct AdminProduct {
    pub id: i64,
    pub name: String,
    pub category: Option<String>,
    pub price: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl From<Product> for AdminProduct {
    fn from(p: Product) -> Self {
        Self {
            id: p.id,
            name: p.name,
            category: p.category,
            price: format!("{:.2}", p.price),
            description: p.description,
            image_url: p.image_url,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ProductPayload {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub category: Option<Option<String>>,
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Testimonial {
    pub id: i64,
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: i32,
    pub message: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct PublicTestimonial {
    pub id: i64,
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: i32,
    pub message: Option<String>,
}

impl From<Testimonial> for PublicTestimonial {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            name: t.name,
            location: t.location,
            rating: t.rating,
            message: t.message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AdminTestimonial {
    pub id: i64,
    pub name: Option<String>,
    pub location: Option<String>,
    pub rating: i32,
    pub message: Option<String>,
    pub created_at: String,
}

impl From<Testimonial> for AdminTestimonial {
    fn from(t: Testimonial) -> Self {
        Self {
            id: t.id,
            name: t.name,
            location: t.location,
            rating: t.rating,
            message: t.message,
            created_at: t.created_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct TestimonialPayload {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub location: Option<Option<String>>,
    pub rating: Option<i32>,
    #[serde(default, deserialize_with = "present")]
    pub message: Option<Option<String>>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PortfolioItem {
    pub id: i64,
    pub title: String,
    pub tag: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    #[serde(skip)]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Deserialize)]
pub struct PortfolioPayload {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub tag: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    pub image_url: Option<Option<String>>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContactRequest {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vehicle_model: Option<String>,
    pub message: Option<String>,
    pub handled: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AdminContactRequest {
    pub id: i64,
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vehicle_model: Option<String>,
    pub message: Option<String>,
    pub created_at: String,
    pub handled: bool,
}

impl From<ContactRequest> for AdminContactRequest {
    fn from(c: ContactRequest) -> Self {
        Self {
            id: c.id,
            name: c.name,
            email: c.email,
            phone: c.phone,
            vehicle_model: c.vehicle_model,
            message: c.message,
            created_at: c.created_at.to_rfc3339(),
            handled: c.handled,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub vehicle_model: Option<String>,
    pub message: Option<String>,
}

/// `{"id": ..}` body of every create response
#[derive(Debug, Serialize)]
pub struct Created {
    pub id: i64,
}

/// `{"message": ..}` body of update/delete responses
#[derive(Debug, Serialize)]
pub struct Message {
    pub message: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn product(price: Decimal) -> Product {
        Product {
            id: 1,
            name: "LED Lighting Kit".into(),
            category: Some("electronics".into()),
            price,
            description: None,
            image_url: None,
            created_at: Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn admin_product_price_is_a_string() {
        let json = serde_json::to_value(AdminProduct::from(product(Decimal::from(8000)))).unwrap();
        assert_eq!(json["price"], "8000.00");
    }

    #[test]
    fn public_product_price_is_numeric() {
        let json = serde_json::to_value(PublicProduct::from(product(Decimal::new(1950, 2)))).unwrap();
        assert_eq!(json["price"], 19.5);
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn portfolio_item_hides_created_at() {
        let item = PortfolioItem {
            id: 2,
            title: "Matte red wrap".into(),
            tag: Some("wrap".into()),
            description: None,
            image_url: None,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(item).unwrap();
        assert_eq!(json["title"], "Matte red wrap");
        assert!(json.get("created_at").is_none());
    }

    #[test]
    fn payload_fields_default_to_absent() {
        let payload: ProductPayload = serde_json::from_str(r#"{"price": 12}"#).unwrap();
        assert!(payload.name.is_none());
        assert!(payload.image_url.is_none());
        assert_eq!(payload.price, Some(Decimal::from(12)));
    }

    #[test]
    fn null_field_is_told_apart_from_missing_field() {
        let payload: ProductPayload =
            serde_json::from_str(r#"{"image_url": null, "category": "wraps"}"#).unwrap();

        assert_eq!(payload.image_url, Some(None));
        assert_eq!(sent_value(&payload.image_url), None);
        assert_eq!(sent_value(&payload.category), Some("wraps"));
        assert_eq!(payload.description, None);
    }

    #[test]
    fn decimal_price_keeps_cents() {
        let payload: ProductPayload = serde_json::from_str(r#"{"price": 7500.10}"#).unwrap();
        let price = payload.price.unwrap();

        assert_eq!(format!("{:.2}", price), "7500.10");
        let json = serde_json::to_value(AdminProduct::from(product(price))).unwrap();
        assert_eq!(json["price"], "7500.10");
    }
}
