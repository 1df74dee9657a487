//! Entity models for the storefront.
//!
//! Each persisted entity maps to one document store collection, named as the
//! lowercase form of the entity name (`Product` → `product`). Validation is
//! two-phase: serde deserialization rejects missing or ill-typed fields, and
//! [`validate`](Product::validate) checks numeric bounds, producing an
//! [`ApiError::Validation`] that names every offending field. An entity is
//! never persisted when validation fails.
//!
//! `Review` and `Order` reference a product by slug only; no referential
//! integrity is enforced at write time.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult, FieldErrors};

/// The full standard size run, used as the default for [`Product::sizes`].
pub const STANDARD_SIZES: [&str; 6] = ["XS", "S", "M", "L", "XL", "XXL"];

/// A persisted entity with a fixed document store collection.
pub trait Entity {
    /// Collection name: the lowercase form of the entity name.
    const COLLECTION: &'static str;
}

fn default_sizes() -> Vec<String> {
    STANDARD_SIZES.iter().map(ToString::to_string).collect()
}

/// A heated-apparel product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Product model name.
    pub title: String,
    /// URL-safe identifier, unique per product; the external lookup key.
    pub slug: String,
    /// Men | Women | Unisex.
    pub gender: String,
    /// Activities the product is suited for (city, hiking, biking, travel).
    #[serde(default)]
    pub activity: Vec<String>,
    /// Marketing description.
    #[serde(default)]
    pub description: Option<String>,
    /// Price in USD.
    pub price: f64,
    /// Image URLs, in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Available color names.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Available sizes; defaults to the full standard run.
    #[serde(default = "default_sizes")]
    pub sizes: Vec<String>,
    /// Minimum comfortable temperature in Celsius.
    pub temperature_min_c: i32,
    /// Battery life on standard mode, in hours.
    pub battery_life_hours: i32,
    /// Warmth scale, 1-10.
    pub warmth_level: i32,
    /// Feature badges (waterproof, windproof, ...).
    #[serde(default)]
    pub features: Vec<String>,
}

impl Entity for Product {
    const COLLECTION: &'static str = "product";
}

impl Product {
    /// Validates numeric bounds: `price >= 0` and `warmth_level` in 1-10.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        if self.price < 0.0 {
            errors.add("price", "must be greater than or equal to 0");
        }
        if !(1..=10).contains(&self.warmth_level) {
            errors.add("warmth_level", "must be between 1 and 10");
        }
        errors.into_result()
    }
}

/// A customer review, referencing a product by slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Review {
    /// Slug of the reviewed product (weak reference, not checked).
    pub product_slug: String,
    /// Reviewer name.
    pub name: String,
    /// Star rating, 1-5.
    pub rating: i32,
    /// Review text.
    pub comment: String,
    /// Reviewer city.
    #[serde(default)]
    pub city: Option<String>,
}

impl Entity for Review {
    const COLLECTION: &'static str = "review";
}

impl Review {
    /// Validates that the rating is within 1-5.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        if !(1..=5).contains(&self.rating) {
            errors.add("rating", "must be between 1 and 5");
        }
        errors.into_result()
    }
}

/// A message submitted through the contact form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContactMessage {
    /// Sender name.
    pub name: String,
    /// Sender email address.
    pub email: String,
    /// Message body.
    pub message: String,
}

impl Entity for ContactMessage {
    const COLLECTION: &'static str = "contactmessage";
}

/// Body measurements used to compute a size recommendation.
///
/// Ephemeral: computed against and discarded, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SizeProfile {
    /// Height in centimeters, 120-230.
    pub height_cm: i32,
    /// Weight in kilograms, 35-180.
    pub weight_kg: i32,
    /// Body build: slim | average | athletic | broad (free text).
    pub build: String,
    /// Accepted for symmetry with the catalog but not used in scoring.
    #[serde(default)]
    pub gender: Option<String>,
}

impl SizeProfile {
    /// Validates height and weight bounds.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        if !(120..=230).contains(&self.height_cm) {
            errors.add("height_cm", "must be between 120 and 230");
        }
        if !(35..=180).contains(&self.weight_kg) {
            errors.add("weight_kg", "must be between 35 and 180");
        }
        errors.into_result()
    }
}

/// A single line item in an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OrderItem {
    /// Slug of the ordered product (weak reference, not checked).
    pub product_slug: String,
    /// Chosen size.
    pub size: String,
    /// Chosen color.
    pub color: String,
    /// Quantity ordered, at least 1.
    pub quantity: i32,
}

/// A checkout order.
///
/// `total` is client-supplied and recorded as-is; the server never
/// recomputes it from item prices.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Ordered items.
    pub items: Vec<OrderItem>,
    /// Customer email address.
    pub email: String,
    /// Recipient name.
    pub shipping_name: String,
    /// Street address.
    pub shipping_address: String,
    /// City.
    pub city: String,
    /// Country.
    pub country: String,
    /// Postal code.
    pub postal_code: String,
    /// Order total in USD.
    pub total: f64,
}

impl Entity for Order {
    const COLLECTION: &'static str = "order";
}

impl Order {
    /// Validates `total >= 0` and `quantity >= 1` on every item.
    pub fn validate(&self) -> ApiResult<()> {
        let mut errors = FieldErrors::new();
        if self.total < 0.0 {
            errors.add("total", "must be greater than or equal to 0");
        }
        for (idx, item) in self.items.iter().enumerate() {
            if item.quantity < 1 {
                errors.add(
                    format!("items[{idx}].quantity"),
                    "must be greater than or equal to 1",
                );
            }
        }
        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn sample_product_json() -> serde_json::Value {
        serde_json::json!({
            "title": "Arctic Edge Pro",
            "slug": "arctic-edge-pro",
            "gender": "Unisex",
            "activity": ["city", "hiking"],
            "price": 399.0,
            "temperature_min_c": -30,
            "battery_life_hours": 10,
            "warmth_level": 9
        })
    }

    #[test]
    fn test_product_list_defaults() {
        let product: Product = serde_json::from_value(sample_product_json()).unwrap();
        assert!(product.images.is_empty());
        assert!(product.colors.is_empty());
        assert!(product.features.is_empty());
        assert!(product.description.is_none());
        assert_eq!(product.sizes, default_sizes());
        assert!(product.validate().is_ok());
    }

    #[test]
    fn test_product_negative_price_rejected() {
        let mut json = sample_product_json();
        json["price"] = serde_json::json!(-1.0);
        let product: Product = serde_json::from_value(json).unwrap();
        let err = product.validate().unwrap_err();
        match err {
            ApiError::Validation { fields, .. } => {
                assert!(fields.unwrap().fields.contains_key("price"));
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_product_warmth_level_bounds() {
        for (level, ok) in [(0, false), (1, true), (10, true), (11, false)] {
            let mut json = sample_product_json();
            json["warmth_level"] = serde_json::json!(level);
            let product: Product = serde_json::from_value(json).unwrap();
            assert_eq!(product.validate().is_ok(), ok, "warmth_level {level}");
        }
    }

    #[test]
    fn test_product_missing_field_fails_deserialization() {
        let mut json = sample_product_json();
        json.as_object_mut().unwrap().remove("slug");
        assert!(serde_json::from_value::<Product>(json).is_err());
    }

    #[test]
    fn test_review_rating_bounds() {
        for (rating, ok) in [(0, false), (1, true), (5, true), (6, false)] {
            let review = Review {
                product_slug: "arctic-edge-pro".into(),
                name: "Mika".into(),
                rating,
                comment: "Warm.".into(),
                city: None,
            };
            assert_eq!(review.validate().is_ok(), ok, "rating {rating}");
        }
    }

    #[test]
    fn test_size_profile_bounds() {
        let profile = SizeProfile {
            height_cm: 170,
            weight_kg: 70,
            build: "average".into(),
            gender: None,
        };
        assert!(profile.validate().is_ok());

        let too_tall = SizeProfile {
            height_cm: 231,
            ..profile.clone()
        };
        assert!(too_tall.validate().is_err());

        let too_light = SizeProfile {
            weight_kg: 34,
            ..profile
        };
        assert!(too_light.validate().is_err());
    }

    fn sample_order(total: f64, quantity: i32) -> Order {
        Order {
            items: vec![OrderItem {
                product_slug: "arctic-edge-pro".into(),
                size: "M".into(),
                color: "Charcoal Black".into(),
                quantity,
            }],
            email: "buyer@example.com".into(),
            shipping_name: "K. Lahti".into(),
            shipping_address: "1 Frost Way".into(),
            city: "Oulu".into(),
            country: "FI".into(),
            postal_code: "90100".into(),
            total,
        }
    }

    #[test]
    fn test_order_negative_total_rejected() {
        let err = sample_order(-5.0, 1).validate().unwrap_err();
        assert!(err.to_string().contains("total"));
    }

    #[test]
    fn test_order_zero_quantity_rejected() {
        let err = sample_order(399.0, 0).validate().unwrap_err();
        assert!(err.to_string().contains("items[0].quantity"));
    }

    #[test]
    fn test_order_valid() {
        assert!(sample_order(399.0, 2).validate().is_ok());
    }

    #[test]
    fn test_collection_names() {
        assert_eq!(Product::COLLECTION, "product");
        assert_eq!(Review::COLLECTION, "review");
        assert_eq!(ContactMessage::COLLECTION, "contactmessage");
        assert_eq!(Order::COLLECTION, "order");
    }
}
