//! Catalog seed routine.
//!
//! Idempotent one-time population of sample products: when the `product`
//! collection already holds documents, nothing is written and the existing
//! count is reported. Repeated invocation never duplicates data.

use std::sync::Arc;

use serde::Serialize;

use amberarctic_core::{ApiResult, Entity, Product};
use amberarctic_store::{to_document, DocumentStore};
use amberarctic_store::bson::Document;

/// Outcome of a seed invocation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SeedReport {
    /// Whether any documents were written.
    pub seeded: bool,
    /// Number of products written, or already present when `seeded` is false.
    pub count: usize,
}

/// Seeds the catalog if and only if the product collection is empty.
pub async fn run(store: &Arc<dyn DocumentStore>) -> ApiResult<SeedReport> {
    let existing = store.find(Product::COLLECTION, Document::new()).await?;
    if !existing.is_empty() {
        tracing::debug!(count = existing.len(), "Catalog already seeded");
        return Ok(SeedReport {
            seeded: false,
            count: existing.len(),
        });
    }

    let samples = sample_products();
    for product in &samples {
        store
            .insert(Product::COLLECTION, to_document(product)?)
            .await?;
    }
    tracing::info!(count = samples.len(), "Seeded sample catalog");
    Ok(SeedReport {
        seeded: true,
        count: samples.len(),
    })
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}

/// The fixed sample catalog.
pub(crate) fn sample_products() -> Vec<Product> {
    vec![
        Product {
            title: "Arctic Edge Pro".into(),
            slug: "arctic-edge-pro".into(),
            gender: "Unisex".into(),
            activity: strings(&["city", "hiking", "travel"]),
            description: Some(
                "Premium heated jacket engineered for -30°C with sleek urban design.".into(),
            ),
            price: 399.0,
            images: strings(&[
                "/images/arctic-edge-pro-1.jpg",
                "/images/arctic-edge-pro-2.jpg",
            ]),
            colors: strings(&["Glacier Blue", "Charcoal Black", "Frost White"]),
            sizes: strings(&["XS", "S", "M", "L", "XL", "XXL"]),
            temperature_min_c: -30,
            battery_life_hours: 10,
            warmth_level: 9,
            features: strings(&["waterproof", "windproof", "rechargeable", "lightweight"]),
        },
        Product {
            title: "Polar Stealth Lite".into(),
            slug: "polar-stealth-lite".into(),
            gender: "Men".into(),
            activity: strings(&["city", "biking"]),
            description: Some("Minimal techwear silhouette with targeted heating zones.".into()),
            price: 329.0,
            images: strings(&["/images/polar-stealth-lite-1.jpg"]),
            colors: strings(&["Charcoal Black", "Icy Silver"]),
            sizes: strings(&["S", "M", "L", "XL"]),
            temperature_min_c: -20,
            battery_life_hours: 8,
            warmth_level: 7,
            features: strings(&["waterproof", "windproof", "rechargeable"]),
        },
        Product {
            title: "Glacier Flow Aero".into(),
            slug: "glacier-flow-aero".into(),
            gender: "Women".into(),
            activity: strings(&["travel", "hiking"]),
            description: Some(
                "Featherlight performance for fast movement in cold climates.".into(),
            ),
            price: 349.0,
            images: strings(&["/images/glacier-flow-aero-1.jpg"]),
            colors: strings(&["Aurora Blue", "Frost White"]),
            sizes: strings(&["XS", "S", "M", "L"]),
            temperature_min_c: -18,
            battery_life_hours: 9,
            warmth_level: 8,
            features: strings(&["waterproof", "rechargeable", "lightweight"]),
        },
    ]
}
