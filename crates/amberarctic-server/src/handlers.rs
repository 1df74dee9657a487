//! Request handlers, one per endpoint.
//!
//! Every handler follows the same shape: validate the input (body or
//! query), perform at most one store operation, and return a JSON value.
//! Validation failures surface before any store call; store failures
//! convert to storage errors per-handler. None retry, none run
//! multi-step transactions.

use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use amberarctic_core::{
    recommend_size, ApiError, ApiResult, ContactMessage, Entity, Order, Product, Review,
    SizeProfile,
};
use amberarctic_store::bson::{doc, Document};
use amberarctic_store::to_document;

use crate::diagnostics;
use crate::response::doc_to_value;
use crate::seed;
use crate::state::{AppState, BRAND};

/// Parses a JSON request body, mapping failures to validation errors.
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> ApiResult<T> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::validation(format!("Invalid request body: {e}")))
}

/// `GET /`: brand banner.
pub(crate) fn root() -> ApiResult<serde_json::Value> {
    Ok(serde_json::json!({ "brand": BRAND, "status": "ok" }))
}

/// `GET /test`: diagnostics; never fails.
pub(crate) async fn diagnostics(state: &AppState) -> ApiResult<serde_json::Value> {
    let report = diagnostics::report(state).await;
    serde_json::to_value(report)
        .map_err(|e| ApiError::storage(format!("failed to render diagnostics: {e}")))
}

/// `POST /seed`: idempotent sample catalog population.
pub(crate) async fn seed(state: &AppState) -> ApiResult<serde_json::Value> {
    let report = seed::run(state.store()?).await?;
    Ok(serde_json::json!({ "seeded": report.seeded, "count": report.count }))
}

/// Query parameters accepted by `GET /products`.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
pub(crate) struct ProductQuery {
    /// Exact match on gender.
    #[serde(default)]
    pub gender: Option<String>,
    /// Membership match against the activity list.
    #[serde(default)]
    pub activity: Option<String>,
    /// Upper bound: products rated for `temperature_min_c <= min_temp`.
    #[serde(default)]
    pub min_temp: Option<i32>,
}

impl ProductQuery {
    /// Parses the raw query string.
    pub(crate) fn parse(query: Option<&str>) -> ApiResult<Self> {
        serde_urlencoded::from_str(query.unwrap_or(""))
            .map_err(|e| ApiError::validation(format!("Invalid query parameters: {e}")))
    }

    /// Builds the structural store filter.
    pub(crate) fn to_filter(&self) -> Document {
        let mut filter = Document::new();
        if let Some(gender) = &self.gender {
            filter.insert("gender", gender.clone());
        }
        if let Some(activity) = &self.activity {
            filter.insert("activity", doc! { "$in": [activity.clone()] });
        }
        if let Some(min_temp) = self.min_temp {
            filter.insert("temperature_min_c", doc! { "$lte": min_temp });
        }
        filter
    }
}

/// `GET /products`: filtered catalog listing.
pub(crate) async fn list_products(
    state: &AppState,
    query: Option<&str>,
) -> ApiResult<serde_json::Value> {
    let filter = ProductQuery::parse(query)?.to_filter();
    let documents = state.store()?.find(Product::COLLECTION, filter).await?;
    let values = documents
        .into_iter()
        .map(doc_to_value)
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(serde_json::Value::Array(values))
}

/// `GET /products/{slug}`: single product lookup by slug.
pub(crate) async fn get_product(state: &AppState, slug: &str) -> ApiResult<serde_json::Value> {
    let document = state
        .store()?
        .find_one(Product::COLLECTION, doc! { "slug": slug })
        .await?
        .ok_or_else(|| ApiError::not_found_resource("product", slug))?;
    doc_to_value(document)
}

/// `GET /reviews/{product_slug}`: reviews for one product.
pub(crate) async fn list_reviews(state: &AppState, slug: &str) -> ApiResult<serde_json::Value> {
    let documents = state
        .store()?
        .find(Review::COLLECTION, doc! { "product_slug": slug })
        .await?;
    let values = documents
        .into_iter()
        .map(doc_to_value)
        .collect::<ApiResult<Vec<_>>>()?;
    Ok(serde_json::Value::Array(values))
}

/// `POST /reviews`: records a review.
pub(crate) async fn submit_review(state: &AppState, body: &Bytes) -> ApiResult<serde_json::Value> {
    let review: Review = parse_body(body)?;
    review.validate()?;
    state
        .store()?
        .insert(Review::COLLECTION, to_document(&review)?)
        .await?;
    Ok(serde_json::json!({ "ok": true }))
}

/// `POST /contact`: records a contact message.
pub(crate) async fn submit_contact(state: &AppState, body: &Bytes) -> ApiResult<serde_json::Value> {
    let message: ContactMessage = parse_body(body)?;
    state
        .store()?
        .insert(ContactMessage::COLLECTION, to_document(&message)?)
        .await?;
    Ok(serde_json::json!({ "ok": true }))
}

/// `POST /size/recommend`: pure size recommendation, no store access.
pub(crate) fn recommend(body: &Bytes) -> ApiResult<serde_json::Value> {
    let profile: SizeProfile = parse_body(body)?;
    profile.validate()?;
    Ok(serde_json::json!({ "recommended_size": recommend_size(&profile) }))
}

/// `POST /checkout`: records an order as-is; the total is client-supplied
/// and never recomputed from item prices.
pub(crate) async fn checkout(state: &AppState, body: &Bytes) -> ApiResult<serde_json::Value> {
    let order: Order = parse_body(body)?;
    order.validate()?;
    state
        .store()?
        .insert(Order::COLLECTION, to_document(&order)?)
        .await?;
    Ok(serde_json::json!({ "ok": true }))
}
