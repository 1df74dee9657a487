//! # Amberarctic Core
//!
//! Core types for the Amberarctic storefront backend.
//!
//! This crate provides the foundational types used throughout the API:
//!
//! - Entity models ([`Product`], [`Review`], [`ContactMessage`],
//!   [`SizeProfile`], [`Order`]) with deserialization-time and
//!   constructor-time validation
//! - [`ApiError`] - the standard error taxonomy with HTTP status mapping
//!   and a serializable JSON envelope
//! - [`recommend_size`] - the pure size recommendation calculator

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod models;
mod sizing;

pub use error::{
    truncate, ApiError, ApiResult, ErrorCategory, ErrorDetail, ErrorEnvelope, FieldErrors,
    STORAGE_MESSAGE_LIMIT,
};
pub use models::{
    ContactMessage, Entity, Order, OrderItem, Product, Review, SizeProfile, STANDARD_SIZES,
};
pub use sizing::recommend_size;
