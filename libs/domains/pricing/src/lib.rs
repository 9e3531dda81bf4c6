//! Pricing Domain
//!
//! This module provides a complete domain implementation for managing the
//! product pricing table and computing checkout subtotals with bulk
//! discounts.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP surface (axum + OpenAPI)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Business logic, validation, subtotal calculation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Data access (trait + Postgres/in-memory backends)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Entities, DTOs, the special price parser
//! └─────────────┘
//! ```

pub mod calculator;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use calculator::SpecialPrice;
pub use error::{PricingError, PricingResult};
pub use memory::MemoryPricingRepository;
pub use models::{
    CreateProduct, DeleteCodes, DeletedCodes, LineItem, Product, SubtotalResponse, UpdateProduct,
    UpsertProduct,
};
pub use postgres::PgPricingRepository;
pub use repository::PricingRepository;
pub use service::PricingService;
