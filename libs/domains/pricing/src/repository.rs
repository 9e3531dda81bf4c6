use async_trait::async_trait;

use crate::error::PricingResult;
use crate::models::{CreateProduct, Product, UpdateProduct, UpsertProduct};

/// Repository trait for product persistence
///
/// This trait defines the data access interface for the pricing table.
/// Implementations can use different storage backends (PostgreSQL, in-memory).
/// Batch operations are all-or-nothing: a failing entry leaves the table
/// untouched.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PricingRepository: Send + Sync {
    /// Get a product by code
    async fn get(&self, code: &str) -> PricingResult<Option<Product>>;

    /// List all products, ordered by code
    async fn list(&self) -> PricingResult<Vec<Product>>;

    /// Insert a product, replacing any existing product with the same code
    async fn put(&self, input: CreateProduct) -> PricingResult<Product>;

    /// Replace the whole table with the given products
    async fn replace_all(&self, inputs: Vec<CreateProduct>) -> PricingResult<Vec<Product>>;

    /// Insert or patch several products in one atomic batch.
    ///
    /// Entries whose code exists are patched field by field; entries with a
    /// new code are inserted and must carry a unit price.
    async fn upsert_many(&self, inputs: Vec<UpsertProduct>) -> PricingResult<Vec<Product>>;

    /// Patch a single existing product
    async fn update(&self, code: &str, input: UpdateProduct) -> PricingResult<Product>;

    /// Delete products by code, returning the codes that actually existed
    async fn delete_many(&self, codes: &[String]) -> PricingResult<Vec<String>>;
}
