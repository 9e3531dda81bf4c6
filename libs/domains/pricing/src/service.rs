use std::collections::HashSet;
use std::sync::Arc;

use validator::Validate;

use crate::calculator::{self, SpecialPrice};
use crate::error::{PricingError, PricingResult};
use crate::models::{CreateProduct, LineItem, Product, UpdateProduct, UpsertProduct};
use crate::repository::PricingRepository;

/// Service for managing the pricing table and computing checkout subtotals
#[derive(Clone)]
pub struct PricingService<R: PricingRepository> {
    repository: Arc<R>,
}

impl<R: PricingRepository> PricingService<R> {
    /// Create a new pricing service
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Get the full pricing table, ordered by code
    pub async fn get_table(&self) -> PricingResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Add a product, replacing any existing product with the same code
    pub async fn add_or_replace(&self, input: CreateProduct) -> PricingResult<Product> {
        check(&input, &input.code)?;
        self.repository.put(input).await
    }

    /// Replace the whole pricing table.
    ///
    /// Every entry is validated before anything is written, so one bad
    /// entry rejects the whole request and leaves the table as it was.
    /// Duplicate codes are rejected; codes are primary keys, so the same
    /// code twice in one table is a contradiction, not a merge.
    pub async fn replace_table(&self, inputs: Vec<CreateProduct>) -> PricingResult<Vec<Product>> {
        let mut seen = HashSet::new();
        for input in &inputs {
            check(input, &input.code)?;
            if !seen.insert(input.code.as_str()) {
                return Err(PricingError::InvalidFormat(format!(
                    "product '{}': duplicate code in request",
                    input.code
                )));
            }
        }
        self.repository.replace_all(inputs).await
    }

    /// Insert or patch several products in one atomic batch
    pub async fn upsert_products(&self, inputs: Vec<UpsertProduct>) -> PricingResult<Vec<Product>> {
        for input in &inputs {
            check(input, &input.code)?;
        }
        self.repository.upsert_many(inputs).await
    }

    /// Patch a single existing product
    pub async fn patch_product(&self, code: &str, input: UpdateProduct) -> PricingResult<Product> {
        check(&input, code)?;
        self.repository.update(code, input).await
    }

    /// Delete products by code.
    ///
    /// Unknown codes are skipped; the returned list names the codes that
    /// were actually removed. Fails with `NotFound` when none of the
    /// requested codes existed.
    pub async fn delete_products(&self, codes: Vec<String>) -> PricingResult<Vec<String>> {
        if codes.is_empty() {
            return Err(PricingError::BadInputShape(
                "codes must not be empty".to_string(),
            ));
        }

        let deleted = self.repository.delete_many(&codes).await?;

        if deleted.is_empty() {
            return Err(PricingError::NotFound(
                "none of the requested codes exist".to_string(),
            ));
        }
        if deleted.len() < codes.len() {
            tracing::warn!(
                requested = codes.len(),
                deleted = deleted.len(),
                "Some requested codes did not exist and were skipped"
            );
        }

        Ok(deleted)
    }

    /// Compute the subtotal for a list of line items.
    ///
    /// Fails fast on the first unknown product code; no partial subtotal
    /// is returned.
    pub async fn compute_subtotal(&self, items: &[LineItem]) -> PricingResult<i64> {
        let mut subtotal = 0i64;

        for item in items {
            let product = self
                .repository
                .get(&item.code)
                .await?
                .ok_or_else(|| PricingError::NotFound(item.code.clone()))?;

            let special = product
                .special_price
                .as_deref()
                .map(SpecialPrice::parse)
                .transpose()
                .map_err(|_| {
                    PricingError::Internal(format!(
                        "stored special price for '{}' is corrupt",
                        product.code
                    ))
                })?;

            let line_total =
                calculator::item_total(product.unit_price, special.as_ref(), item.quantity)
                    .ok_or_else(|| {
                        PricingError::Internal(format!(
                            "subtotal overflow on product '{}'",
                            product.code
                        ))
                    })?;
            subtotal = subtotal.checked_add(line_total).ok_or_else(|| {
                PricingError::Internal("subtotal exceeds the representable range".to_string())
            })?;
        }

        Ok(subtotal)
    }
}

/// Validate an input DTO, folding validator errors into `InvalidFormat`
/// with the product code for context.
fn check<T: Validate>(input: &T, code: &str) -> PricingResult<()> {
    input
        .validate()
        .map_err(|e| PricingError::InvalidFormat(format!("product '{}': {}", code, e)))
}
