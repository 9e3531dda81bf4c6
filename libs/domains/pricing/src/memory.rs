//! In-memory repository backend, used in tests and local demos.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::{PricingError, PricingResult};
use crate::models::{CreateProduct, Product, UpdateProduct, UpsertProduct};
use crate::repository::PricingRepository;

/// In-memory implementation of PricingRepository backed by a `BTreeMap`,
/// so listings come back ordered by code like the Postgres backend.
#[derive(Default)]
pub struct MemoryPricingRepository {
    products: RwLock<BTreeMap<String, Product>>,
}

impl MemoryPricingRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository seeded with the default pricing table
    pub fn with_default_table() -> Self {
        let products = default_table()
            .into_iter()
            .map(|product| (product.code.clone(), product))
            .collect();
        Self {
            products: RwLock::new(products),
        }
    }
}

/// The seed table: A and B carry bulk deals, C and D do not.
fn default_table() -> Vec<Product> {
    vec![
        Product {
            code: "A".to_string(),
            unit_price: 50,
            special_price: Some("3 for 140".to_string()),
        },
        Product {
            code: "B".to_string(),
            unit_price: 35,
            special_price: Some("2 for 60".to_string()),
        },
        Product {
            code: "C".to_string(),
            unit_price: 25,
            special_price: None,
        },
        Product {
            code: "D".to_string(),
            unit_price: 12,
            special_price: None,
        },
    ]
}

#[async_trait]
impl PricingRepository for MemoryPricingRepository {
    async fn get(&self, code: &str) -> PricingResult<Option<Product>> {
        let guard = self.products.read().await;
        Ok(guard.get(code).cloned())
    }

    async fn list(&self) -> PricingResult<Vec<Product>> {
        let guard = self.products.read().await;
        Ok(guard.values().cloned().collect())
    }

    async fn put(&self, input: CreateProduct) -> PricingResult<Product> {
        let product = Product {
            code: input.code,
            unit_price: input.unit_price,
            special_price: input.special_price,
        };
        let mut guard = self.products.write().await;
        guard.insert(product.code.clone(), product.clone());
        Ok(product)
    }

    async fn replace_all(&self, inputs: Vec<CreateProduct>) -> PricingResult<Vec<Product>> {
        let mut staged = BTreeMap::new();
        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let product = Product {
                code: input.code,
                unit_price: input.unit_price,
                special_price: input.special_price,
            };
            staged.insert(product.code.clone(), product.clone());
            results.push(product);
        }

        let mut guard = self.products.write().await;
        *guard = staged;
        Ok(results)
    }

    async fn upsert_many(&self, inputs: Vec<UpsertProduct>) -> PricingResult<Vec<Product>> {
        let mut guard = self.products.write().await;

        // Stage the whole batch on a copy so a failing entry leaves the
        // table untouched.
        let mut staged = guard.clone();
        let mut results = Vec::with_capacity(inputs.len());

        for input in inputs {
            let product = match staged.get(&input.code) {
                Some(existing) => Product {
                    code: input.code,
                    unit_price: input.unit_price.unwrap_or(existing.unit_price),
                    special_price: input.special_price.or_else(|| existing.special_price.clone()),
                },
                None => {
                    let Some(unit_price) = input.unit_price else {
                        return Err(PricingError::MissingField(format!(
                            "product '{}' is new and requires unit_price",
                            input.code
                        )));
                    };
                    Product {
                        code: input.code,
                        unit_price,
                        special_price: input.special_price,
                    }
                }
            };
            staged.insert(product.code.clone(), product.clone());
            results.push(product);
        }

        *guard = staged;
        Ok(results)
    }

    async fn update(&self, code: &str, input: UpdateProduct) -> PricingResult<Product> {
        let mut guard = self.products.write().await;
        let product = guard
            .get_mut(code)
            .ok_or_else(|| PricingError::NotFound(code.to_string()))?;

        if let Some(unit_price) = input.unit_price {
            product.unit_price = unit_price;
        }
        if let Some(special_price) = input.special_price {
            product.special_price = Some(special_price);
        }

        Ok(product.clone())
    }

    async fn delete_many(&self, codes: &[String]) -> PricingResult<Vec<String>> {
        let mut guard = self.products.write().await;
        let mut deleted = Vec::new();
        for code in codes {
            if guard.remove(code).is_some() {
                deleted.push(code.clone());
            }
        }
        Ok(deleted)
    }
}
