use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DatabaseTransaction, EntityTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};

use crate::entity::{ActiveModel, Column, Entity};
use crate::error::{PricingError, PricingResult};
use crate::models::{CreateProduct, Product, UpdateProduct, UpsertProduct};
use crate::repository::PricingRepository;

/// PostgreSQL implementation of PricingRepository
#[derive(Clone)]
pub struct PgPricingRepository {
    db: DatabaseConnection,
}

impl PgPricingRepository {
    /// Create a new PostgreSQL pricing repository
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Apply one upsert entry inside an open transaction.
    async fn apply_upsert(
        txn: &DatabaseTransaction,
        input: UpsertProduct,
    ) -> PricingResult<Product> {
        let existing = Entity::find_by_id(input.code.clone()).one(txn).await?;

        match existing {
            Some(found) => {
                let mut model: ActiveModel = found.into();
                if let Some(unit_price) = input.unit_price {
                    model.unit_price = Set(unit_price);
                }
                if let Some(special_price) = input.special_price {
                    model.special_price = Set(Some(special_price));
                }
                model.updated_at = Set(chrono::Utc::now().into());
                Ok(model.update(txn).await?.into())
            }
            None => {
                let Some(unit_price) = input.unit_price else {
                    return Err(PricingError::MissingField(format!(
                        "product '{}' is new and requires unit_price",
                        input.code
                    )));
                };
                let model: ActiveModel = CreateProduct {
                    code: input.code,
                    unit_price,
                    special_price: input.special_price,
                }
                .into();
                Ok(model.insert(txn).await?.into())
            }
        }
    }
}

#[async_trait]
impl PricingRepository for PgPricingRepository {
    async fn get(&self, code: &str) -> PricingResult<Option<Product>> {
        let result = Entity::find_by_id(code.to_owned())
            .one(&self.db)
            .await?
            .map(Into::into);
        Ok(result)
    }

    async fn list(&self) -> PricingResult<Vec<Product>> {
        let results = Entity::find()
            .order_by_asc(Column::Code)
            .all(&self.db)
            .await?
            .into_iter()
            .map(Into::into)
            .collect();
        Ok(results)
    }

    async fn put(&self, input: CreateProduct) -> PricingResult<Product> {
        // Find-then-write must not race a concurrent delete or insert
        let txn = self.db.begin().await?;

        let existing = Entity::find_by_id(input.code.clone()).one(&txn).await?;
        let stored: Product = match existing {
            Some(found) => {
                let mut model: ActiveModel = found.into();
                model.unit_price = Set(input.unit_price);
                model.special_price = Set(input.special_price);
                model.updated_at = Set(chrono::Utc::now().into());
                model.update(&txn).await?.into()
            }
            None => {
                let model: ActiveModel = input.into();
                model.insert(&txn).await?.into()
            }
        };

        txn.commit().await?;
        Ok(stored)
    }

    async fn replace_all(&self, inputs: Vec<CreateProduct>) -> PricingResult<Vec<Product>> {
        let txn = self.db.begin().await?;

        Entity::delete_many().exec(&txn).await?;

        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            let model: ActiveModel = input.into();
            results.push(model.insert(&txn).await?.into());
        }

        txn.commit().await?;
        Ok(results)
    }

    async fn upsert_many(&self, inputs: Vec<UpsertProduct>) -> PricingResult<Vec<Product>> {
        let txn = self.db.begin().await?;

        let mut results = Vec::with_capacity(inputs.len());
        for input in inputs {
            // An error here drops the transaction, rolling the batch back
            results.push(Self::apply_upsert(&txn, input).await?);
        }

        txn.commit().await?;
        Ok(results)
    }

    async fn update(&self, code: &str, input: UpdateProduct) -> PricingResult<Product> {
        let txn = self.db.begin().await?;

        let existing = Entity::find_by_id(code.to_owned())
            .one(&txn)
            .await?
            .ok_or_else(|| PricingError::NotFound(code.to_string()))?;

        let mut model: ActiveModel = existing.into();

        if let Some(unit_price) = input.unit_price {
            model.unit_price = Set(unit_price);
        }

        if let Some(special_price) = input.special_price {
            model.special_price = Set(Some(special_price));
        }

        model.updated_at = Set(chrono::Utc::now().into());

        let result = model.update(&txn).await?.into();
        txn.commit().await?;
        Ok(result)
    }

    async fn delete_many(&self, codes: &[String]) -> PricingResult<Vec<String>> {
        let txn = self.db.begin().await?;

        let existing: Vec<String> = Entity::find()
            .filter(Column::Code.is_in(codes.to_vec()))
            .order_by_asc(Column::Code)
            .all(&txn)
            .await?
            .into_iter()
            .map(|model| model.code)
            .collect();

        if !existing.is_empty() {
            Entity::delete_many()
                .filter(Column::Code.is_in(existing.clone()))
                .exec(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(existing)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Model;
    use sea_orm::prelude::DateTimeWithTimeZone;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn row(code: &str, unit_price: i64, special_price: Option<&str>) -> Model {
        let now: DateTimeWithTimeZone = chrono::Utc::now().into();
        Model {
            code: code.to_string(),
            unit_price,
            special_price: special_price.map(str::to_string),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_put_inserts_inside_a_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<Model>::new(), vec![row("E", 5, None)]])
            .into_connection();

        let repo = PgPricingRepository::new(db.clone());
        let stored = repo
            .put(CreateProduct {
                code: "E".to_string(),
                unit_price: 5,
                special_price: None,
            })
            .await
            .unwrap();
        assert_eq!(stored.code, "E");

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("COMMIT"));
    }

    #[tokio::test]
    async fn test_update_runs_inside_a_transaction() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![row("A", 50, Some("3 for 140"))],
                vec![row("A", 60, Some("3 for 140"))],
            ])
            .into_connection();

        let repo = PgPricingRepository::new(db.clone());
        let updated = repo
            .update(
                "A",
                UpdateProduct {
                    unit_price: Some(60),
                    special_price: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.unit_price, 60);

        let log = format!("{:?}", db.into_transaction_log());
        assert!(log.contains("BEGIN"));
        assert!(log.contains("COMMIT"));
    }
}
