pub use sea_orm_migration::prelude::*;

mod m20260815_000000_create_products;
mod m20260815_000001_seed_default_products;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260815_000000_create_products::Migration),
            Box::new(m20260815_000001_seed_default_products::Migration),
        ]
    }
}
