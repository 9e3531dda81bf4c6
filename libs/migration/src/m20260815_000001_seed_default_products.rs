use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Seed the default pricing table
        manager
            .get_connection()
            .execute_unprepared(
                r#"
            INSERT INTO products (code, unit_price, special_price, created_at, updated_at)
            VALUES
                ('A', 50, '3 for 140', NOW(), NOW()),
                ('B', 35, '2 for 60', NOW(), NOW()),
                ('C', 25, NULL, NOW(), NOW()),
                ('D', 12, NULL, NOW(), NOW())
            ON CONFLICT (code) DO NOTHING
            "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DELETE FROM products WHERE code IN ('A', 'B', 'C', 'D')")
            .await?;

        Ok(())
    }
}
