//! Migration: Create sweets table.
//!
//! Names are unique ignoring case, enforced by an expression index on
//! `lower(name)`.

use sea_orm_migration::prelude::*;

const NAME_LOWER_INDEX: &str = "idx_sweets_name_lower";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Sweets::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Sweets::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Sweets::Name).string_len(100).not_null())
                    .col(ColumnDef::new(Sweets::Category).string().not_null())
                    .col(ColumnDef::new(Sweets::Price).double().not_null())
                    .col(ColumnDef::new(Sweets::Quantity).big_integer().not_null().default(0))
                    .col(
                        ColumnDef::new(Sweets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Sweets::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .check(Expr::col(Sweets::Price).gte(0))
                    .check(Expr::col(Sweets::Quantity).gte(0))
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(&format!(
                "CREATE UNIQUE INDEX IF NOT EXISTS {} ON sweets (LOWER(name))",
                NAME_LOWER_INDEX
            ))
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sweets_category")
                    .table(Sweets::Table)
                    .col(Sweets::Category)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_sweets_price")
                    .table(Sweets::Table)
                    .col(Sweets::Price)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Indexes go with the table
        manager
            .drop_table(Table::drop().table(Sweets::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Sweets {
    Table,
    Id,
    Name,
    Category,
    Price,
    Quantity,
    CreatedAt,
    UpdatedAt,
}
