//! Create `service_context` table.
//! Holds a single row (id = 1); the primary key is what keeps it single.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ServiceContext::Table)
                    .if_not_exists()
                    .col(integer(ServiceContext::Id).primary_key())
                    .col(boolean(ServiceContext::Maintenance).default(false))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(ServiceContext::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum ServiceContext { Table, Id, Maintenance }
