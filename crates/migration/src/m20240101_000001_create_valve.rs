//! Create `valve` table.
//!
//! `nome` carries the unique constraint; the store relies on it to reject duplicates.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Valve::Table)
                    .if_not_exists()
                    .col(pk_auto(Valve::Id))
                    .col(string_len(Valve::Nome, 140).unique_key().not_null())
                    .col(string_len(Valve::Descricao, 4000).not_null())
                    .col(string_len(Valve::Tipo, 140).not_null())
                    .col(double(Valve::Vazao).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Valve::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Valve { Table, Id, Nome, Descricao, Tipo, Vazao }
