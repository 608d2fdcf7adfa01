//! Create `newsletters` and `subscribers`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Newsletters::Table)
                    .if_not_exists()
                    .col(pk_auto(Newsletters::Id))
                    .col(string_len(Newsletters::Title, 255).not_null())
                    .col(string_len_null(Newsletters::Image, 255))
                    .col(text(Newsletters::Body).not_null())
                    .col(timestamp(Newsletters::CreatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Subscribers::Table)
                    .if_not_exists()
                    .col(pk_auto(Subscribers::Id))
                    .col(string_len(Subscribers::Email, 255).unique_key().not_null())
                    .col(timestamp(Subscribers::SubscribedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Subscribers::Table).to_owned()).await?;
        manager.drop_table(Table::drop().table(Newsletters::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Newsletters { Table, Id, Title, Image, Body, CreatedAt }

#[derive(DeriveIden)]
enum Subscribers { Table, Id, Email, SubscribedAt }
