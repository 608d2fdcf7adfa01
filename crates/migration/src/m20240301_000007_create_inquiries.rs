//! Contact-form submissions; standalone, no foreign keys.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(pk_auto(Inquiries::Id))
                    .col(string_len(Inquiries::Name, 100).not_null())
                    .col(string_len_null(Inquiries::PhoneNumber, 20))
                    .col(string_len(Inquiries::Email, 255).not_null())
                    .col(text(Inquiries::Inquiry).not_null())
                    .col(timestamp(Inquiries::SubmittedAt).not_null())
                    .col(string_len(Inquiries::Status, 20).default("pending").not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Inquiries::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Inquiries { Table, Id, Name, PhoneNumber, Email, Inquiry, SubmittedAt, Status }
