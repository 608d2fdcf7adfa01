use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GlobalSettings::Table)
                    .if_not_exists()
                    .col(pk_auto(GlobalSettings::Id))
                    .col(string_len(GlobalSettings::Key, 50).unique_key().not_null())
                    .col(boolean(GlobalSettings::Value).default(false).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(GlobalSettings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum GlobalSettings { Table, Id, Key, Value }
