use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gallery::Table)
                    .if_not_exists()
                    .col(pk_auto(Gallery::Id))
                    .col(integer(Gallery::ArtistId).not_null())
                    .col(string_len(Gallery::ImageUrl, 255).not_null())
                    .col(string_len_null(Gallery::Caption, 255))
                    .col(timestamp(Gallery::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_gallery_artist")
                            .from(Gallery::Table, Gallery::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Gallery::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Gallery { Table, Id, ArtistId, ImageUrl, Caption, CreatedAt }

#[derive(DeriveIden)]
enum Artists { Table, Id }
