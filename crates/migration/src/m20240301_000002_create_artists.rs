//! Create `artists` table with FK to `users` (profile owner).
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Artists::Table)
                    .if_not_exists()
                    .col(pk_auto(Artists::Id))
                    .col(string_len(Artists::Name, 100).not_null())
                    .col(string_len_null(Artists::Specialties, 255))
                    .col(text_null(Artists::Bio))
                    .col(json_null(Artists::SocialMedia))
                    .col(integer_null(Artists::YearsOfExperience))
                    .col(json_null(Artists::Styles))
                    .col(double(Artists::AverageRating).default(0.0).not_null())
                    .col(string_len_null(Artists::Location, 100))
                    .col(string_len_null(Artists::ProfilePicture, 255))
                    .col(json_null(Artists::AvailabilitySchedule))
                    .col(text_null(Artists::Certifications))
                    .col(text_null(Artists::Awards))
                    .col(boolean(Artists::IsActive).default(true).not_null())
                    .col(timestamp(Artists::CreatedAt).not_null())
                    .col(timestamp(Artists::UpdatedAt).not_null())
                    .col(integer(Artists::CreatedBy).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_artist_user")
                            .from(Artists::Table, Artists::CreatedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Artists::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Artists {
    Table,
    Id,
    Name,
    Specialties,
    Bio,
    SocialMedia,
    YearsOfExperience,
    Styles,
    AverageRating,
    Location,
    ProfilePicture,
    AvailabilitySchedule,
    Certifications,
    Awards,
    IsActive,
    CreatedAt,
    UpdatedAt,
    CreatedBy,
}

#[derive(DeriveIden)]
enum Users { Table, Id }
