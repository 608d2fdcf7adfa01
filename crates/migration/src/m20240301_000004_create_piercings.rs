//! Create `piercings` table. The artist link is optional and cleared when the artist is removed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Piercings::Table)
                    .if_not_exists()
                    .col(pk_auto(Piercings::Id))
                    .col(timestamp(Piercings::BookingDate).not_null())
                    .col(timestamp(Piercings::AppointmentDate).not_null())
                    .col(string_len(Piercings::PiercingType, 50).not_null())
                    .col(string_len(Piercings::JewelryType, 50).not_null())
                    .col(string_len(Piercings::Placement, 50).not_null())
                    .col(integer_null(Piercings::ArtistId))
                    .col(string_len(Piercings::StudioLocation, 100).not_null())
                    .col(double(Piercings::Price).not_null())
                    .col(string_len(Piercings::PaymentStatus, 20).default("unpaid").not_null())
                    .col(string_len(Piercings::Status, 20).default("pending").not_null())
                    .col(string_len(Piercings::Name, 100).not_null())
                    .col(string_len(Piercings::PhoneNumber, 20).not_null())
                    .col(string_len(Piercings::CallOrTextPreference, 10).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_piercing_artist")
                            .from(Piercings::Table, Piercings::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Piercings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Piercings {
    Table,
    Id,
    BookingDate,
    AppointmentDate,
    PiercingType,
    JewelryType,
    Placement,
    ArtistId,
    StudioLocation,
    Price,
    PaymentStatus,
    Status,
    Name,
    PhoneNumber,
    CallOrTextPreference,
}

#[derive(DeriveIden)]
enum Artists { Table, Id }
