//! Create `bookings` table. Rows go away with their artist.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bookings::Table)
                    .if_not_exists()
                    .col(pk_auto(Bookings::Id))
                    .col(timestamp(Bookings::BookingDate).not_null())
                    .col(timestamp(Bookings::AppointmentDate).not_null())
                    .col(string_len(Bookings::TattooStyle, 50).not_null())
                    .col(string_len(Bookings::TattooSize, 50).not_null())
                    .col(string_len(Bookings::Placement, 50).not_null())
                    .col(integer(Bookings::ArtistId).not_null())
                    .col(string_len(Bookings::StudioLocation, 100).not_null())
                    .col(double(Bookings::Price).not_null())
                    .col(string_len(Bookings::PaymentStatus, 20).default("unpaid").not_null())
                    .col(string_len(Bookings::Status, 20).default("pending").not_null())
                    .col(string_len(Bookings::Name, 100).not_null())
                    .col(string_len(Bookings::PhoneNumber, 20).not_null())
                    .col(string_len(Bookings::CallOrTextPreference, 10).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_booking_artist")
                            .from(Bookings::Table, Bookings::ArtistId)
                            .to(Artists::Table, Artists::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Bookings::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Bookings {
    Table,
    Id,
    BookingDate,
    AppointmentDate,
    TattooStyle,
    TattooSize,
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
