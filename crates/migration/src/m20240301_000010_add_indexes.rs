use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Artists: lookup by owner for dashboards
        manager
            .create_index(
                Index::create()
                    .name("idx_artists_created_by")
                    .table(Artists::Table)
                    .col(Artists::CreatedBy)
                    .to_owned(),
            )
            .await?;

        // Bookings: per-artist listing and upcoming-appointment scans
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_artist")
                    .table(Bookings::Table)
                    .col(Bookings::ArtistId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_bookings_appointment")
                    .table(Bookings::Table)
                    .col(Bookings::AppointmentDate)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_piercings_artist")
                    .table(Piercings::Table)
                    .col(Piercings::ArtistId)
                    .to_owned(),
            )
            .await?;

        // Reviews: rating aggregate filters on artist_id
        manager
            .create_index(
                Index::create()
                    .name("idx_reviews_artist")
                    .table(Reviews::Table)
                    .col(Reviews::ArtistId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_gallery_artist")
                    .table(Gallery::Table)
                    .col(Gallery::ArtistId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_artists_created_by").table(Artists::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_artist").table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_bookings_appointment").table(Bookings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_piercings_artist").table(Piercings::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_reviews_artist").table(Reviews::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_gallery_artist").table(Gallery::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Artists { Table, CreatedBy }

#[derive(DeriveIden)]
enum Bookings { Table, ArtistId, AppointmentDate }

#[derive(DeriveIden)]
enum Piercings { Table, ArtistId }

#[derive(DeriveIden)]
enum Reviews { Table, ArtistId }

#[derive(DeriveIden)]
enum Gallery { Table, ArtistId }
