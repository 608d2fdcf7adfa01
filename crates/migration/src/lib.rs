//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240301_000001_create_users;
mod m20240301_000002_create_artists;
mod m20240301_000003_create_bookings;
mod m20240301_000004_create_piercings;
mod m20240301_000005_create_reviews;
mod m20240301_000006_create_gallery;
mod m20240301_000007_create_inquiries;
mod m20240301_000008_create_newsletters;
mod m20240301_000009_create_global_settings;
mod m20240301_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240301_000001_create_users::Migration),
            Box::new(m20240301_000002_create_artists::Migration),
            Box::new(m20240301_000003_create_bookings::Migration),
            Box::new(m20240301_000004_create_piercings::Migration),
            Box::new(m20240301_000005_create_reviews::Migration),
            Box::new(m20240301_000006_create_gallery::Migration),
            Box::new(m20240301_000007_create_inquiries::Migration),
            Box::new(m20240301_000008_create_newsletters::Migration),
            Box::new(m20240301_000009_create_global_settings::Migration),
            // Indexes should always be applied last
            Box::new(m20240301_000010_add_indexes::Migration),
        ]
    }
}
