
/// CRUD and constraint tests for the studio entities
pub mod crud_tests;


/// Shared row builders for the entity tests
pub mod fixtures {
    use chrono::Duration;
    use sea_orm::{ActiveModelTrait, ConnectionTrait, Set};
    use uuid::Uuid;

    use crate::{artist, booking, user};

    pub async fn user<C: ConnectionTrait>(db: &C, role: user::Role) -> anyhow::Result<user::Model> {
        let tag = Uuid::new_v4().simple().to_string();
        let name = format!("u_{}", &tag[..12]);
        let email = format!("{name}@example.com");
        Ok(user::create(db, &name, &email, "hash".into(), role).await?)
    }

    pub async fn artist<C: ConnectionTrait>(db: &C, owner: i32, name: &str) -> anyhow::Result<artist::Model> {
        let now = common::datetime::now();
        let am = artist::ActiveModel {
            name: Set(name.to_string()),
            styles: Set(Some(serde_json::json!(["blackwork", "Fine Line"]))),
            average_rating: Set(0.0),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            created_by: Set(owner),
            ..Default::default()
        };
        Ok(am.insert(db).await?)
    }

    pub async fn booking<C: ConnectionTrait>(db: &C, artist_id: i32, client: &str, price: f64) -> anyhow::Result<booking::Model> {
        let now = common::datetime::now();
        let am = booking::ActiveModel {
            booking_date: Set(now),
            appointment_date: Set(now + Duration::days(7)),
            tattoo_style: Set("traditional".into()),
            tattoo_size: Set("small".into()),
            placement: Set("forearm".into()),
            artist_id: Set(artist_id),
            studio_location: Set("Main St".into()),
            price: Set(price),
            payment_status: Set(booking::PAYMENT_UNPAID.into()),
            status: Set(booking::STATUS_PENDING.into()),
            name: Set(client.to_string()),
            phone_number: Set("555-0100".into()),
            call_or_text_preference: Set("text".into()),
            ..Default::default()
        };
        Ok(am.insert(db).await?)
    }
}
