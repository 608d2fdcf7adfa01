#![cfg(test)]
use chrono::Duration;
use sea_orm::{ActiveModelTrait, DatabaseConnection, Set};

use models::{artist, booking, piercing, review, user};

/// Fresh migrated in-memory database for the current test.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_memory().await
}

pub async fn user(db: &DatabaseConnection, username: &str, role: user::Role) -> anyhow::Result<user::Model> {
    Ok(user::create(db, username, &format!("{username}@example.com"), "hash".into(), role).await?)
}

pub async fn artist(db: &DatabaseConnection, owner: i32, name: &str) -> anyhow::Result<artist::Model> {
    let now = common::datetime::now();
    let am = artist::ActiveModel {
        name: Set(name.to_string()),
        styles: Set(Some(serde_json::json!(["Blackwork", "fine line"]))),
        years_of_experience: Set(Some(5)),
        average_rating: Set(0.0),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        created_by: Set(owner),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Booking row written directly, so the appointment may lie in the past.
pub async fn booking_at(db: &DatabaseConnection, artist_id: i32, client: &str, price: f64, appointment: chrono::NaiveDateTime) -> anyhow::Result<booking::Model> {
    let am = booking::ActiveModel {
        booking_date: Set(common::datetime::now()),
        appointment_date: Set(appointment),
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

pub async fn booking(db: &DatabaseConnection, artist_id: i32, client: &str, price: f64) -> anyhow::Result<booking::Model> {
    booking_at(db, artist_id, client, price, common::datetime::now() + Duration::days(7)).await
}

pub async fn piercing(db: &DatabaseConnection, artist_id: Option<i32>, client: &str, price: f64) -> anyhow::Result<piercing::Model> {
    let now = common::datetime::now();
    let am = piercing::ActiveModel {
        booking_date: Set(now),
        appointment_date: Set(now + Duration::days(3)),
        piercing_type: Set("ear".into()),
        jewelry_type: Set("hoop".into()),
        placement: Set("left lobe".into()),
        artist_id: Set(artist_id),
        studio_location: Set("Main St".into()),
        price: Set(price),
        payment_status: Set(booking::PAYMENT_UNPAID.into()),
        status: Set(booking::STATUS_PENDING.into()),
        name: Set(client.to_string()),
        phone_number: Set("555-0101".into()),
        call_or_text_preference: Set("call".into()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}

/// Review row without the rating recompute.
pub async fn raw_review(db: &DatabaseConnection, artist_id: i32, stars: i32) -> anyhow::Result<review::Model> {
    let am = review::ActiveModel {
        artist_id: Set(artist_id),
        star_rating: Set(stars),
        created_at: Set(common::datetime::now()),
        ..Default::default()
    };
    Ok(am.insert(db).await?)
}
