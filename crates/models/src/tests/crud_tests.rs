use crate::db::connect_memory;
use crate::tests::fixtures;
use crate::{artist, booking, gallery, global_setting, piercing, review, subscriber, user};
use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set};

/// Test user create/read and unique constraints
#[tokio::test]
async fn test_user_crud_and_uniqueness() -> Result<()> {
    let db = connect_memory().await?;

    let amy = user::create(&db, "amy", "amy@x.com", "hash".into(), user::Role::Artist).await?;
    assert_eq!(amy.role, user::Role::Artist);
    assert!(amy.last_login.is_none());

    let found = user::find_by_username(&db, "amy").await?.expect("amy exists");
    assert_eq!(found.email, "amy@x.com");
    assert!(user::find_by_email(&db, "nobody@x.com").await?.is_none());

    // Same username, different email
    let dup = user::create(&db, "amy", "other@x.com", "hash".into(), user::Role::Admin).await;
    assert!(matches!(dup, Err(crate::errors::ModelError::Db(_))));

    let bad = user::create(&db, "bob", "not-an-email", "hash".into(), user::Role::Admin).await;
    assert!(matches!(bad, Err(crate::errors::ModelError::Validation(_))));
    Ok(())
}

/// Serialized users never expose the password hash
#[tokio::test]
async fn test_user_serialization_hides_hash() -> Result<()> {
    let db = connect_memory().await?;
    let u = user::create(&db, "carol", "carol@x.com", "secret-hash".into(), user::Role::Admin).await?;
    let json = serde_json::to_value(&u)?;
    assert!(json.get("password_hash").is_none());
    assert_eq!(json["role"], "admin");
    assert!(json["created_at"].as_str().is_some());
    Ok(())
}

/// Deleting an artist removes bookings, reviews and photos, and detaches piercings
#[tokio::test]
async fn test_artist_delete_cascades() -> Result<()> {
    let db = connect_memory().await?;
    let owner = fixtures::user(&db, user::Role::Artist).await?;
    let a = fixtures::artist(&db, owner.id, "Rita").await?;
    let keep = fixtures::artist(&db, owner.id, "Sam").await?;

    fixtures::booking(&db, a.id, "Client A", 100.0).await?;
    fixtures::booking(&db, keep.id, "Client B", 80.0).await?;

    let now = common::datetime::now();
    review::ActiveModel { artist_id: Set(a.id), star_rating: Set(5), created_at: Set(now), ..Default::default() }.insert(&db).await?;
    gallery::ActiveModel { artist_id: Set(a.id), image_url: Set("https://cdn.example.com/1.png".into()), created_at: Set(now), ..Default::default() }.insert(&db).await?;
    let p = piercing::ActiveModel {
        booking_date: Set(now),
        appointment_date: Set(now),
        piercing_type: Set("helix".into()),
        jewelry_type: Set("hoop".into()),
        placement: Set("ear".into()),
        artist_id: Set(Some(a.id)),
        studio_location: Set("Main St".into()),
        price: Set(40.0),
        payment_status: Set("unpaid".into()),
        status: Set("pending".into()),
        name: Set("Client C".into()),
        phone_number: Set("555".into()),
        call_or_text_preference: Set("call".into()),
        ..Default::default()
    }
    .insert(&db)
    .await?;

    artist::Entity::delete_by_id(a.id).exec(&db).await?;

    assert_eq!(booking::Entity::find().filter(booking::Column::ArtistId.eq(a.id)).count(&db).await?, 0);
    assert_eq!(review::Entity::find().filter(review::Column::ArtistId.eq(a.id)).count(&db).await?, 0);
    assert_eq!(gallery::Entity::find().filter(gallery::Column::ArtistId.eq(a.id)).count(&db).await?, 0);
    assert_eq!(booking::Entity::find().count(&db).await?, 1);

    let p = piercing::Entity::find_by_id(p.id).one(&db).await?.expect("piercing kept");
    assert_eq!(p.artist_id, None);
    Ok(())
}

/// Deleting a user removes the artist profile they own
#[tokio::test]
async fn test_user_delete_cascades_to_artist() -> Result<()> {
    let db = connect_memory().await?;
    let owner = fixtures::user(&db, user::Role::Artist).await?;
    let a = fixtures::artist(&db, owner.id, "Rita").await?;
    fixtures::booking(&db, a.id, "Client", 90.0).await?;

    user::Entity::delete_by_id(owner.id).exec(&db).await?;
    assert!(artist::Entity::find_by_id(a.id).one(&db).await?.is_none());
    assert_eq!(booking::Entity::find().count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_artist_style_names_and_owner_lookup() -> Result<()> {
    let db = connect_memory().await?;
    let owner = fixtures::user(&db, user::Role::Artist).await?;
    let a = fixtures::artist(&db, owner.id, "Rita").await?;
    assert_eq!(a.style_names(), vec!["blackwork".to_string(), "Fine Line".to_string()]);

    let found = artist::find_by_owner(&db, owner.id).await?.expect("owned profile");
    assert_eq!(found.id, a.id);
    assert!(artist::find_by_owner(&db, owner.id + 1000).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_subscriber_and_setting_unique_keys() -> Result<()> {
    let db = connect_memory().await?;
    subscriber::create(&db, "fan@x.com").await?;
    assert!(subscriber::create(&db, "fan@x.com").await.is_err());
    assert!(subscriber::create(&db, "nope").await.is_err());
    assert!(subscriber::find_by_email(&db, "fan@x.com").await?.is_some());

    let s = global_setting::create(&db, "maintenance_mode", false).await?;
    assert!(!s.value);
    assert!(global_setting::create(&db, "maintenance_mode", true).await.is_err());
    assert!(global_setting::create(&db, "", true).await.is_err());
    Ok(())
}
