//! Artist reviews. Every mutation locks the artist row and recomputes its rating in the same transaction.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, instrument};

use models::review;

use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Page, Pagination};
use crate::ratings;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewInput {
    /// Integer or integer-valued string.
    pub star_rating: Option<Value>,
    pub review_text: Option<String>,
    pub photo_url: Option<String>,
}

fn star_rating(raw: &Value) -> Result<i32, ServiceError> {
    let parsed = match raw {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| ServiceError::Validation("Star rating must be an integer between 1 and 5".into()))?;
    let stars = i32::try_from(parsed).map_err(|_| ServiceError::Validation("Star rating must be between 1 and 5".into()))?;
    review::validate_star_rating(stars)?;
    Ok(stars)
}

#[instrument(skip(db, input))]
pub async fn create_review(db: &DatabaseConnection, artist_id: i32, input: ReviewInput) -> Result<review::Model, ServiceError> {
    let stars = star_rating(input.star_rating.as_ref().unwrap_or(&Value::Null))?;
    let txn = db.begin().await?;
    ratings::lock_artist(&txn, artist_id).await?;
    let created = review::ActiveModel {
        artist_id: Set(artist_id),
        star_rating: Set(stars),
        review_text: Set(input.review_text),
        photo_url: Set(input.photo_url),
        created_at: Set(common::datetime::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;
    ratings::recompute(&txn, artist_id).await?;
    txn.commit().await?;
    info!(review_id = created.id, artist_id, stars, "review_created");
    Ok(created)
}

pub async fn list_reviews(db: &DatabaseConnection, artist_id: i32, p: Pagination) -> Result<Page<review::Model>, ServiceError> {
    let select = review::Entity::find()
        .filter(review::Column::ArtistId.eq(artist_id))
        .order_by_asc(review::Column::Id);
    fetch_page(db, select, p).await
}

#[instrument(skip(db, input))]
pub async fn update_review(db: &DatabaseConnection, id: i32, input: ReviewInput) -> Result<review::Model, ServiceError> {
    let txn = db.begin().await?;
    let found = review::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Review"))?;
    let artist_id = found.artist_id;
    ratings::lock_artist(&txn, artist_id).await?;
    let mut am: review::ActiveModel = found.into();
    if let Some(raw) = input.star_rating.as_ref().filter(|v| !v.is_null()) {
        am.star_rating = Set(star_rating(raw)?);
    }
    if input.review_text.is_some() {
        am.review_text = Set(input.review_text);
    }
    if input.photo_url.is_some() {
        am.photo_url = Set(input.photo_url);
    }
    let updated = am.update(&txn).await?;
    ratings::recompute(&txn, artist_id).await?;
    txn.commit().await?;
    info!(review_id = id, artist_id, "review_updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_review(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let txn = db.begin().await?;
    let found = review::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Review"))?;
    ratings::lock_artist(&txn, found.artist_id).await?;
    review::Entity::delete_by_id(id).exec(&txn).await?;
    ratings::recompute(&txn, found.artist_id).await?;
    txn.commit().await?;
    info!(review_id = id, artist_id = found.artist_id, "review_deleted");
    Ok(())
}
