//! Portfolio photos.

use std::collections::HashMap;

use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::{artist, gallery};

use crate::access::{require_admin_or_owner, Identity};
use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Page, Pagination};

/// Photo with its artist's name, as every gallery endpoint renders it.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GalleryPhoto {
    #[serde(flatten)]
    pub photo: gallery::Model,
    pub artist_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PhotoInput {
    pub image_url: Option<String>,
    pub caption: Option<String>,
}

async fn with_artist_names(db: &DatabaseConnection, page: Page<gallery::Model>) -> Result<Page<GalleryPhoto>, ServiceError> {
    let mut ids: Vec<i32> = page.items.iter().map(|p| p.artist_id).collect();
    ids.sort_unstable();
    ids.dedup();
    let names: HashMap<i32, String> = artist::Entity::find()
        .filter(artist::Column::Id.is_in(ids))
        .all(db)
        .await?
        .into_iter()
        .map(|a| (a.id, a.name))
        .collect();
    Ok(page.map(|photo| GalleryPhoto {
        artist_name: names.get(&photo.artist_id).cloned().unwrap_or_default(),
        photo,
    }))
}

/// Admin or the artist's creator.
#[instrument(skip(db, input), fields(user_id = who.user_id))]
pub async fn upload_photo(db: &DatabaseConnection, who: &Identity, artist_id: i32, input: PhotoInput) -> Result<GalleryPhoto, ServiceError> {
    let owner = artist::Entity::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Artist"))?;
    require_admin_or_owner(who, owner.created_by)?;
    let image_url = input.image_url.unwrap_or_default();
    gallery::validate_image_url(&image_url)?;
    let photo = gallery::ActiveModel {
        artist_id: Set(artist_id),
        image_url: Set(image_url.trim().to_string()),
        caption: Set(input.caption),
        created_at: Set(common::datetime::now()),
        ..Default::default()
    }
    .insert(db)
    .await?;
    info!(photo_id = photo.id, artist_id, "photo_uploaded");
    Ok(GalleryPhoto { photo, artist_name: owner.name })
}

/// One artist's photos, optionally filtered by caption substring.
pub async fn list_for_artist(db: &DatabaseConnection, artist_id: i32, search: Option<&str>, p: Pagination) -> Result<Page<GalleryPhoto>, ServiceError> {
    let owner = artist::Entity::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Artist"))?;
    let mut select = gallery::Entity::find()
        .filter(gallery::Column::ArtistId.eq(artist_id))
        .order_by_asc(gallery::Column::Id);
    if let Some(q) = search.map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(Expr::expr(Func::lower(Expr::col(gallery::Column::Caption))).like(format!("%{}%", q.to_lowercase())));
    }
    let page = fetch_page(db, select, p).await?;
    Ok(page.map(|photo| GalleryPhoto { photo, artist_name: owner.name.clone() }))
}

pub async fn list_all(db: &DatabaseConnection, p: Pagination) -> Result<Page<GalleryPhoto>, ServiceError> {
    let page = fetch_page(db, gallery::Entity::find().order_by_asc(gallery::Column::Id), p).await?;
    with_artist_names(db, page).await
}

/// Admin or the creator of the photo's artist.
#[instrument(skip(db), fields(user_id = who.user_id))]
pub async fn delete_photo(db: &DatabaseConnection, who: &Identity, id: i32) -> Result<(), ServiceError> {
    let photo = gallery::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Photo"))?;
    let owner = artist::Entity::find_by_id(photo.artist_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Associated artist not found".into()))?;
    require_admin_or_owner(who, owner.created_by)?;
    gallery::Entity::delete_by_id(id).exec(db).await?;
    info!(photo_id = id, "photo_deleted");
    Ok(())
}
