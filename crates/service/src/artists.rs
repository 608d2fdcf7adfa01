//! Artist profiles: CRUD, search, activation.

use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{info, instrument};

use models::artist;

use crate::access::{require_admin_or_owner, Identity};
use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Page, Pagination};

/// Create and update body. `average_rating` is derived and never accepted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArtistInput {
    pub name: Option<String>,
    pub specialties: Option<String>,
    pub bio: Option<String>,
    /// Object, or a `"Twitter: @h, Instagram: @i"` string.
    pub social_media: Option<Value>,
    pub years_of_experience: Option<i32>,
    pub styles: Option<Vec<String>>,
    pub location: Option<String>,
    pub profile_picture: Option<String>,
    pub availability_schedule: Option<Value>,
    pub certifications: Option<String>,
    pub awards: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtistSearch {
    pub style: Option<String>,
    pub name: Option<String>,
    pub min_experience: Option<i32>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivationInput {
    pub is_active: Option<Value>,
}

fn social_media(raw: Value) -> Result<Value, ServiceError> {
    match raw {
        Value::Object(_) => Ok(raw),
        Value::String(s) => {
            let parsed: Map<String, Value> = s
                .split(',')
                .filter_map(|item| item.trim().split_once(": "))
                .map(|(k, v)| (k.trim().to_string(), Value::String(v.trim().to_string())))
                .collect();
            Ok(Value::Object(parsed))
        }
        _ => Err(ServiceError::Validation("Invalid social_media format. Must be a dictionary or string.".into())),
    }
}

fn schedule(raw: Value) -> Result<Value, ServiceError> {
    match raw {
        Value::Object(_) => Ok(raw),
        _ => Err(ServiceError::Validation("Invalid availability_schedule format. Must be a dictionary.".into())),
    }
}

/// Copy the present fields of `input` onto `am`.
pub(crate) fn apply(am: &mut artist::ActiveModel, input: ArtistInput) -> Result<(), ServiceError> {
    if let Some(name) = input.name {
        artist::validate_name(&name)?;
        am.name = Set(name.trim().to_string());
    }
    if input.specialties.is_some() {
        am.specialties = Set(input.specialties);
    }
    if input.bio.is_some() {
        am.bio = Set(input.bio);
    }
    if let Some(raw) = input.social_media {
        am.social_media = Set(Some(social_media(raw)?));
    }
    if let Some(years) = input.years_of_experience {
        artist::validate_years_of_experience(years)?;
        am.years_of_experience = Set(Some(years));
    }
    if let Some(styles) = input.styles {
        am.styles = Set(Some(Value::from(styles)));
    }
    if input.location.is_some() {
        am.location = Set(input.location);
    }
    if input.profile_picture.is_some() {
        am.profile_picture = Set(input.profile_picture);
    }
    if let Some(raw) = input.availability_schedule {
        am.availability_schedule = Set(Some(schedule(raw)?));
    }
    if input.certifications.is_some() {
        am.certifications = Set(input.certifications);
    }
    if input.awards.is_some() {
        am.awards = Set(input.awards);
    }
    if let Some(active) = input.is_active {
        am.is_active = Set(active);
    }
    Ok(())
}

#[instrument(skip(db, input), fields(user_id = who.user_id))]
pub async fn create_artist(db: &DatabaseConnection, who: &Identity, input: ArtistInput) -> Result<artist::Model, ServiceError> {
    if input.name.as_deref().map(str::trim).unwrap_or_default().is_empty() {
        return Err(ServiceError::Validation("Missing required fields: name".into()));
    }
    let now = common::datetime::now();
    let mut am = artist::ActiveModel {
        social_media: Set(Some(Value::Object(Map::new()))),
        styles: Set(Some(Value::Array(Vec::new()))),
        availability_schedule: Set(Some(Value::Object(Map::new()))),
        average_rating: Set(0.0),
        is_active: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        created_by: Set(who.user_id),
        ..Default::default()
    };
    apply(&mut am, input)?;
    let created = am.insert(db).await?;
    info!(artist_id = created.id, "artist_created");
    Ok(created)
}

pub async fn get_artist(db: &DatabaseConnection, id: i32) -> Result<artist::Model, ServiceError> {
    artist::Entity::find_by_id(id).one(db).await?.ok_or_else(|| ServiceError::not_found("Artist"))
}

pub async fn list_artists(db: &DatabaseConnection, p: Pagination) -> Result<Page<artist::Model>, ServiceError> {
    fetch_page(db, artist::Entity::find().order_by_asc(artist::Column::Id), p).await
}

/// Admin or the profile's creator.
#[instrument(skip(db, input), fields(user_id = who.user_id))]
pub async fn update_artist(db: &DatabaseConnection, who: &Identity, id: i32, input: ArtistInput) -> Result<artist::Model, ServiceError> {
    let txn = db.begin().await?;
    let found = artist::Entity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or_else(|| ServiceError::not_found("Artist"))?;
    require_admin_or_owner(who, found.created_by)?;
    let mut am: artist::ActiveModel = found.into();
    apply(&mut am, input)?;
    am.updated_at = Set(common::datetime::now());
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    info!(artist_id = id, "artist_updated");
    Ok(updated)
}

/// Admin or the creator. Bookings, reviews and photos go with it; piercings are unassigned.
#[instrument(skip(db), fields(user_id = who.user_id))]
pub async fn delete_artist(db: &DatabaseConnection, who: &Identity, id: i32) -> Result<(), ServiceError> {
    let found = get_artist(db, id).await?;
    require_admin_or_owner(who, found.created_by)?;
    artist::Entity::delete_by_id(id).exec(db).await?;
    info!(artist_id = id, "artist_deleted");
    Ok(())
}

/// Set `is_active`. Role checks are the caller's job.
#[instrument(skip(db, input))]
pub async fn set_active(db: &DatabaseConnection, id: i32, input: ActivationInput) -> Result<artist::Model, ServiceError> {
    let found = get_artist(db, id).await?;
    let Some(Value::Bool(active)) = input.is_active else {
        return Err(ServiceError::Validation("Invalid value for is_active. Must be a boolean.".into()));
    };
    let mut am: artist::ActiveModel = found.into();
    am.is_active = Set(active);
    am.updated_at = Set(common::datetime::now());
    let updated = am.update(db).await?;
    info!(artist_id = id, active, "artist_activation_changed");
    Ok(updated)
}

/// Filters combine with AND. Style matches any entry of `styles`, ignoring case.
pub async fn search_artists(db: &DatabaseConnection, q: ArtistSearch) -> Result<Vec<artist::Model>, ServiceError> {
    let mut select = artist::Entity::find().order_by_asc(artist::Column::Id);
    if let Some(name) = q.name.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(Expr::expr(Func::lower(Expr::col(artist::Column::Name))).like(format!("%{}%", name.to_lowercase())));
    }
    if let Some(min) = q.min_experience {
        select = select.filter(artist::Column::YearsOfExperience.gte(min));
    }
    let mut found = select.all(db).await?;
    if let Some(style) = q.style.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        found.retain(|a| a.style_names().iter().any(|s| s.eq_ignore_ascii_case(style)));
    }
    if found.is_empty() {
        return Err(ServiceError::NotFound("No artists found.".into()));
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{self as fx, get_db};
    use models::user::Role;
    use serde_json::json;

    fn identity(user: &models::user::Model) -> Identity {
        Identity { user_id: user.id, username: user.username.clone(), role: user.role }
    }

    #[tokio::test]
    async fn create_fills_defaults_and_parses_social_string() -> anyhow::Result<()> {
        let db = get_db().await?;
        let owner = fx::user(&db, "ana", Role::Artist).await?;
        let input = ArtistInput {
            name: Some("Ana Ink".into()),
            social_media: Some(json!("Twitter: @ana, Instagram: @ana.ink")),
            styles: Some(vec!["Realism".into()]),
            ..Default::default()
        };
        let a = create_artist(&db, &identity(&owner), input).await?;
        assert_eq!(a.created_by, owner.id);
        assert_eq!(a.average_rating, 0.0);
        assert!(a.is_active);
        assert_eq!(a.social_media, Some(json!({"Twitter": "@ana", "Instagram": "@ana.ink"})));
        assert_eq!(a.availability_schedule, Some(json!({})));

        let nameless = create_artist(&db, &identity(&owner), ArtistInput::default()).await;
        assert!(matches!(nameless, Err(ServiceError::Validation(_))));
        Ok(())
    }

    #[tokio::test]
    async fn only_admin_or_creator_may_modify() -> anyhow::Result<()> {
        let db = get_db().await?;
        let owner = fx::user(&db, "ana", Role::Artist).await?;
        let stranger = fx::user(&db, "bob", Role::Artist).await?;
        let admin = fx::user(&db, "root", Role::Admin).await?;
        let a = fx::artist(&db, owner.id, "Ana").await?;

        let rename = || ArtistInput { name: Some("Ana B".into()), ..Default::default() };
        assert!(matches!(update_artist(&db, &identity(&stranger), a.id, rename()).await, Err(ServiceError::Forbidden(_))));
        assert!(matches!(delete_artist(&db, &identity(&stranger), a.id).await, Err(ServiceError::Forbidden(_))));

        let renamed = update_artist(&db, &identity(&owner), a.id, rename()).await?;
        assert_eq!(renamed.name, "Ana B");
        let bad = ArtistInput { availability_schedule: Some(json!(["mon"])), ..Default::default() };
        assert!(matches!(update_artist(&db, &identity(&admin), a.id, bad).await, Err(ServiceError::Validation(_))));

        delete_artist(&db, &identity(&admin), a.id).await?;
        assert!(matches!(get_artist(&db, a.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_to_owned_rows() -> anyhow::Result<()> {
        let db = get_db().await?;
        let owner = fx::user(&db, "ana", Role::Artist).await?;
        let a = fx::artist(&db, owner.id, "Ana").await?;
        fx::booking(&db, a.id, "Client", 90.0).await?;
        fx::raw_review(&db, a.id, 4).await?;
        let photo = crate::gallery::PhotoInput { image_url: Some("https://cdn.example.com/rose.jpg".into()), caption: Some("Rose".into()) };
        crate::gallery::upload_photo(&db, &identity(&owner), a.id, photo).await?;
        let walk_in = fx::piercing(&db, Some(a.id), "Walk-in", 40.0).await?;
        delete_artist(&db, &identity(&owner), a.id).await?;
        use sea_orm::PaginatorTrait;
        assert_eq!(models::booking::Entity::find().count(&db).await?, 0);
        assert_eq!(models::review::Entity::find().count(&db).await?, 0);
        assert_eq!(models::gallery::Entity::find().count(&db).await?, 0);
        let kept = models::piercing::Entity::find_by_id(walk_in.id).one(&db).await?.map(|p| p.artist_id);
        assert_eq!(kept, Some(None));
        Ok(())
    }

    #[tokio::test]
    async fn search_filters_combine() -> anyhow::Result<()> {
        let db = get_db().await?;
        let owner = fx::user(&db, "ana", Role::Artist).await?;
        let a = fx::artist(&db, owner.id, "Ana Ink").await?;
        fx::artist(&db, owner.id, "Bo Lines").await?;

        let by_style = search_artists(&db, ArtistSearch { style: Some("blackwork".into()), ..Default::default() }).await?;
        assert_eq!(by_style.len(), 2);
        let by_name = search_artists(&db, ArtistSearch { name: Some("ink".into()), ..Default::default() }).await?;
        assert_eq!(by_name.iter().map(|x| x.id).collect::<Vec<_>>(), vec![a.id]);
        let none = search_artists(&db, ArtistSearch { min_experience: Some(30), ..Default::default() }).await;
        assert!(matches!(none, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn activation_requires_boolean() -> anyhow::Result<()> {
        let db = get_db().await?;
        let owner = fx::user(&db, "ana", Role::Artist).await?;
        let a = fx::artist(&db, owner.id, "Ana").await?;
        let off = set_active(&db, a.id, ActivationInput { is_active: Some(json!(false)) }).await?;
        assert!(!off.is_active);
        let bad = set_active(&db, a.id, ActivationInput { is_active: Some(json!("no")) }).await;
        assert!(matches!(bad, Err(ServiceError::Validation(_))));
        Ok(())
    }
}
