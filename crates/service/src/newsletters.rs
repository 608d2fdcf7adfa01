//! Newsletters and their subscribers.
//!
//! Publishing commits the newsletter first and then mails each subscriber. A failed
//! delivery is logged and counted but never undoes the publish.

use sea_orm::{
    sea_query::{Expr, Func},
    DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use models::{newsletter, subscriber};

use crate::errors::ServiceError;
use crate::notify::{newsletter_email, EmailSender};
use crate::pagination::{fetch_page, Page, Pagination};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewsletterInput {
    pub title: Option<String>,
    pub image: Option<String>,
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubscribeInput {
    pub email: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Published {
    pub newsletter: newsletter::Model,
    pub emails_sent: usize,
    pub emails_failed: usize,
}

fn ilike(col: impl sea_orm::sea_query::IntoColumnRef, q: &str) -> sea_orm::sea_query::SimpleExpr {
    Expr::expr(Func::lower(Expr::col(col))).like(format!("%{}%", q.to_lowercase()))
}

#[instrument(skip(db, mailer, input))]
pub async fn publish(db: &DatabaseConnection, mailer: &dyn EmailSender, input: NewsletterInput) -> Result<Published, ServiceError> {
    let created = newsletter::create(
        db,
        input.title.as_deref().unwrap_or_default(),
        input.image,
        input.body.as_deref().unwrap_or_default(),
    )
    .await?;

    let recipients = subscriber::Entity::find().order_by_asc(subscriber::Column::Id).all(db).await?;
    let (mut sent, mut failed) = (0, 0);
    for sub in &recipients {
        let message = newsletter_email(&sub.email, &created.title, &created.body, created.image.as_deref());
        match mailer.send(message).await {
            Ok(()) => sent += 1,
            Err(e) => {
                failed += 1;
                warn!(newsletter_id = created.id, subscriber_id = sub.id, error = %e, "newsletter_delivery_failed");
            }
        }
    }
    info!(newsletter_id = created.id, sent, failed, "newsletter_published");
    Ok(Published { newsletter: created, emails_sent: sent, emails_failed: failed })
}

/// Newest first, optional title filter.
pub async fn list_newsletters(db: &DatabaseConnection, search: Option<&str>, p: Pagination) -> Result<Page<newsletter::Model>, ServiceError> {
    let mut select = newsletter::Entity::find()
        .order_by_desc(newsletter::Column::CreatedAt)
        .order_by_desc(newsletter::Column::Id);
    if let Some(q) = search.map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(ilike(newsletter::Column::Title, q));
    }
    fetch_page(db, select, p).await
}

pub async fn delete_newsletter(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = newsletter::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("Newsletter"));
    }
    info!(newsletter_id = id, "newsletter_deleted");
    Ok(())
}

#[instrument(skip(db, input))]
pub async fn subscribe(db: &DatabaseConnection, input: SubscribeInput) -> Result<subscriber::Model, ServiceError> {
    let email = input.email.unwrap_or_default();
    if !common::validate::is_valid_email(&email) {
        return Err(ServiceError::Validation("Invalid email format".into()));
    }
    if subscriber::find_by_email(db, &email).await?.is_some() {
        return Err(ServiceError::Conflict("This email is already subscribed".into()));
    }
    let created = subscriber::create(db, &email).await?;
    info!(subscriber_id = created.id, "subscribed");
    Ok(created)
}

pub async fn list_subscribers(db: &DatabaseConnection, search: Option<&str>, p: Pagination) -> Result<Page<subscriber::Model>, ServiceError> {
    let mut select = subscriber::Entity::find().order_by_asc(subscriber::Column::Id);
    if let Some(q) = search.map(str::trim).filter(|s| !s.is_empty()) {
        select = select.filter(ilike(subscriber::Column::Email, q));
    }
    fetch_page(db, select, p).await
}

#[instrument(skip(db, email))]
pub async fn unsubscribe(db: &DatabaseConnection, email: Option<&str>) -> Result<(), ServiceError> {
    let email = email
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .ok_or_else(|| ServiceError::Validation("Email is required".into()))?;
    let found = subscriber::find_by_email(db, email)
        .await?
        .ok_or_else(|| ServiceError::NotFound("Subscriber not found".into()))?;
    subscriber::Entity::delete_by_id(found.id).exec(db).await?;
    info!(subscriber_id = found.id, "unsubscribed");
    Ok(())
}
