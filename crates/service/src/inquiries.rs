use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use models::inquiry;

use crate::errors::ServiceError;
use crate::pagination::{fetch_page, Page, Pagination};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryInput {
    pub name: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub inquiry: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InquiryStatusInput {
    pub status: Option<String>,
}

fn not_found() -> ServiceError { ServiceError::NotFound("Inquiry not found.".into()) }

#[instrument(skip(db, input))]
pub async fn create_inquiry(db: &DatabaseConnection, input: InquiryInput) -> Result<inquiry::Model, ServiceError> {
    let blank = |v: &Option<String>| v.as_deref().map(str::trim).unwrap_or_default().is_empty();
    if blank(&input.name) || blank(&input.email) || blank(&input.inquiry) {
        return Err(ServiceError::Validation("Missing required fields: name, email, inquiry".into()));
    }
    let created = inquiry::create(
        db,
        input.name.as_deref().unwrap_or_default(),
        input.phone_number,
        input.email.as_deref().unwrap_or_default(),
        input.inquiry.as_deref().unwrap_or_default(),
    )
    .await?;
    info!(inquiry_id = created.id, "inquiry_received");
    Ok(created)
}

/// Newest first.
pub async fn list_inquiries(db: &DatabaseConnection, p: Pagination) -> Result<Page<inquiry::Model>, ServiceError> {
    let select = inquiry::Entity::find()
        .order_by_desc(inquiry::Column::SubmittedAt)
        .order_by_desc(inquiry::Column::Id);
    fetch_page(db, select, p).await
}

/// Only `status` is writable.
pub async fn update_status(db: &DatabaseConnection, id: i32, input: InquiryStatusInput) -> Result<inquiry::Model, ServiceError> {
    let found = inquiry::Entity::find_by_id(id).one(db).await?.ok_or_else(not_found)?;
    let Some(status) = input.status else {
        return Ok(found);
    };
    let mut am: inquiry::ActiveModel = found.into();
    am.status = Set(status);
    Ok(am.update(db).await?)
}

pub async fn delete_inquiry(db: &DatabaseConnection, id: i32) -> Result<(), ServiceError> {
    let res = inquiry::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(not_found());
    }
    info!(inquiry_id = id, "inquiry_deleted");
    Ok(())
}
