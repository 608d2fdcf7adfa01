use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;

use common::types::Message;
use models::{newsletter, subscriber};
use service::newsletters::{self, NewsletterInput, Published, SubscribeInput};
use service::pagination::Page;

use crate::errors::ApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery, PageQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct EmailQuery {
    pub email: Option<String>,
}

pub async fn publish(State(state): State<AppState>, ApiJson(input): ApiJson<NewsletterInput>) -> Result<(StatusCode, Json<Published>), ApiError> {
    let published = newsletters::publish(&state.db, state.mailer.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(published)))
}

pub async fn list(State(state): State<AppState>, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<Page<newsletter::Model>>, ApiError> {
    let page = newsletters::list_newsletters(&state.db, q.search.as_deref(), q.pagination(10)).await?;
    Ok(Json(page))
}

pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<i32>) -> Result<Json<Message>, ApiError> {
    newsletters::delete_newsletter(&state.db, id).await?;
    Ok(Json(Message::new("Newsletter deleted successfully")))
}

pub async fn subscribe(State(state): State<AppState>, ApiJson(input): ApiJson<SubscribeInput>) -> Result<(StatusCode, Json<subscriber::Model>), ApiError> {
    let created = newsletters::subscribe(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn subscribers(State(state): State<AppState>, ApiQuery(q): ApiQuery<PageQuery>) -> Result<Json<Page<subscriber::Model>>, ApiError> {
    let page = newsletters::list_subscribers(&state.db, q.search.as_deref(), q.pagination(10)).await?;
    Ok(Json(page))
}

pub async fn unsubscribe(State(state): State<AppState>, ApiQuery(q): ApiQuery<EmailQuery>) -> Result<Json<Message>, ApiError> {
    newsletters::unsubscribe(&state.db, q.email.as_deref()).await?;
    Ok(Json(Message::new("Unsubscribed successfully")))
}
