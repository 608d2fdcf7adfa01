use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::observability;
use crate::openapi::ApiDoc;
use crate::state::AppState;

pub mod artists;
pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod gallery;
pub mod inquiries;
pub mod newsletters;
pub mod piercings;
pub mod reviews;
pub mod settings;
pub mod users;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn metrics() -> (axum::http::StatusCode, String) {
    observability::encode_metrics()
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signin", post(auth::signin))
        .route("/request-password-reset", post(auth::request_password_reset))
        .route("/reset-password", post(auth::reset_password))
        .route("/artists", get(artists::list).post(artists::create))
        .route("/artists/search", get(artists::search))
        .route("/artists/:id", get(artists::get).patch(artists::update).delete(artists::delete))
        .route("/artists/:id/deactivate", patch(artists::deactivate))
        .route("/artists/:id/bookings", get(artists::bookings))
        .route("/artists/:id/reviews", get(reviews::list).post(reviews::create))
        .route("/artists/:id/gallery", get(gallery::list_for_artist).post(gallery::upload))
        .route("/bookings", get(bookings::list).post(bookings::create))
        .route("/bookings/search", get(bookings::search))
        .route("/bookings/:id", get(bookings::get).patch(bookings::update).delete(bookings::delete))
        .route("/bookings/:id/payment_status", patch(bookings::payment_status))
        .route("/piercings", get(piercings::list).post(piercings::create))
        .route("/piercings/search", get(piercings::search))
        .route("/piercings/:id", get(piercings::get).patch(piercings::update).delete(piercings::delete))
        .route("/piercings/:id/payment_status", patch(piercings::payment_status))
        .route("/reviews/:id", patch(reviews::update).delete(reviews::delete))
        .route("/galleries", get(gallery::list_all))
        .route("/gallery/:id", axum::routing::delete(gallery::delete))
        .route("/inquiries", get(inquiries::list).post(inquiries::create))
        .route("/inquiries/:id", patch(inquiries::update).delete(inquiries::delete))
        .route("/newsletters", get(newsletters::list).post(newsletters::publish))
        .route("/newsletters/:id", axum::routing::delete(newsletters::delete))
        .route("/subscribe", post(newsletters::subscribe))
        .route("/subscribers", get(newsletters::subscribers))
        .route("/unsubscribe", axum::routing::delete(newsletters::unsubscribe))
        .route("/users/:id", patch(users::update).delete(users::delete))
        .route("/artist-dashboard", get(dashboard::artist_view).patch(dashboard::artist_update))
        .route("/admin-dashboard", get(dashboard::admin_view))
        .route("/admin-dashboard/activity", get(dashboard::activity))
        .route("/admin-dashboard/bookings-trends", get(dashboard::trends))
        .route("/global-settings/:key", get(settings::get).patch(settings::update))
}

/// Build the full application router: `/api` behind the bearer gate, plus health,
/// metrics and the OpenAPI document.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .route("/api-docs/openapi.json", get(openapi_json))
        .nest("/api", api_routes())
        .layer(middleware::from_fn_with_state(state.clone(), auth::require_bearer_token))
        .layer(middleware::from_fn(observability::track_metrics))
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
