use std::net::SocketAddr;

use axum::http::{HeaderValue, Method};
use axum::Router;
use migration::MigratorTrait;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use configs::{AppConfig, CorsConfig};
use service::auth::token::TokenService;
use service::notify;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

/// Any origin when the list is empty; otherwise only the configured origins.
pub fn build_cors(cfg: &CorsConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any);
    if cfg.allowed_origins.is_empty() {
        return base.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = cfg
        .allowed_origins
        .iter()
        .filter_map(|o| match o.parse::<HeaderValue>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring unparsable CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(origins)
}

/// Connect, migrate, and assemble the router from a validated config.
pub async fn build_app(cfg: &AppConfig) -> Result<Router, StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    migration::Migrator::up(&db, None)
        .await
        .map_err(|e| StartupError::Any(anyhow::anyhow!("migrations failed: {e}")))?;
    info!(event = "migrations_applied", "database schema up to date");

    let tokens = TokenService::from_config(&cfg.auth);
    let mailer = notify::sender_from_config(&cfg.email).map_err(StartupError::Email)?;
    if !cfg.email.smtp_enabled() {
        warn!(event = "smtp_disabled", "no SMTP server configured; outbound mail is logged only");
    }
    let state = AppState::new(db, tokens, mailer, cfg.email.reset_base_url.clone());
    Ok(routes::build_router(state, build_cors(&cfg.cors)))
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", cfg.server.host, cfg.server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad bind address: {e}")))
}

/// Serve until `shutdown` resolves, then drain in-flight requests.
pub async fn run(cfg: AppConfig, shutdown: impl std::future::Future<Output = ()> + Send + 'static) -> Result<(), StartupError> {
    let app = build_app(&cfg).await?;
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(anyhow::Error::from)?;
    info!(%addr, event = "listening", "server listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(anyhow::Error::from)?;
    Ok(())
}
