use std::sync::Arc;

use sea_orm::DatabaseConnection;

use service::auth::repo::seaorm::SeaOrmAuthRepository;
use service::auth::token::TokenService;
use service::auth::AuthService;
use service::notify::EmailSender;

/// Shared handler state, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub auth: Arc<AuthService<SeaOrmAuthRepository>>,
    pub tokens: TokenService,
    pub mailer: Arc<dyn EmailSender>,
}

impl AppState {
    pub fn new(db: DatabaseConnection, tokens: TokenService, mailer: Arc<dyn EmailSender>, reset_base_url: impl Into<String>) -> Self {
        let repo = Arc::new(SeaOrmAuthRepository { db: db.clone() });
        let auth = Arc::new(AuthService::new(repo, tokens.clone(), Arc::clone(&mailer), reset_base_url));
        Self { db, auth, tokens, mailer }
    }
}
