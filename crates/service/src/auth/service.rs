use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use models::user::Role;

use super::domain::{AuthSession, AuthUser, NewUser, PasswordResetInput, PasswordResetRequest, SigninInput, SignupInput};
use super::errors::AuthError;
use super::password;
use super::repository::AuthRepository;
use super::token::TokenService;
use crate::notify::{password_reset_email, EmailSender};

/// Auth business service independent of web framework
pub struct AuthService<R: AuthRepository> {
    repo: Arc<R>,
    tokens: TokenService,
    mailer: Arc<dyn EmailSender>,
    reset_base_url: String,
}

fn present(v: &Option<String>) -> Option<&str> {
    v.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

impl<R: AuthRepository> AuthService<R> {
    pub fn new(repo: Arc<R>, tokens: TokenService, mailer: Arc<dyn EmailSender>, reset_base_url: impl Into<String>) -> Self {
        Self { repo, tokens, mailer, reset_base_url: reset_base_url.into() }
    }

    pub fn tokens(&self) -> &TokenService { &self.tokens }

    /// Register a new account with an Argon2 password hash.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, token::TokenService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::SignupInput;
    /// use service::notify::LogEmailSender;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), TokenService::with_defaults("secret"), Arc::new(LogEmailSender), "http://localhost/reset");
    /// let input = SignupInput { username: Some("amy".into()), email: Some("amy@x.com".into()), password: Some("Abcd123!".into()), role: Some("artist".into()) };
    /// let user = tokio_test::block_on(svc.signup(input)).unwrap();
    /// assert_eq!(user.email, "amy@x.com");
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn signup(&self, input: SignupInput) -> Result<AuthUser, AuthError> {
        let (Some(username), Some(email), Some(raw_password), Some(raw_role)) =
            (present(&input.username), present(&input.email), input.password.as_deref().filter(|p| !p.is_empty()), present(&input.role))
        else {
            return Err(AuthError::Validation("Username, email, password, and user type are required.".into()));
        };
        let role = Role::parse(raw_role).ok_or_else(|| AuthError::Validation("Invalid user type.".into()))?;
        if self.repo.find_by_username(username).await?.is_some() {
            debug!("username taken");
            return Err(AuthError::Conflict("Username already exists.".into()));
        }
        if self.repo.find_by_email(email).await?.is_some() {
            return Err(AuthError::Conflict("Email already exists.".into()));
        }
        if !common::validate::is_valid_email(email) {
            return Err(AuthError::Validation("Invalid email format.".into()));
        }
        password::check_policy(raw_password)?;

        let user = self
            .repo
            .create_user(NewUser {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: password::hash(raw_password)?,
                role,
            })
            .await?;
        info!(user_id = user.id, role = %user.role, "user_registered");
        Ok(user)
    }

    /// Check credentials, stamp `last_login` and issue a session token.
    ///
    /// # Examples
    /// ```
    /// use service::auth::{AuthService, token::TokenService, repository::mock::MockAuthRepository};
    /// use service::auth::domain::{SignupInput, SigninInput};
    /// use service::notify::LogEmailSender;
    /// use std::sync::Arc;
    /// let svc = AuthService::new(Arc::new(MockAuthRepository::default()), TokenService::with_defaults("secret"), Arc::new(LogEmailSender), "http://localhost/reset");
    /// let _ = tokio_test::block_on(svc.signup(SignupInput { username: Some("amy".into()), email: Some("amy@x.com".into()), password: Some("Abcd123!".into()), role: Some("admin".into()) }));
    /// let session = tokio_test::block_on(svc.signin(SigninInput { username: Some("amy".into()), password: Some("Abcd123!".into()) })).unwrap();
    /// assert_eq!(session.user.username, "amy");
    /// assert!(session.user.last_login.is_some());
    /// ```
    #[instrument(skip(self, input), fields(username = ?input.username))]
    pub async fn signin(&self, input: SigninInput) -> Result<AuthSession, AuthError> {
        let username = present(&input.username).ok_or(AuthError::Unauthorized)?;
        let raw_password = input.password.as_deref().ok_or(AuthError::Unauthorized)?;
        let stored = self.repo.find_by_username(username).await?.ok_or(AuthError::Unauthorized)?;
        if !password::verify(raw_password, &stored.password_hash)? {
            warn!(user_id = stored.user.id, "signin_rejected");
            return Err(AuthError::Unauthorized);
        }

        let user = self.repo.record_login(stored.user.id, common::datetime::now()).await?;
        let token = self.tokens.issue(user.id, &user.username, user.role)?;
        info!(user_id = user.id, "user_signed_in");
        Ok(AuthSession { user, token })
    }

    /// Email a one-hour reset link to a registered address.
    #[instrument(skip(self, input))]
    pub async fn request_password_reset(&self, input: PasswordResetRequest) -> Result<(), AuthError> {
        let email = present(&input.email).ok_or_else(|| AuthError::Validation("Email is required.".into()))?;
        let stored = self
            .repo
            .find_by_email(email)
            .await?
            .ok_or_else(|| AuthError::NotFound("User not found.".into()))?;

        let token = self.tokens.issue_reset(&stored.user.email)?;
        let link = format!("{}?token={}", self.reset_base_url, token);
        self.mailer
            .send(password_reset_email(&stored.user.email, &link))
            .await
            .map_err(|e| {
                warn!(user_id = stored.user.id, error = %e, "reset_email_failed");
                AuthError::Email(e)
            })?;
        info!(user_id = stored.user.id, "reset_email_sent");
        Ok(())
    }

    #[instrument(skip(self, input))]
    pub async fn reset_password(&self, input: PasswordResetInput) -> Result<(), AuthError> {
        let (Some(token), Some(new_password)) = (present(&input.token), input.new_password.as_deref().filter(|p| !p.is_empty())) else {
            return Err(AuthError::Validation("Token and new password are required.".into()));
        };
        let email = self.tokens.verify_reset(token).map_err(|_| AuthError::InvalidResetToken)?;
        let stored = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or_else(|| AuthError::NotFound("User not found.".into()))?;
        password::check_policy(new_password)?;

        self.repo.set_password(stored.user.id, password::hash(new_password)?).await?;
        info!(user_id = stored.user.id, "password_reset");
        Ok(())
    }
}
