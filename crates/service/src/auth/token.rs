//! Signed bearer tokens (HS256 JWT).
//!
//! Session tokens carry `{user_id, username, role, iat, exp}` and live for
//! `token_ttl` (six hours by default). Password-reset tokens are a separate claim set
//! bound to an email address with `purpose = "password_reset"`, so neither kind can
//! stand in for the other. Both are checked with zero leeway.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use models::user::Role;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::errors::AuthError;

const RESET_PURPOSE: &str = "password_reset";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ResetClaims {
    sub: String,
    purpose: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token has expired")]
    Expired,
    #[error("Invalid token")]
    Invalid,
}

#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
    reset_ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl: Duration, reset_ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
            reset_ttl,
        }
    }

    /// Six-hour sessions and one-hour reset links.
    pub fn with_defaults(secret: &str) -> Self {
        Self::new(secret, Duration::hours(6), Duration::hours(1))
    }

    pub fn from_config(cfg: &configs::AuthConfig) -> Self {
        Self::new(&cfg.jwt_secret, Duration::hours(cfg.token_ttl_hours), Duration::seconds(cfg.reset_token_ttl_secs))
    }

    pub fn issue(&self, user_id: i32, username: &str, role: Role) -> Result<String, AuthError> {
        self.issue_at(user_id, username, role, Utc::now())
    }

    /// Issue a session token as if it were `now`.
    pub fn issue_at(&self, user_id: i32, username: &str, role: Role, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = Claims {
            user_id,
            username: username.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenError> {
        decode::<Claims>(token, &self.decoding, &self.validation())
            .map(|data| data.claims)
            .map_err(classify)
    }

    pub fn issue_reset(&self, email: &str) -> Result<String, AuthError> {
        self.issue_reset_at(email, Utc::now())
    }

    pub fn issue_reset_at(&self, email: &str, now: DateTime<Utc>) -> Result<String, AuthError> {
        let claims = ResetClaims {
            sub: email.to_string(),
            purpose: RESET_PURPOSE.to_string(),
            iat: now.timestamp(),
            exp: (now + self.reset_ttl).timestamp(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding).map_err(|e| AuthError::TokenError(e.to_string()))
    }

    /// Email address a reset token was issued for.
    pub fn verify_reset(&self, token: &str) -> Result<String, TokenError> {
        let claims = decode::<ResetClaims>(token, &self.decoding, &self.validation())
            .map(|data| data.claims)
            .map_err(classify)?;
        if claims.purpose != RESET_PURPOSE {
            return Err(TokenError::Invalid);
        }
        Ok(claims.sub)
    }

    fn validation(&self) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation
    }
}

fn classify(e: jsonwebtoken::errors::Error) -> TokenError {
    match e.kind() {
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn svc() -> TokenService { TokenService::with_defaults("test-secret") }

    #[test]
    fn issued_token_round_trips_claims() {
        let token = svc().issue(7, "amy", Role::Artist).unwrap();
        let claims = svc().verify(&token).unwrap();
        assert_eq!(claims.user_id, 7);
        assert_eq!(claims.username, "amy");
        assert_eq!(claims.role, Role::Artist);
        assert_eq!(claims.exp - claims.iat, 6 * 3600);
    }

    #[test]
    fn token_valid_just_before_six_hours() {
        let issued = Utc::now() - Duration::hours(6) + Duration::seconds(30);
        let token = svc().issue_at(1, "amy", Role::Admin, issued).unwrap();
        assert!(svc().verify(&token).is_ok());
    }

    #[test]
    fn token_expires_after_six_hours() {
        let issued = Utc::now() - Duration::hours(6) - Duration::seconds(1);
        let token = svc().issue_at(1, "amy", Role::Admin, issued).unwrap();
        assert_eq!(svc().verify(&token), Err(TokenError::Expired));
    }

    #[test]
    fn tampered_token_is_invalid() {
        let token = svc().issue(1, "amy", Role::Artist).unwrap();
        let other = TokenService::with_defaults("another-secret");
        assert_eq!(other.verify(&token), Err(TokenError::Invalid));

        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[1] = parts[1].chars().rev().collect();
        assert_eq!(svc().verify(&parts.join(".")), Err(TokenError::Invalid));
        assert_eq!(svc().verify("garbage"), Err(TokenError::Invalid));
    }

    #[test]
    fn reset_and_session_tokens_are_not_interchangeable() {
        let reset = svc().issue_reset("amy@x.com").unwrap();
        assert_eq!(svc().verify_reset(&reset).unwrap(), "amy@x.com");
        assert_eq!(svc().verify(&reset), Err(TokenError::Invalid));

        let session = svc().issue(1, "amy", Role::Artist).unwrap();
        assert_eq!(svc().verify_reset(&session), Err(TokenError::Invalid));
    }

    #[test]
    fn reset_token_expires_after_an_hour() {
        let issued = Utc::now() - Duration::hours(1) - Duration::seconds(1);
        let reset = svc().issue_reset_at("amy@x.com", issued).unwrap();
        assert_eq!(svc().verify_reset(&reset), Err(TokenError::Expired));
    }
}
