//! Role and ownership checks applied by individual handlers.

use models::user::Role;
use serde::{Deserialize, Serialize};

use crate::auth::token::Claims;
use crate::errors::ServiceError;

/// Caller identity bound to a request after its bearer token verifies.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: i32,
    pub username: String,
    pub role: Role,
}

impl Identity {
    pub fn is_admin(&self) -> bool { self.role == Role::Admin }
}

impl From<Claims> for Identity {
    fn from(c: Claims) -> Self {
        Self { user_id: c.user_id, username: c.username, role: c.role }
    }
}

/// Caller's role must be one of `allowed`.
pub fn require_role(who: &Identity, allowed: &[Role]) -> Result<(), ServiceError> {
    if allowed.contains(&who.role) {
        return Ok(());
    }
    let names: Vec<&str> = allowed.iter().map(Role::as_str).collect();
    Err(ServiceError::Forbidden(format!("Access denied. Requires role: {}.", names.join(" or "))))
}

/// Admins pass; anyone else must be the owner.
pub fn require_admin_or_owner(who: &Identity, owner_id: i32) -> Result<(), ServiceError> {
    if who.is_admin() || who.user_id == owner_id {
        return Ok(());
    }
    Err(ServiceError::Forbidden("You do not have permission to modify this resource.".into()))
}
