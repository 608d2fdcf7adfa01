//! Field rules shared by the booking and piercing lifecycles.

use chrono::NaiveDateTime;
use sea_orm::{ConnectionTrait, EntityTrait};
use serde::{Deserialize, Serialize};

use models::{artist, booking};

use crate::errors::ServiceError;
use crate::schedule;

/// Body of `PATCH /{kind}/{id}/payment_status`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentStatusInput {
    pub payment_status: Option<String>,
}

/// Trimmed value of a required text field.
pub(crate) fn required(v: Option<String>) -> Result<String, ServiceError> {
    v.map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(ServiceError::required_fields)
}

/// A zero price counts as missing.
pub(crate) fn required_price(v: Option<f64>) -> Result<f64, ServiceError> {
    match v {
        None => Err(ServiceError::required_fields()),
        Some(p) if p == 0.0 => Err(ServiceError::required_fields()),
        Some(p) => {
            booking::validate_price(p)?;
            Ok(p)
        }
    }
}

pub(crate) fn contact_preference(v: Option<String>) -> Result<String, ServiceError> {
    let pref = required(v)?.to_ascii_lowercase();
    booking::validate_contact_preference(&pref)?;
    Ok(pref)
}

pub(crate) fn appointment(v: Option<String>, now: NaiveDateTime) -> Result<NaiveDateTime, ServiceError> {
    schedule::validate_appointment(&required(v)?, now)
}

pub(crate) fn payment_status(v: Option<String>) -> Result<String, ServiceError> {
    let status = v.map(|s| s.trim().to_ascii_lowercase()).unwrap_or_default();
    booking::validate_payment_status(&status)?;
    Ok(status)
}

pub(crate) async fn ensure_artist<C: ConnectionTrait>(db: &C, artist_id: i32) -> Result<artist::Model, ServiceError> {
    artist::Entity::find_by_id(artist_id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("Artist"))
}

/// Non-blank `?name=` search term.
pub(crate) fn search_term(raw: Option<&str>) -> Result<String, ServiceError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s.to_lowercase()))
        .ok_or_else(|| ServiceError::Validation("Search query is required".into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_rejects_blank() {
        assert_eq!(required(Some("  ink ".into())).unwrap(), "ink");
        assert!(matches!(required(Some("   ".into())), Err(ServiceError::Validation(m)) if m == "All fields are required"));
        assert!(required(None).is_err());
    }

    #[test]
    fn price_rules() {
        assert_eq!(required_price(Some(80.0)).unwrap(), 80.0);
        assert!(matches!(required_price(Some(0.0)), Err(ServiceError::Validation(m)) if m == "All fields are required"));
        assert!(matches!(required_price(Some(-1.0)), Err(ServiceError::Validation(m)) if m.contains("positive")));
    }

    #[test]
    fn enumerated_fields() {
        assert_eq!(contact_preference(Some("Text".into())).unwrap(), "text");
        assert!(contact_preference(Some("email".into())).is_err());
        assert_eq!(payment_status(Some("paid".into())).unwrap(), "paid");
        assert!(payment_status(Some("refunded".into())).is_err());
        assert!(payment_status(None).is_err());
    }

    #[test]
    fn search_term_needs_text() {
        assert_eq!(search_term(Some(" Ann ")).unwrap(), "%ann%");
        assert!(matches!(search_term(Some("  ")), Err(ServiceError::Validation(m)) if m == "Search query is required"));
        assert!(search_term(None).is_err());
    }
}
