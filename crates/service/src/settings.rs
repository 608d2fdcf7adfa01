//! Global boolean settings, created on first read.

use sea_orm::{ActiveModelTrait, DatabaseConnection, Set, TransactionTrait};
use serde_json::Value;
use tracing::info;

use models::global_setting;

use crate::errors::ServiceError;

/// JSON truthiness: null, false, 0, "" and empty containers are false.
pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// Current value of `key`, inserting `false` when absent.
pub async fn get_or_create(db: &DatabaseConnection, key: &str) -> Result<bool, ServiceError> {
    global_setting::validate_key(key)?;
    let txn = db.begin().await?;
    let value = match global_setting::find_by_key(&txn, key).await? {
        Some(found) => found.value,
        None => {
            global_setting::create(&txn, key, false).await?;
            false
        }
    };
    txn.commit().await?;
    Ok(value)
}

/// Set `key` to the truthiness of `value`. A missing or null value is rejected.
pub async fn set(db: &DatabaseConnection, key: &str, value: Option<&Value>) -> Result<bool, ServiceError> {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return Err(ServiceError::Validation("New value is required.".into()));
    };
    global_setting::validate_key(key)?;
    let flag = truthy(value);
    let txn = db.begin().await?;
    match global_setting::find_by_key(&txn, key).await? {
        Some(found) => {
            let mut am: global_setting::ActiveModel = found.into();
            am.value = Set(flag);
            am.update(&txn).await?;
        }
        None => {
            global_setting::create(&txn, key, flag).await?;
        }
    }
    txn.commit().await?;
    info!(key, value = flag, "setting_updated");
    Ok(flag)
}
