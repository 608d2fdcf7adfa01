use thiserror::Error;

pub mod datetime;
pub mod types;
pub mod utils;
pub mod validate;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("parse error: {0}")]
    Parse(String),
}
