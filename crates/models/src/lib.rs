//! SeaORM entities for the studio schema plus model-level validation helpers.

pub mod errors;
pub mod db;
pub mod user;
pub mod artist;
pub mod booking;
pub mod piercing;
pub mod review;
pub mod gallery;
pub mod inquiry;
pub mod newsletter;
pub mod subscriber;
pub mod global_setting;

#[cfg(test)]
mod tests;
