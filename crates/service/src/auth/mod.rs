//! Accounts and credentials: signup, signin and password reset over a pluggable
//! repository, plus the token service the HTTP gate verifies bearer tokens with.

pub mod domain;
pub mod errors;
pub mod password;
pub mod repository;
pub mod service;
pub mod repo;
pub mod token;

pub use service::AuthService;
