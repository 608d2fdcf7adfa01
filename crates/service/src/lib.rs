//! Service layer for the studio backend.
//! - Business rules on top of the `models` entities.
//! - Free async functions over a `DatabaseConnection`, one module per resource.
//! - `ServiceError` carries the client-facing message; the HTTP layer picks the status.

pub mod errors;
pub mod access;
pub mod appointments;
pub mod artists;
pub mod auth;
pub mod bookings;
pub mod dashboard;
pub mod gallery;
pub mod inquiries;
pub mod newsletters;
pub mod notify;
pub mod pagination;
pub mod piercings;
pub mod ratings;
pub mod reviews;
pub mod schedule;
pub mod settings;
pub mod users;
#[cfg(test)]
pub mod test_support;
