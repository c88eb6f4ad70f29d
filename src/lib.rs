//! Back office service for a pet adoption shelter.
//!
//! One SQLite store holds two kinds of records: pets, with their adoption
//! status, and the applications filed for them. The adoption workflow keeps
//! the two consistent: submitting an application holds the pet as `Pending`,
//! approval marks it `Adopted`, and denial releases it back to `Available`.
//! Every coupled transition runs inside a single transaction.

pub mod adoption;
pub mod config;
pub mod error;
pub mod store;
pub mod telemetry;

/// Embedded schema migrations for the adoption store.
pub fn migrator() -> sqlx::migrate::Migrator {
    sqlx::migrate!("./migrations")
}
