#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Postgres row source and contribution storage for shoreline.
//!
//! Uses `switchy_database` raw parameterized queries. Reports read the
//! `debris_summary` view, which joins every recorded item quantity with
//! its team session, site and catalog entry:
//!
//! | column | type |
//! |--------|------|
//! | `site_name`, `town`, `county` | text |
//! | `item_id` | bigint |
//! | `item_name`, `category`, `material` | text |
//! | `quantity` | double precision |
//! | `volunteer_date` | timestamp |
//!
//! Contributions are written to `team_sessions` and `item_quantities`;
//! the entry-form catalog is read from `items`.

pub mod db;
pub mod queries;
pub mod source;

pub use source::DatabaseRowSource;

/// Errors that can occur during database operations.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    /// Database query error.
    #[error("Database error: {0}")]
    Database(#[from] switchy_database::DatabaseError),

    /// Data conversion error.
    #[error("Data conversion error: {message}")]
    Conversion {
        /// Description of what went wrong.
        message: String,
    },
}
