#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Dirty dozen ranking, sunburst breakdown and date range reports for
//! collected debris.
//!
//! The pure transformations ([`ranking`], [`breakdown`], [`date_range`],
//! [`catalog`]) operate on rows that have already been fetched. The
//! [`reports`] module wires them to a [`source::RowSource`], which is the
//! only place that touches storage.

pub mod breakdown;
pub mod catalog;
pub mod date_range;
pub mod ranking;
pub mod reports;
pub mod source;

use shoreline_contribution_models::ContributionError;
use thiserror::Error;

/// Errors that can occur while producing debris reports or storing
/// contributions.
#[derive(Debug, Error)]
pub enum DebrisError {
    /// A date parameter was not `YYYY-MM-DD`.
    #[error("Invalid date '{value}': {source}. Expected format: YYYY-MM-DD")]
    InvalidDate {
        /// Raw value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// The row source failed to read.
    #[error("Row source error: {message}")]
    Source {
        /// Description of what went wrong.
        message: String,
    },

    /// A contribution could not be committed.
    #[error("Failed to store contribution: {message}")]
    WriteFailure {
        /// Description of what went wrong.
        message: String,
    },

    /// A contribution payload could not be decoded.
    #[error("Malformed contribution: {0}")]
    MalformedContribution(#[from] ContributionError),

    /// A contribution failed validation.
    #[error("Invalid contribution: {}", .problems.join("; "))]
    InvalidContribution {
        /// Every problem found.
        problems: Vec<String>,
    },
}

impl DebrisError {
    /// Whether the error was caused by the caller's input rather than by
    /// storage.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. }
                | Self::MalformedContribution(_)
                | Self::InvalidContribution { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_errors_are_distinguished_from_storage_errors() {
        let invalid = DebrisError::InvalidContribution {
            problems: vec!["a".to_string(), "b".to_string()],
        };
        assert!(invalid.is_client_error());
        assert_eq!(invalid.to_string(), "Invalid contribution: a; b");

        let source = DebrisError::Source {
            message: "connection reset".to_string(),
        };
        assert!(!source.is_client_error());

        let write = DebrisError::WriteFailure {
            message: "deadlock".to_string(),
        };
        assert!(!write.is_client_error());
    }
}
