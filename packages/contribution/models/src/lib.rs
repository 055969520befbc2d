#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Volunteer contribution payloads, legacy form parsing and validation.
//!
//! A contribution records one team's cleanup session at a site together
//! with the per-item tallies the team collected. Payloads arrive either
//! as JSON or in the older `#`/`||`/`----` delimited form posted by the
//! legacy data-entry page (see [`legacy`]).

pub mod legacy;
pub mod validation;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use legacy::parse_legacy;
pub use validation::{ValidationProblem, validate};

/// Errors from decoding a contribution payload.
#[derive(Debug, thiserror::Error)]
pub enum ContributionError {
    /// The team and item sections are not separated by `----`.
    #[error("Missing '----' separator between team and item sections")]
    MissingSeparator,

    /// A section had the wrong number of `#`-separated fields.
    #[error("Expected {expected} fields in {section}, found {found}")]
    FieldCount {
        /// Which part of the payload.
        section: &'static str,
        /// Required number of fields.
        expected: usize,
        /// Number of fields present.
        found: usize,
    },

    /// A numeric field could not be parsed.
    #[error("Invalid {field} '{value}'")]
    InvalidNumber {
        /// Field name.
        field: &'static str,
        /// Raw value.
        value: String,
    },

    /// The volunteer date could not be parsed.
    #[error("Invalid date '{value}': {source}. Expected format: MM/DD/YYYY")]
    InvalidDate {
        /// Raw value.
        value: String,
        /// Underlying parse failure.
        #[source]
        source: chrono::ParseError,
    },

    /// An item label did not carry a `[id]` suffix.
    #[error("Item label '{label}' has no [id] suffix")]
    InvalidItemLabel {
        /// Raw label.
        label: String,
    },

    /// The item rows could not be read.
    #[error("Malformed item row: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON payload did not match the contribution shape.
    #[error("Malformed JSON contribution: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decodes a contribution body.
///
/// A JSON object is read as a structured [`Contribution`]; anything else
/// is parsed as the legacy delimited string.
///
/// # Errors
///
/// Returns [`ContributionError`] if the body matches neither format.
pub fn decode_contribution(body: &str) -> Result<Contribution, ContributionError> {
    let trimmed = body.trim();
    if trimmed.starts_with('{') {
        Ok(serde_json::from_str(trimmed)?)
    } else {
        parse_legacy(trimmed)
    }
}

/// One team's cleanup session at a site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSession {
    /// Site the team cleaned.
    pub site_id: i64,
    /// Day of the cleanup.
    pub volunteer_date: NaiveDate,
    /// Team captain's name.
    pub team_captain: String,
    /// Number of volunteers.
    pub people_count: i32,
    /// Number of trash bags filled.
    pub bag_count: i32,
    /// Total trash weight.
    pub trash_weight: f64,
    /// Distance walked.
    pub walking_distance: f64,
    /// Who entered the record.
    pub updated_by: String,
}

/// Quantity of one catalog item collected during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemQuantity {
    /// Catalog item id.
    pub item_id: i64,
    /// Number collected.
    pub quantity: f64,
    /// Brand, if noted.
    #[serde(default)]
    pub brand: String,
    /// Who entered the record.
    pub updated_by: String,
    /// Event the session belongs to.
    #[serde(default)]
    pub event_code: String,
}

/// A complete contribution: the session plus its item tallies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contribution {
    /// Session details.
    pub session: TeamSession,
    /// Item tallies; may be empty.
    #[serde(default)]
    pub items: Vec<ItemQuantity>,
}
