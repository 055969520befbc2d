#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location category selector and site/town/county hierarchy types.
//!
//! Every cleanup site belongs to exactly one town, and every town to
//! exactly one county. Reports are filtered at one of these three
//! granularities, selected by [`LocationCategory`].

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Granularity at which debris records are filtered or grouped.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LocationCategory {
    /// A single cleanup site.
    #[default]
    #[serde(alias = "site_name")]
    #[strum(to_string = "site", serialize = "site_name")]
    Site,
    /// A town containing one or more sites.
    Town,
    /// A county containing one or more towns.
    County,
}

impl LocationCategory {
    /// Normalizes a raw category selector.
    ///
    /// Accepts `site` (or the column name `site_name`), `town` and
    /// `county`. Anything else, including the empty string, is treated as
    /// [`LocationCategory::Site`].
    #[must_use]
    pub fn normalize(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }

    /// Same as [`Self::normalize`] for an optional query parameter.
    #[must_use]
    pub fn normalize_opt(raw: Option<&str>) -> Self {
        raw.map_or_else(Self::default, Self::normalize)
    }

    /// Storage column holding the location name at this granularity.
    ///
    /// This is the only way a location column is chosen for a query, so
    /// the set of column references stays closed.
    #[must_use]
    pub const fn column(self) -> &'static str {
        match self {
            Self::Site => "site_name",
            Self::Town => "town",
            Self::County => "county",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Site => "Site",
            Self::Town => "Town",
            Self::County => "County",
        }
    }

    /// All categories, finest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Site, Self::Town, Self::County]
    }
}

/// One distinct physical cleanup site with its town and county.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationTuple {
    /// Site name.
    pub site: String,
    /// Town the site belongs to.
    pub town: String,
    /// County the town belongs to.
    pub county: String,
}

impl LocationTuple {
    /// Creates a new tuple.
    #[must_use]
    pub fn new(site: impl Into<String>, town: impl Into<String>, county: impl Into<String>) -> Self {
        Self {
            site: site.into(),
            town: town.into(),
            county: county.into(),
        }
    }

    /// Returns the name at the given granularity.
    #[must_use]
    pub fn name(&self, category: LocationCategory) -> &str {
        match category {
            LocationCategory::Site => &self.site,
            LocationCategory::Town => &self.town,
            LocationCategory::County => &self.county,
        }
    }

    /// Whether every component has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.site.is_empty() && !self.town.is_empty() && !self.county.is_empty()
    }
}

/// Sites grouped by town, keyed by town name.
pub type TownSites = BTreeMap<String, Vec<String>>;

/// `county -> town -> [site]`.
pub type LocationHierarchy = BTreeMap<String, TownSites>;

/// All distinct names at one granularity.
///
/// Served by the deprecated flat locations endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationList {
    /// Which granularity these names belong to.
    pub location_category: LocationCategory,
    /// Display label for the granularity.
    pub location_label: String,
    /// Distinct, ascending names.
    pub location_names: Vec<String>,
}
