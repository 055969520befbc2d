#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Debris aggregate rows, dirty dozen entries and sunburst tree types.
//!
//! These are the shapes produced by the debris reports. They serialize to
//! the JSON the charting frontend expects, so field names are part of the
//! public contract.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shoreline_location_models::LocationCategory;

/// Name of the root node of every sunburst tree.
pub const SUNBURST_ROOT: &str = "Debris";

/// Filter shared by the item-level reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    /// Granularity of `location_name`.
    pub location_category: LocationCategory,
    /// Site, town or county name to filter on.
    pub location_name: String,
    /// First volunteer date included.
    pub start_date: NaiveDate,
    /// Last volunteer date included.
    pub end_date: NaiveDate,
}

/// Quantity collected for one item type within a report window.
///
/// Produced already summed per item by the row source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemAggregate {
    /// Catalog item id.
    pub item_id: i64,
    /// Item name, e.g. `"Bottle Caps"`.
    pub item_name: String,
    /// Usage category, e.g. `"Beverage"`.
    pub category: String,
    /// Material, e.g. `"Plastic"`.
    pub material: String,
    /// Summed quantity.
    pub quantity: f64,
}

impl ItemAggregate {
    /// Creates a new aggregate row.
    #[must_use]
    pub fn new(
        item_id: i64,
        item_name: impl Into<String>,
        category: impl Into<String>,
        material: impl Into<String>,
        quantity: f64,
    ) -> Self {
        Self {
            item_id,
            item_name: item_name.into(),
            category: category.into(),
            material: material.into(),
            quantity,
        }
    }
}

/// One ranked item in a dirty dozen report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirtyDozenEntry {
    /// Item name.
    pub item_name: String,
    /// Catalog item id.
    pub item_id: i64,
    /// Usage category.
    pub category_name: String,
    /// Material.
    pub material_name: String,
    /// Summed quantity.
    pub count: f64,
    /// Share of the quantity of every item in the window, 0-100.
    pub percentage: f64,
}

/// A node of the material/category/item sunburst tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SunburstNode {
    /// Grouping node.
    Branch {
        /// Group name.
        name: String,
        /// Child nodes in first-seen order.
        children: Vec<SunburstNode>,
    },
    /// Item node.
    Leaf {
        /// Item name.
        name: String,
        /// Summed quantity.
        count: f64,
    },
}

impl SunburstNode {
    /// Creates a branch with the given children.
    #[must_use]
    pub fn branch(name: impl Into<String>, children: Vec<Self>) -> Self {
        Self::Branch {
            name: name.into(),
            children,
        }
    }

    /// Creates a leaf.
    #[must_use]
    pub fn leaf(name: impl Into<String>, count: f64) -> Self {
        Self::Leaf {
            name: name.into(),
            count,
        }
    }

    /// Node name.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Branch { name, .. } | Self::Leaf { name, .. } => name,
        }
    }

    /// Child nodes; empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Branch { children, .. } => children,
            Self::Leaf { .. } => &[],
        }
    }

    /// Sum of every leaf count below (or at) this node.
    #[must_use]
    pub fn total_count(&self) -> f64 {
        match self {
            Self::Branch { children, .. } => children.iter().map(Self::total_count).sum(),
            Self::Leaf { count, .. } => *count,
        }
    }

    /// Number of leaves below (or at) this node.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        match self {
            Self::Branch { children, .. } => children.iter().map(Self::leaf_count).sum(),
            Self::Leaf { .. } => 1,
        }
    }
}

/// First and last volunteer date recorded for a location.
///
/// Both fields are absent when the location has no records, which
/// serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Earliest date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_date: Option<String>,
    /// Latest date, `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_date: Option<String>,
}

impl DateRange {
    /// Whether no date range is known.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.first_date.is_none() && self.last_date.is_none()
    }
}

/// A catalog entry that volunteers can record quantities against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogItem {
    /// Catalog item id.
    pub item_id: i64,
    /// Material.
    pub material: String,
    /// Usage category.
    pub category: String,
    /// Item name.
    pub item_name: String,
}

/// Entry-form item labels grouped by material.
pub type TrashItems = BTreeMap<String, Vec<String>>;
