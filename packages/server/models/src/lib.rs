#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! HTTP query parameters and response envelopes for the shoreline server.
//!
//! Every response wraps its payload in a single named field (for example
//! `{"dirtydozen": [...]}`), which is the shape the charting frontend
//! reads.

use serde::{Deserialize, Serialize};
use shoreline_debris_models::{DateRange, DirtyDozenEntry, SunburstNode, TrashItems};
use shoreline_location_models::{LocationHierarchy, LocationList};

/// Query parameters for the dirty dozen and breakdown endpoints.
///
/// Every field is optional; missing values fall back to server
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQueryParams {
    /// `site`, `town` or `county`; anything else means `site`.
    pub location_category: Option<String>,
    /// Location to report on.
    pub location_name: Option<String>,
    /// First date included (`YYYY-MM-DD`).
    pub start_date: Option<String>,
    /// Last date included (`YYYY-MM-DD`).
    pub end_date: Option<String>,
}

/// Query parameters for the valid date range endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationQueryParams {
    /// `site`, `town` or `county`; anything else means `site`.
    pub location_category: Option<String>,
    /// Location to look up.
    pub location_name: Option<String>,
}

/// `GET /dirtydozen` response.
#[derive(Debug, Clone, Serialize)]
pub struct DirtyDozenResponse {
    /// Ranked items.
    pub dirtydozen: Vec<DirtyDozenEntry>,
}

/// `GET /breakdown` response.
#[derive(Debug, Clone, Serialize)]
pub struct BreakdownResponse {
    /// Sunburst tree.
    pub data: SunburstNode,
}

/// `GET /validdaterange` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidDateRangeResponse {
    /// Recorded date bounds; `{}` when none.
    pub valid_date_range: DateRange,
}

/// `GET /locations` response.
#[derive(Debug, Clone, Serialize)]
pub struct LocationsResponse {
    /// Flat site, town and county lists.
    pub locations: Vec<LocationList>,
}

/// `GET /locationsHierarchy` response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationsHierarchyResponse {
    /// `county -> town -> [site]`.
    pub locations_hierarchy: LocationHierarchy,
}

/// `GET /getTLs` response.
#[derive(Debug, Clone, Serialize)]
pub struct TeamCaptainsResponse {
    /// Team captain names.
    #[serde(rename = "getTLs")]
    pub team_captains: Vec<String>,
}

/// `GET /getTrashItems` response.
#[derive(Debug, Clone, Serialize)]
pub struct TrashItemsResponse {
    /// Item labels grouped by material.
    #[serde(rename = "getTrashItems")]
    pub trash_items: TrashItems,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    /// Human-readable description.
    pub error: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the service is healthy.
    pub healthy: bool,
    /// Service version.
    pub version: String,
}

#[cfg(test)]
mod tests {
    use shoreline_debris_models::ItemAggregate;

    use super::*;

    #[test]
    fn envelopes_use_frontend_field_names() {
        let json = serde_json::to_value(ValidDateRangeResponse {
            valid_date_range: DateRange::default(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"validDateRange": {}}));

        let json = serde_json::to_value(TeamCaptainsResponse {
            team_captains: vec!["M. Chen".to_string()],
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"getTLs": ["M. Chen"]}));

        let json = serde_json::to_value(LocationsHierarchyResponse {
            locations_hierarchy: LocationHierarchy::new(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"locationsHierarchy": {}}));
    }

    #[test]
    fn report_params_are_camel_case() {
        let params: ReportQueryParams = serde_json::from_value(serde_json::json!({
            "locationCategory": "town",
            "locationName": "Sea Bright",
            "startDate": "2020-01-01"
        }))
        .unwrap();
        assert_eq!(params.location_category.as_deref(), Some("town"));
        assert_eq!(params.location_name.as_deref(), Some("Sea Bright"));
        assert_eq!(params.start_date.as_deref(), Some("2020-01-01"));
        assert!(params.end_date.is_none());
    }

    #[test]
    fn dirty_dozen_envelope() {
        let rows = [ItemAggregate::new(1, "Can", "Beverage", "Metal", 4.0)];
        let entries = rows
            .iter()
            .map(|r| DirtyDozenEntry {
                item_name: r.item_name.clone(),
                item_id: r.item_id,
                category_name: r.category.clone(),
                material_name: r.material.clone(),
                count: r.quantity,
                percentage: 100.0,
            })
            .collect();
        let json = serde_json::to_value(DirtyDozenResponse {
            dirtydozen: entries,
        })
        .unwrap();
        assert_eq!(json["dirtydozen"][0]["itemId"], 1);
        assert_eq!(json["dirtydozen"][0]["percentage"], 100.0);
    }
}
