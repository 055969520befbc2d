#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Site/town/county hierarchy construction for cleanup locations.
//!
//! Turns the flat list of distinct `(site, town, county)` tuples into
//! either a nested `county -> town -> [site]` grouping or three
//! independent sorted name lists (the older flat shape).

use std::collections::BTreeSet;

use shoreline_location_models::{LocationCategory, LocationHierarchy, LocationList, LocationTuple};

/// Groups location tuples into `county -> town -> [site]`.
///
/// Sites are appended in encounter order and are not deduplicated, so a
/// repeated tuple yields a repeated site. Tuples missing any component
/// are skipped.
#[must_use]
pub fn build_hierarchy<'a, I>(tuples: I) -> LocationHierarchy
where
    I: IntoIterator<Item = &'a LocationTuple>,
{
    let mut hierarchy = LocationHierarchy::new();
    let mut skipped = 0usize;

    for tuple in tuples {
        if !tuple.is_complete() {
            skipped += 1;
            continue;
        }

        hierarchy
            .entry(tuple.county.clone())
            .or_default()
            .entry(tuple.town.clone())
            .or_default()
            .push(tuple.site.clone());
    }

    if skipped > 0 {
        log::debug!("Skipped {skipped} incomplete location tuple(s) while building hierarchy");
    }

    hierarchy
}

/// Distinct ascending names for one granularity, skipping empty values.
#[must_use]
pub fn distinct_names(tuples: &[LocationTuple], category: LocationCategory) -> Vec<String> {
    tuples
        .iter()
        .map(|t| t.name(category))
        .filter(|name| !name.is_empty())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Builds the flat per-category view: one [`LocationList`] each for
/// sites, towns and counties, in that order.
#[must_use]
pub fn location_lists(tuples: &[LocationTuple]) -> Vec<LocationList> {
    LocationCategory::all()
        .iter()
        .map(|&category| LocationList {
            location_category: category,
            location_label: category.label().to_string(),
            location_names: distinct_names(tuples, category),
        })
        .collect()
}
