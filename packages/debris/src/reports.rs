//! Report entry points: fetch rows from a [`RowSource`] and shape them.
//!
//! Each function serves one endpoint. They hold no state between calls
//! and never fail on empty data; only the row source can fail.

use shoreline_contribution_models::{Contribution, validate};
use shoreline_debris_models::{DateRange, DirtyDozenEntry, ReportQuery, SunburstNode, TrashItems};
use shoreline_location::{build_hierarchy, location_lists};
use shoreline_location_models::{LocationCategory, LocationHierarchy, LocationList};

use crate::DebrisError;
use crate::breakdown::build_sunburst;
use crate::catalog::group_trash_items;
use crate::date_range::resolve_date_range;
use crate::ranking;
use crate::source::RowSource;

/// Locations nested as `county -> town -> [site]`.
///
/// # Errors
///
/// Returns [`DebrisError`] if the row source fails.
pub async fn locations_hierarchy(source: &dyn RowSource) -> Result<LocationHierarchy, DebrisError> {
    let tuples = source.location_tuples().await?;
    Ok(build_hierarchy(&tuples))
}

/// Distinct site, town and county names as three flat lists.
///
/// Superseded by [`locations_hierarchy`] but still served.
///
/// # Errors
///
/// Returns [`DebrisError`] if the row source fails.
pub async fn all_locations_list(source: &dyn RowSource) -> Result<Vec<LocationList>, DebrisError> {
    let tuples = source.location_tuples().await?;
    Ok(location_lists(&tuples))
}

/// The twelve most collected items in the query window.
///
/// # Errors
///
/// Returns [`DebrisError`] if the row source fails.
pub async fn dirty_dozen(
    source: &dyn RowSource,
    query: &ReportQuery,
) -> Result<Vec<DirtyDozenEntry>, DebrisError> {
    let rows = source.item_aggregates(query).await?;
    log::debug!(
        "Ranking {} item(s) for {} '{}' ({} to {})",
        rows.len(),
        query.location_category,
        query.location_name,
        query.start_date,
        query.end_date
    );
    Ok(ranking::dirty_dozen(&rows))
}

/// Material/category/item sunburst tree for the query window.
///
/// # Errors
///
/// Returns [`DebrisError`] if the row source fails.
pub async fn breakdown(
    source: &dyn RowSource,
    query: &ReportQuery,
) -> Result<SunburstNode, DebrisError> {
    let rows = source.item_aggregates(query).await?;
    let tree = build_sunburst(&rows);
    log::debug!(
        "Breakdown for {} '{}' has {} leaf item(s) totalling {}",
        query.location_category,
        query.location_name,
        tree.leaf_count(),
        tree.total_count()
    );
    Ok(tree)
}

/// First and last recorded volunteer date at a location; empty if the
/// location has no records.
///
/// # Errors
///
/// Returns [`DebrisError`] if the row source fails.
pub async fn valid_date_range(
    source: &dyn RowSource,
    category: LocationCategory,
    location_name: &str,
) -> Result<DateRange, DebrisError> {
    let bounds = source.date_bounds(category, location_name).await?;
    let range = resolve_date_range(bounds);
    if range.is_empty() {
        log::debug!("No recorded dates for {category} '{location_name}'");
    }
    Ok(range)
}

/// Team captains for the entry form drop-down.
///
/// # Errors
///
/// Returns [`DebrisError`] if the row source fails.
pub async fn team_captains(source: &dyn RowSource) -> Result<Vec<String>, DebrisError> {
    source.team_captains().await
}

/// Catalog item labels grouped by material for the entry form.
///
/// # Errors
///
/// Returns [`DebrisError`] if the row source fails.
pub async fn trash_items(source: &dyn RowSource) -> Result<TrashItems, DebrisError> {
    let items = source.catalog_items().await?;
    Ok(group_trash_items(&items))
}

/// Validates and stores a contribution, returning the new team session
/// id.
///
/// # Errors
///
/// Returns [`DebrisError::InvalidContribution`] if validation finds
/// problems, or [`DebrisError::WriteFailure`] if it could not be stored.
pub async fn submit_contribution(
    source: &dyn RowSource,
    contribution: &Contribution,
) -> Result<i64, DebrisError> {
    let problems = validate(contribution);
    if !problems.is_empty() {
        return Err(DebrisError::InvalidContribution {
            problems: problems.iter().map(ToString::to_string).collect(),
        });
    }

    let team_id = source.insert_contribution(contribution).await?;
    log::info!(
        "Stored contribution for site {} on {} as team {team_id} ({} item row(s))",
        contribution.session.site_id,
        contribution.session.volunteer_date,
        contribution.items.len()
    );
    Ok(team_id)
}
