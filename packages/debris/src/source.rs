//! The storage boundary for debris reports and contributions.

use async_trait::async_trait;
use chrono::NaiveDate;
use shoreline_contribution_models::Contribution;
use shoreline_debris_models::{CatalogItem, ItemAggregate, ReportQuery};
use shoreline_location_models::{LocationCategory, LocationTuple};

use crate::DebrisError;

/// Reads volunteer-collected debris records and stores new
/// contributions.
///
/// Implementations select location columns only through
/// [`LocationCategory::column`].
#[async_trait]
pub trait RowSource: Send + Sync {
    /// Every distinct `(site, town, county)` combination.
    async fn location_tuples(&self) -> Result<Vec<LocationTuple>, DebrisError>;

    /// Quantities summed per item for records at `query.location_name`
    /// dated within `query.start_date..=query.end_date`.
    async fn item_aggregates(&self, query: &ReportQuery) -> Result<Vec<ItemAggregate>, DebrisError>;

    /// Earliest and latest volunteer date at a location, or `None` if it
    /// has no records.
    async fn date_bounds(
        &self,
        category: LocationCategory,
        location_name: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, DebrisError>;

    /// Distinct team captain names, ascending.
    async fn team_captains(&self) -> Result<Vec<String>, DebrisError>;

    /// Every item in the catalog.
    async fn catalog_items(&self) -> Result<Vec<CatalogItem>, DebrisError>;

    /// Stores a contribution atomically and returns the new team session
    /// id.
    ///
    /// Any failure must be reported as [`DebrisError::WriteFailure`].
    async fn insert_contribution(&self, contribution: &Contribution) -> Result<i64, DebrisError>;
}
