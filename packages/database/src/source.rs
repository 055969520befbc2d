//! [`RowSource`] backed by a `switchy_database` connection.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use shoreline_contribution_models::Contribution;
use shoreline_debris::DebrisError;
use shoreline_debris::source::RowSource;
use shoreline_debris_models::{CatalogItem, ItemAggregate, ReportQuery};
use shoreline_location_models::{LocationCategory, LocationTuple};
use switchy_database::Database;

use crate::{DbError, queries};

/// Serves debris reports from the database.
#[derive(Clone)]
pub struct DatabaseRowSource {
    db: Arc<dyn Database>,
}

impl DatabaseRowSource {
    /// Wraps a database connection.
    #[must_use]
    pub fn new(db: Arc<dyn Database>) -> Self {
        Self { db }
    }
}

fn read_error(e: DbError) -> DebrisError {
    DebrisError::Source {
        message: e.to_string(),
    }
}

fn write_error(e: DbError) -> DebrisError {
    DebrisError::WriteFailure {
        message: e.to_string(),
    }
}

#[async_trait]
impl RowSource for DatabaseRowSource {
    async fn location_tuples(&self) -> Result<Vec<LocationTuple>, DebrisError> {
        queries::get_location_tuples(self.db.as_ref())
            .await
            .map_err(read_error)
    }

    async fn item_aggregates(&self, query: &ReportQuery) -> Result<Vec<ItemAggregate>, DebrisError> {
        queries::get_item_aggregates(self.db.as_ref(), query)
            .await
            .map_err(read_error)
    }

    async fn date_bounds(
        &self,
        category: LocationCategory,
        location_name: &str,
    ) -> Result<Option<(NaiveDate, NaiveDate)>, DebrisError> {
        queries::get_date_bounds(self.db.as_ref(), category, location_name)
            .await
            .map_err(read_error)
    }

    async fn team_captains(&self) -> Result<Vec<String>, DebrisError> {
        queries::get_team_captains(self.db.as_ref())
            .await
            .map_err(read_error)
    }

    async fn catalog_items(&self) -> Result<Vec<CatalogItem>, DebrisError> {
        queries::get_catalog_items(self.db.as_ref())
            .await
            .map_err(read_error)
    }

    async fn insert_contribution(&self, contribution: &Contribution) -> Result<i64, DebrisError> {
        queries::insert_contribution(self.db.as_ref(), contribution)
            .await
            .map_err(write_error)
    }
}
