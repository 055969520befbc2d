//! Database query functions for debris reports and contributions.

use std::fmt::Write as _;

use chrono::{Days, NaiveDate, NaiveDateTime};
use moosicbox_json_utils::database::ToValue as _;
use shoreline_contribution_models::{Contribution, ItemQuantity};
use shoreline_debris_models::{CatalogItem, ItemAggregate, ReportQuery};
use shoreline_location_models::{LocationCategory, LocationTuple};
use switchy_database::{Database, DatabaseValue};

use crate::DbError;

const ITEM_QUANTITY_COLUMNS: usize = 6;

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap_or_default()
}

/// Returns every distinct `(site, town, county)` combination.
///
/// `NULL` components come back as empty strings.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn get_location_tuples(db: &dyn Database) -> Result<Vec<LocationTuple>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT DISTINCT site_name, town, county
             FROM debris_summary
             ORDER BY county, town, site_name",
            &[],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let site: Option<String> = row.to_value("site_name").unwrap_or(None);
            let town: Option<String> = row.to_value("town").unwrap_or(None);
            let county: Option<String> = row.to_value("county").unwrap_or(None);
            LocationTuple::new(
                site.unwrap_or_default(),
                town.unwrap_or_default(),
                county.unwrap_or_default(),
            )
        })
        .collect())
}

/// Builds the per-item aggregate query for a location granularity.
///
/// The location column comes from [`LocationCategory::column`]; the
/// location name and dates are bound parameters.
fn item_aggregates_sql(category: LocationCategory) -> String {
    let column = category.column();
    format!(
        "SELECT MIN(item_id) AS item_id,
                item_name,
                MIN(category) AS category,
                MIN(material) AS material,
                SUM(quantity)::DOUBLE PRECISION AS quantity_sum
         FROM debris_summary
         WHERE $1 <= volunteer_date
           AND volunteer_date < $2
           AND {column} = $3
         GROUP BY item_name
         ORDER BY item_name"
    )
}

/// Returns quantities summed per item name for records at a location
/// within an inclusive date window.
///
/// The end date covers the whole day.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn get_item_aggregates(
    db: &dyn Database,
    query: &ReportQuery,
) -> Result<Vec<ItemAggregate>, DbError> {
    let end_exclusive = query
        .end_date
        .checked_add_days(Days::new(1))
        .unwrap_or(query.end_date);

    let sql = item_aggregates_sql(query.location_category);
    let rows = db
        .query_raw_params(
            &sql,
            &[
                DatabaseValue::DateTime(start_of_day(query.start_date)),
                DatabaseValue::DateTime(start_of_day(end_exclusive)),
                DatabaseValue::String(query.location_name.clone()),
            ],
        )
        .await?;

    log::debug!(
        "Fetched {} item aggregate(s) for {} '{}'",
        rows.len(),
        query.location_category,
        query.location_name
    );

    Ok(rows
        .iter()
        .map(|row| ItemAggregate {
            item_id: row.to_value("item_id").unwrap_or(0),
            item_name: row.to_value("item_name").unwrap_or_default(),
            category: row.to_value("category").unwrap_or_default(),
            material: row.to_value("material").unwrap_or_default(),
            quantity: row.to_value("quantity_sum").unwrap_or(0.0),
        })
        .collect())
}

/// Returns the earliest and latest volunteer date at a location, or
/// `None` if it has no records.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn get_date_bounds(
    db: &dyn Database,
    category: LocationCategory,
    location_name: &str,
) -> Result<Option<(NaiveDate, NaiveDate)>, DbError> {
    let column = category.column();
    let sql = format!(
        "SELECT MIN(volunteer_date) AS first_date, MAX(volunteer_date) AS last_date
         FROM debris_summary
         WHERE {column} = $1"
    );

    let rows = db
        .query_raw_params(&sql, &[DatabaseValue::String(location_name.to_string())])
        .await?;

    let Some(row) = rows.first() else {
        return Ok(None);
    };

    let first: Option<NaiveDateTime> = row.to_value("first_date").unwrap_or(None);
    let last: Option<NaiveDateTime> = row.to_value("last_date").unwrap_or(None);

    Ok(first.zip(last).map(|(f, l)| (f.date(), l.date())))
}

/// Returns distinct team captain names, ascending.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn get_team_captains(db: &dyn Database) -> Result<Vec<String>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT DISTINCT team_captain
             FROM team_sessions
             WHERE team_captain IS NOT NULL
             ORDER BY team_captain",
            &[],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| row.to_value("team_captain").unwrap_or_default())
        .collect())
}

/// Returns every catalog item.
///
/// # Errors
///
/// Returns [`DbError`] if the database operation fails.
pub async fn get_catalog_items(db: &dyn Database) -> Result<Vec<CatalogItem>, DbError> {
    let rows = db
        .query_raw_params(
            "SELECT item_id, material, category, item_name FROM items ORDER BY item_id",
            &[],
        )
        .await?;

    Ok(rows
        .iter()
        .map(|row| CatalogItem {
            item_id: row.to_value("item_id").unwrap_or(0),
            material: row.to_value("material").unwrap_or_default(),
            category: row.to_value("category").unwrap_or_default(),
            item_name: row.to_value("item_name").unwrap_or_default(),
        })
        .collect())
}

/// Stores a contribution in a single transaction and returns the new
/// team id.
///
/// The transaction is committed only if the session row and every item
/// row were written; otherwise it is rolled back and the original error
/// returned.
///
/// # Errors
///
/// Returns [`DbError`] if any statement, the commit, or opening the
/// transaction fails.
pub async fn insert_contribution(
    db: &dyn Database,
    contribution: &Contribution,
) -> Result<i64, DbError> {
    let txn = db.begin_transaction().await?;

    match insert_contribution_rows(txn.as_ref(), contribution).await {
        Ok(team_id) => {
            txn.commit().await?;
            Ok(team_id)
        }
        Err(e) => {
            log::warn!("Rolling back contribution insert: {e}");
            if let Err(rollback_err) = txn.rollback().await {
                log::error!("Failed to roll back contribution insert: {rollback_err}");
            }
            Err(e)
        }
    }
}

async fn insert_contribution_rows(
    db: &dyn Database,
    contribution: &Contribution,
) -> Result<i64, DbError> {
    let session = &contribution.session;
    let rows = db
        .query_raw_params(
            "INSERT INTO team_sessions (
                site_id, volunteer_date, team_captain, num_of_people,
                num_of_trashbags, trash_weight, walking_distance, updated_by
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING team_id",
            &[
                DatabaseValue::Int64(session.site_id),
                DatabaseValue::DateTime(start_of_day(session.volunteer_date)),
                DatabaseValue::String(session.team_captain.clone()),
                DatabaseValue::Int32(session.people_count),
                DatabaseValue::Int32(session.bag_count),
                DatabaseValue::Real64(session.trash_weight),
                DatabaseValue::Real64(session.walking_distance),
                DatabaseValue::String(session.updated_by.clone()),
            ],
        )
        .await?;

    let row = rows.first().ok_or_else(|| DbError::Conversion {
        message: "Failed to get team id from insert".to_string(),
    })?;

    let team_id: i64 = row.to_value("team_id").map_err(|e| DbError::Conversion {
        message: format!("Failed to parse team id: {e}"),
    })?;

    if contribution.items.is_empty() {
        return Ok(team_id);
    }

    let (sql, params) = item_quantities_insert(team_id, &contribution.items);
    let inserted = db.exec_raw_params(&sql, &params).await?;

    if usize::try_from(inserted).ok() != Some(contribution.items.len()) {
        return Err(DbError::Conversion {
            message: format!(
                "Inserted {inserted} of {} item rows for team {team_id}",
                contribution.items.len()
            ),
        });
    }

    Ok(team_id)
}

/// Builds one multi-row `INSERT` for a session's item tallies.
fn item_quantities_insert(team_id: i64, items: &[ItemQuantity]) -> (String, Vec<DatabaseValue>) {
    let mut sql = String::from(
        "INSERT INTO item_quantities (
            team_id, item_id, quantity, brand, updated_by, event_code
        ) VALUES ",
    );
    let mut params: Vec<DatabaseValue> = Vec::with_capacity(items.len() * ITEM_QUANTITY_COLUMNS);

    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push('(');
        for column in 0..ITEM_QUANTITY_COLUMNS {
            if column > 0 {
                sql.push_str(", ");
            }
            write!(sql, "${}", i * ITEM_QUANTITY_COLUMNS + column + 1).unwrap();
        }
        sql.push(')');

        params.push(DatabaseValue::Int64(team_id));
        params.push(DatabaseValue::Int64(item.item_id));
        params.push(DatabaseValue::Real64(item.quantity));
        params.push(DatabaseValue::String(item.brand.clone()));
        params.push(DatabaseValue::String(item.updated_by.clone()));
        params.push(DatabaseValue::String(item.event_code.clone()));
    }

    (sql, params)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use moosicbox_json_utils::database::ToValue as _;
    use shoreline_contribution_models::TeamSession;
    use switchy_database_connection::init_sqlite_rusqlite;

    use super::*;

    /// Scratch `SQLite` database holding the two contribution tables.
    struct ScratchDb {
        db: Box<dyn Database>,
        path: PathBuf,
    }

    impl ScratchDb {
        async fn open(name: &str) -> Self {
            let path = std::env::temp_dir()
                .join(format!("shoreline-{name}-{}.db", std::process::id()));
            let _ = std::fs::remove_file(&path);

            let db = init_sqlite_rusqlite(Some(path.as_path())).unwrap();
            db.exec_raw(
                "CREATE TABLE team_sessions (
                    team_id          INTEGER PRIMARY KEY AUTOINCREMENT,
                    site_id          INTEGER NOT NULL,
                    volunteer_date   TEXT NOT NULL,
                    team_captain     TEXT,
                    num_of_people    INTEGER,
                    num_of_trashbags INTEGER,
                    trash_weight     REAL,
                    walking_distance REAL,
                    updated_by       TEXT
                )",
            )
            .await
            .unwrap();
            db.exec_raw(
                "CREATE TABLE item_quantities (
                    team_id    INTEGER NOT NULL,
                    item_id    INTEGER NOT NULL,
                    quantity   REAL NOT NULL,
                    brand      TEXT,
                    updated_by TEXT,
                    event_code TEXT,
                    UNIQUE (team_id, item_id)
                )",
            )
            .await
            .unwrap();

            Self { db, path }
        }

        async fn count(&self, table: &str) -> i64 {
            let rows = self
                .db
                .query_raw_params(&format!("SELECT COUNT(*) AS n FROM {table}"), &[])
                .await
                .unwrap();
            rows[0].clone().to_value("n").unwrap()
        }
    }

    impl Drop for ScratchDb {
        fn drop(&mut self) {
            let _ = std::fs::remove_file(&self.path);
        }
    }

    fn contribution(items: Vec<ItemQuantity>) -> Contribution {
        Contribution {
            session: TeamSession {
                site_id: 7,
                volunteer_date: NaiveDate::from_ymd_opt(2024, 4, 20).unwrap(),
                team_captain: "R. Alvarez".to_string(),
                people_count: 5,
                bag_count: 3,
                trash_weight: 12.5,
                walking_distance: 1.2,
                updated_by: "intake".to_string(),
            },
            items,
        }
    }

    fn item(item_id: i64) -> ItemQuantity {
        ItemQuantity {
            item_id,
            quantity: 3.0,
            brand: "Acme".to_string(),
            updated_by: "intake".to_string(),
            event_code: "E1".to_string(),
        }
    }

    #[test]
    fn aggregate_query_selects_category_column() {
        for &category in LocationCategory::all() {
            let sql = item_aggregates_sql(category);
            assert!(
                sql.contains(&format!("AND {} = $3", category.column())),
                "{category} query should filter on its column"
            );
        }
    }

    #[test]
    fn item_insert_numbers_placeholders_per_row() {
        let (sql, params) = item_quantities_insert(42, &[item(1), item(2)]);

        assert!(sql.ends_with("($1, $2, $3, $4, $5, $6), ($7, $8, $9, $10, $11, $12)"));
        assert_eq!(params.len(), 12);
        assert!(matches!(params[0], DatabaseValue::Int64(42)));
        assert!(matches!(params[6], DatabaseValue::Int64(42)));
        assert!(matches!(params[7], DatabaseValue::Int64(2)));
    }

    #[test]
    fn start_of_day_is_midnight() {
        let date = NaiveDate::from_ymd_opt(2024, 4, 20).unwrap();
        assert_eq!(start_of_day(date).to_string(), "2024-04-20 00:00:00");
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn contribution_commits_session_and_items() {
        let scratch = ScratchDb::open("commit").await;

        let team_id = insert_contribution(
            scratch.db.as_ref(),
            &contribution(vec![item(1), item(2), item(3)]),
        )
        .await
        .unwrap();

        assert_eq!(scratch.count("team_sessions").await, 1);
        assert_eq!(scratch.count("item_quantities").await, 3);

        let rows = scratch
            .db
            .query_raw_params(
                "SELECT COUNT(*) AS n FROM item_quantities WHERE team_id = $1",
                &[DatabaseValue::Int64(team_id)],
            )
            .await
            .unwrap();
        let linked: i64 = rows[0].clone().to_value("n").unwrap();
        assert_eq!(linked, 3);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn contribution_without_items_stores_only_session() {
        let scratch = ScratchDb::open("no-items").await;

        let first = insert_contribution(scratch.db.as_ref(), &contribution(vec![]))
            .await
            .unwrap();
        let second = insert_contribution(scratch.db.as_ref(), &contribution(vec![]))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert_eq!(scratch.count("team_sessions").await, 2);
        assert_eq!(scratch.count("item_quantities").await, 0);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn failed_item_insert_rolls_back_session() {
        let scratch = ScratchDb::open("rollback").await;

        let result = insert_contribution(
            scratch.db.as_ref(),
            &contribution(vec![item(4), item(4)]),
        )
        .await;

        assert!(result.is_err());
        assert_eq!(scratch.count("team_sessions").await, 0);
        assert_eq!(scratch.count("item_quantities").await, 0);

        insert_contribution(scratch.db.as_ref(), &contribution(vec![item(4)]))
            .await
            .unwrap();
        assert_eq!(scratch.count("team_sessions").await, 1);
        assert_eq!(scratch.count("item_quantities").await, 1);
    }
}
