//! Parser for the delimited contribution string posted by the legacy
//! data-entry page.
//!
//! ```text
//! site#MM/DD/YYYY#captain#people#bags#weight#distance#updater----
//! category, item[id]#quantity#brand#updater#event||...
//! ```
//!
//! The team section and the item section are separated by `----`. Item
//! rows are separated by `||` and their fields by `#`. Empty item rows
//! are ignored.

use std::str::FromStr;

use chrono::NaiveDate;

use crate::{Contribution, ContributionError, ItemQuantity, TeamSession};

const SECTION_SEPARATOR: &str = "----";
const ROW_SEPARATOR: &str = "||";
const FIELD_SEPARATOR: char = '#';
const TEAM_FIELDS: usize = 8;
const ITEM_FIELDS: usize = 5;

/// Parses a legacy delimited contribution string.
///
/// # Errors
///
/// Returns [`ContributionError`] if a section is missing, a field count
/// is wrong, or a date, number or item label cannot be parsed.
pub fn parse_legacy(raw: &str) -> Result<Contribution, ContributionError> {
    let (team, items) = raw
        .split_once(SECTION_SEPARATOR)
        .ok_or(ContributionError::MissingSeparator)?;

    Ok(Contribution {
        session: parse_team(team.trim())?,
        items: parse_items(items)?,
    })
}

fn parse_team(team: &str) -> Result<TeamSession, ContributionError> {
    let fields: Vec<&str> = team.split(FIELD_SEPARATOR).map(str::trim).collect();
    if fields.len() != TEAM_FIELDS {
        return Err(ContributionError::FieldCount {
            section: "team section",
            expected: TEAM_FIELDS,
            found: fields.len(),
        });
    }

    let volunteer_date = NaiveDate::parse_from_str(fields[1], "%m/%d/%Y").map_err(|source| {
        ContributionError::InvalidDate {
            value: fields[1].to_string(),
            source,
        }
    })?;

    Ok(TeamSession {
        site_id: parse_number("site id", fields[0])?,
        volunteer_date,
        team_captain: fields[2].to_string(),
        people_count: parse_number("people count", fields[3])?,
        bag_count: parse_number("bag count", fields[4])?,
        trash_weight: parse_number("trash weight", fields[5])?,
        walking_distance: parse_number("walking distance", fields[6])?,
        updated_by: fields[7].to_string(),
    })
}

fn parse_items(items: &str) -> Result<Vec<ItemQuantity>, ContributionError> {
    let rows: Vec<&str> = items
        .split(ROW_SEPARATOR)
        .map(str::trim)
        .filter(|row| !row.is_empty())
        .collect();

    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let joined = rows.join("\n");
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'#')
        .has_headers(false)
        .flexible(true)
        .from_reader(joined.as_bytes());

    let mut parsed = Vec::with_capacity(rows.len());
    for record in reader.records() {
        let record = record?;
        if record.len() != ITEM_FIELDS {
            return Err(ContributionError::FieldCount {
                section: "item row",
                expected: ITEM_FIELDS,
                found: record.len(),
            });
        }

        parsed.push(ItemQuantity {
            item_id: parse_item_label(&record[0])?,
            quantity: parse_number("quantity", &record[1])?,
            brand: record[2].trim().to_string(),
            updated_by: record[3].trim().to_string(),
            event_code: record[4].trim().to_string(),
        });
    }

    Ok(parsed)
}

/// Extracts the catalog id from a label such as `"Beverage, Can[14]"`.
fn parse_item_label(label: &str) -> Result<i64, ContributionError> {
    let id = label
        .split_once('[')
        .and_then(|(_, rest)| rest.split_once(']'))
        .map(|(id, _)| id.trim())
        .ok_or_else(|| ContributionError::InvalidItemLabel {
            label: label.to_string(),
        })?;

    parse_number("item id", id)
}

fn parse_number<T: FromStr>(field: &'static str, value: &str) -> Result<T, ContributionError> {
    value
        .trim()
        .parse()
        .map_err(|_| ContributionError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}
