//! Sanity checks applied to a contribution before it is stored.
//!
//! Tallies are counts of physical items, so each catalog item may appear
//! once per session and every quantity must be a non-negative whole
//! number. Session totals must not be negative either.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::Contribution;

/// A single problem found in a contribution.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationProblem {
    /// The same catalog item was tallied more than once.
    DuplicateItem {
        /// Repeated item id.
        item_id: i64,
        /// How many rows carry it.
        occurrences: usize,
    },
    /// An item quantity is below zero.
    NegativeQuantity {
        /// Offending item id.
        item_id: i64,
        /// Recorded quantity.
        quantity: f64,
    },
    /// An item quantity has a fractional part.
    FractionalQuantity {
        /// Offending item id.
        item_id: i64,
        /// Recorded quantity.
        quantity: f64,
    },
    /// An item quantity is NaN or infinite.
    NonFiniteQuantity {
        /// Offending item id.
        item_id: i64,
    },
    /// A session total is below zero.
    NegativeSessionValue {
        /// Session field name.
        field: &'static str,
        /// Recorded value.
        value: f64,
    },
}

impl fmt::Display for ValidationProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateItem {
                item_id,
                occurrences,
            } => write!(f, "item {item_id} is repeated {occurrences} times"),
            Self::NegativeQuantity { item_id, quantity } => {
                write!(f, "the quantity {quantity} for item {item_id} is negative")
            }
            Self::FractionalQuantity { item_id, quantity } => {
                write!(f, "the quantity {quantity} for item {item_id} is a decimal")
            }
            Self::NonFiniteQuantity { item_id } => {
                write!(f, "the quantity for item {item_id} is not a number")
            }
            Self::NegativeSessionValue { field, value } => {
                write!(f, "the {field} {value} is negative")
            }
        }
    }
}

/// Checks a contribution and returns every problem found, in payload
/// order. An empty result means the contribution can be stored.
#[must_use]
pub fn validate(contribution: &Contribution) -> Vec<ValidationProblem> {
    let mut problems = Vec::new();
    let session = &contribution.session;

    for (field, value) in [
        ("people count", f64::from(session.people_count)),
        ("bag count", f64::from(session.bag_count)),
        ("trash weight", session.trash_weight),
        ("walking distance", session.walking_distance),
    ] {
        if value < 0.0 {
            problems.push(ValidationProblem::NegativeSessionValue { field, value });
        }
    }

    let mut occurrences: BTreeMap<i64, usize> = BTreeMap::new();
    for item in &contribution.items {
        *occurrences.entry(item.item_id).or_default() += 1;
    }

    let mut reported = BTreeSet::new();
    for item in &contribution.items {
        let count = occurrences.get(&item.item_id).copied().unwrap_or(0);
        if count > 1 && reported.insert(item.item_id) {
            problems.push(ValidationProblem::DuplicateItem {
                item_id: item.item_id,
                occurrences: count,
            });
        }
    }

    for item in &contribution.items {
        let quantity = item.quantity;
        if !quantity.is_finite() {
            problems.push(ValidationProblem::NonFiniteQuantity {
                item_id: item.item_id,
            });
            continue;
        }
        if quantity < 0.0 {
            problems.push(ValidationProblem::NegativeQuantity {
                item_id: item.item_id,
                quantity,
            });
        }
        if (quantity - quantity.trunc()).abs() > f64::EPSILON {
            problems.push(ValidationProblem::FractionalQuantity {
                item_id: item.item_id,
                quantity,
            });
        }
    }

    problems
}
