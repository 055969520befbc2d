//! Top-N ranking of debris items by collected quantity.

use std::cmp::Ordering;

use shoreline_debris_models::{DirtyDozenEntry, ItemAggregate};

/// Number of items in a dirty dozen report.
pub const DIRTY_DOZEN_SIZE: usize = 12;

/// Ranks the twelve most collected items.
#[must_use]
pub fn dirty_dozen(rows: &[ItemAggregate]) -> Vec<DirtyDozenEntry> {
    rank_items(rows, DIRTY_DOZEN_SIZE)
}

/// Ranks the `limit` most collected items.
///
/// Items are ordered by quantity descending, then item name ascending,
/// then item id ascending. Percentages are shares of the quantity of
/// *every* row, not just the ranked ones, and are `0` when that total is
/// zero.
#[must_use]
pub fn rank_items(rows: &[ItemAggregate], limit: usize) -> Vec<DirtyDozenEntry> {
    let total: f64 = rows.iter().map(|row| row.quantity).sum();

    let mut ranked: Vec<&ItemAggregate> = rows.iter().collect();
    ranked.sort_by(|a, b| compare_rank(a, b));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|row| DirtyDozenEntry {
            item_name: row.item_name.clone(),
            item_id: row.item_id,
            category_name: row.category.clone(),
            material_name: row.material.clone(),
            count: row.quantity,
            percentage: percentage(row.quantity, total),
        })
        .collect()
}

/// `count / total * 100`, or `0` when `total` is zero.
#[must_use]
pub fn percentage(count: f64, total: f64) -> f64 {
    if total == 0.0 {
        0.0
    } else {
        count / total * 100.0
    }
}

fn compare_rank(a: &ItemAggregate, b: &ItemAggregate) -> Ordering {
    b.quantity
        .total_cmp(&a.quantity)
        .then_with(|| a.item_name.cmp(&b.item_name))
        .then_with(|| a.item_id.cmp(&b.item_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(item_id: i64, name: &str, quantity: f64) -> ItemAggregate {
        ItemAggregate::new(item_id, name, "Beverage", "Plastic", quantity)
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn ranks_by_quantity_with_share_of_total() {
        let rows = vec![
            ItemAggregate::new(1, "Bottle", "Beverage", "Plastic", 5.0),
            ItemAggregate::new(2, "Can", "Beverage", "Metal", 10.0),
        ];

        let ranked = dirty_dozen(&rows);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].item_name, "Can");
        assert_eq!(ranked[0].material_name, "Metal");
        assert!(close(ranked[0].percentage, 200.0 / 3.0));
        assert_eq!(ranked[1].item_name, "Bottle");
        assert!(close(ranked[1].percentage, 100.0 / 3.0));
    }

    #[test]
    fn returns_at_most_twelve() {
        let rows: Vec<ItemAggregate> = (0..20)
            .map(|i| row(i, &format!("Item {i:02}"), f64::from(u8::try_from(i).unwrap())))
            .collect();

        let ranked = dirty_dozen(&rows);
        assert_eq!(ranked.len(), DIRTY_DOZEN_SIZE);
        assert_eq!(ranked[0].item_name, "Item 19");
        assert_eq!(ranked[11].item_name, "Item 08");

        let share: f64 = ranked.iter().map(|e| e.percentage).sum();
        assert!(share < 100.0);
    }

    #[test]
    fn returns_every_item_when_fewer_than_twelve() {
        let rows: Vec<ItemAggregate> = (0..5).map(|i| row(i, "x", 1.0)).collect();
        let ranked = dirty_dozen(&rows);
        assert_eq!(ranked.len(), 5);

        let share: f64 = ranked.iter().map(|e| e.percentage).sum();
        assert!(close(share, 100.0));
    }

    #[test]
    fn percentages_are_zero_when_total_is_zero() {
        let rows = vec![row(1, "Straw", 0.0), row(2, "Lid", 0.0)];
        let ranked = dirty_dozen(&rows);
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|e| e.percentage == 0.0));
    }

    #[test]
    fn empty_rows_rank_to_nothing() {
        assert!(dirty_dozen(&[]).is_empty());
    }

    #[test]
    fn ties_break_by_name_then_id() {
        let rows = vec![
            row(9, "Straw", 4.0),
            row(3, "Lid", 4.0),
            row(1, "Straw", 4.0),
            row(2, "Cup", 7.0),
        ];
        let ranked = rank_items(&rows, 3);
        let order: Vec<(i64, &str)> = ranked
            .iter()
            .map(|e| (e.item_id, e.item_name.as_str()))
            .collect();
        assert_eq!(order, [(2, "Cup"), (3, "Lid"), (1, "Straw")]);
    }

    #[test]
    fn percentage_uses_grand_total_not_ranked_total() {
        let rows = vec![row(1, "A", 6.0), row(2, "B", 3.0), row(3, "C", 1.0)];
        let ranked = rank_items(&rows, 1);
        assert_eq!(ranked.len(), 1);
        assert!(close(ranked[0].percentage, 60.0));
    }
}
