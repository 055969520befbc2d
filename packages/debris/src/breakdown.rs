//! Material -> category -> item grouping for the sunburst chart.

use shoreline_debris_models::{ItemAggregate, SUNBURST_ROOT, SunburstNode};

/// A named group whose children are kept in first-seen order.
struct Group<T> {
    name: String,
    children: Vec<T>,
}

impl<T> Group<T> {
    const fn new(name: String) -> Self {
        Self {
            name,
            children: Vec::new(),
        }
    }
}

/// Returns the group named `name`, appending a new one if absent.
///
/// Group counts per level are small (tens of materials or categories),
/// so a linear scan is used.
fn child<'a, T>(groups: &'a mut Vec<Group<T>>, name: &str) -> &'a mut Group<T> {
    let existing = groups.iter().position(|group| group.name == name);
    let idx = if let Some(idx) = existing {
        idx
    } else {
        groups.push(Group::new(name.to_string()));
        groups.len() - 1
    };
    &mut groups[idx]
}

/// Builds the sunburst tree rooted at `"Debris"`.
///
/// The first level groups by material, the second by category, and each
/// row becomes one leaf carrying its quantity. Groups appear in the order
/// they are first seen. Leaves with the same name are not merged.
#[must_use]
pub fn build_sunburst(rows: &[ItemAggregate]) -> SunburstNode {
    let mut materials: Vec<Group<Group<SunburstNode>>> = Vec::new();

    for row in rows {
        child(&mut child(&mut materials, &row.material).children, &row.category)
            .children
            .push(SunburstNode::leaf(row.item_name.clone(), row.quantity));
    }

    SunburstNode::branch(
        SUNBURST_ROOT,
        materials
            .into_iter()
            .map(|material| {
                SunburstNode::branch(
                    material.name,
                    material
                        .children
                        .into_iter()
                        .map(|category| SunburstNode::branch(category.name, category.children))
                        .collect(),
                )
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn groups_material_then_category() {
        let rows = vec![
            ItemAggregate::new(1, "Bottle", "Beverage", "Plastic", 5.0),
            ItemAggregate::new(2, "Can", "Beverage", "Metal", 10.0),
        ];

        let expected = SunburstNode::branch(
            "Debris",
            vec![
                SunburstNode::branch(
                    "Plastic",
                    vec![SunburstNode::branch(
                        "Beverage",
                        vec![SunburstNode::leaf("Bottle", 5.0)],
                    )],
                ),
                SunburstNode::branch(
                    "Metal",
                    vec![SunburstNode::branch(
                        "Beverage",
                        vec![SunburstNode::leaf("Can", 10.0)],
                    )],
                ),
            ],
        );

        assert_eq!(build_sunburst(&rows), expected);
    }

    #[test]
    fn keeps_first_seen_order_and_reuses_groups() {
        let rows = vec![
            ItemAggregate::new(1, "Straw", "Food", "Plastic", 1.0),
            ItemAggregate::new(2, "Bottle", "Beverage", "Glass", 2.0),
            ItemAggregate::new(3, "Cup", "Beverage", "Plastic", 3.0),
            ItemAggregate::new(4, "Lid", "Food", "Plastic", 4.0),
        ];

        let tree = build_sunburst(&rows);
        let materials: Vec<&str> = tree.children().iter().map(SunburstNode::name).collect();
        assert_eq!(materials, ["Plastic", "Glass"]);

        let plastic = &tree.children()[0];
        let categories: Vec<&str> = plastic.children().iter().map(SunburstNode::name).collect();
        assert_eq!(categories, ["Food", "Beverage"]);

        let food: Vec<&str> = plastic.children()[0]
            .children()
            .iter()
            .map(SunburstNode::name)
            .collect();
        assert_eq!(food, ["Straw", "Lid"]);
    }

    #[test]
    fn conserves_total_quantity() {
        let rows: Vec<ItemAggregate> = (0..30)
            .map(|i| {
                ItemAggregate::new(
                    i,
                    format!("Item {i}"),
                    format!("Category {}", i % 4),
                    format!("Material {}", i % 3),
                    f64::from(u8::try_from(i).unwrap()) * 1.5,
                )
            })
            .collect();

        let tree = build_sunburst(&rows);
        let input_total: f64 = rows.iter().map(|r| r.quantity).sum();
        assert!(close(tree.total_count(), input_total));
        assert_eq!(tree.leaf_count(), rows.len());
    }

    #[test]
    fn does_not_merge_duplicate_leaves() {
        let rows = vec![
            ItemAggregate::new(1, "Bottle", "Beverage", "Plastic", 5.0),
            ItemAggregate::new(1, "Bottle", "Beverage", "Plastic", 2.0),
        ];
        let tree = build_sunburst(&rows);
        assert_eq!(tree.leaf_count(), 2);
    }

    #[test]
    fn empty_rows_build_bare_root() {
        let tree = build_sunburst(&[]);
        assert_eq!(tree.name(), "Debris");
        assert!(tree.children().is_empty());
        assert!(close(tree.total_count(), 0.0));
    }
}
