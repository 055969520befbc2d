//! Item catalog grouping for the contribution entry form.

use shoreline_debris_models::{CatalogItem, TrashItems};

/// Entry-form label for an item, e.g. `"Beverage, Can[14]"`.
///
/// The trailing `[id]` is what the legacy contribution parser reads back.
#[must_use]
pub fn item_label(item: &CatalogItem) -> String {
    format!("{}, {}[{}]", item.category, item.item_name, item.item_id)
}

/// Groups catalog items by material, each list sorted by label.
#[must_use]
pub fn group_trash_items(items: &[CatalogItem]) -> TrashItems {
    let mut grouped = TrashItems::new();
    for item in items {
        grouped
            .entry(item.material.clone())
            .or_default()
            .push(item_label(item));
    }
    for labels in grouped.values_mut() {
        labels.sort();
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(item_id: i64, material: &str, category: &str, item_name: &str) -> CatalogItem {
        CatalogItem {
            item_id,
            material: material.to_string(),
            category: category.to_string(),
            item_name: item_name.to_string(),
        }
    }

    #[test]
    fn groups_by_material_with_sorted_labels() {
        let items = vec![
            item(14, "Metal", "Beverage", "Can"),
            item(3, "Plastic", "Food", "Wrapper"),
            item(1, "Plastic", "Beverage", "Bottle"),
            item(22, "Plastic", "Beverage", "Bottle Cap"),
        ];

        let grouped = group_trash_items(&items);
        assert_eq!(grouped.keys().collect::<Vec<_>>(), ["Metal", "Plastic"]);
        assert_eq!(grouped["Metal"], ["Beverage, Can[14]"]);
        assert_eq!(
            grouped["Plastic"],
            [
                "Beverage, Bottle Cap[22]",
                "Beverage, Bottle[1]",
                "Food, Wrapper[3]"
            ]
        );
    }

    #[test]
    fn empty_catalog_groups_to_nothing() {
        assert!(group_trash_items(&[]).is_empty());
    }
}
