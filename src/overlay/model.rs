//! Pure item-list operations: page filtering, grouping and group colours.

use super::item::OverlayItem;
use std::collections::HashMap;

/// Fixed palette for the first groups, in assignment order.
pub const GROUP_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FECA57", "#FF9FF3", "#54A0FF", "#5F27CD",
    "#00D2D3", "#FF9F43",
];

/// Degrees between successive synthesized hues.
const GOLDEN_ANGLE: f64 = 137.508;

/// Items on `page`, plus every item without a page.
pub fn filter_by_page(items: &[OverlayItem], page: u32) -> Vec<OverlayItem> {
    items
        .iter()
        .filter(|item| item.page.is_none_or(|p| p == page))
        .cloned()
        .collect()
}

/// Members of one group, in input order.
pub fn group_items(items: &[OverlayItem], group_id: &str) -> Vec<OverlayItem> {
    items
        .iter()
        .filter(|item| item.group_id.as_deref() == Some(group_id))
        .cloned()
        .collect()
}

/// Distinct non-empty group ids in first-seen order.
pub fn group_ids(items: &[OverlayItem]) -> Vec<&str> {
    let mut seen = Vec::new();
    for id in items.iter().filter_map(OverlayItem::group) {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

/// Colours for `count` groups: the palette, then golden-angle HSL hues.
pub fn generate_group_colors(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match GROUP_PALETTE.get(i) {
            Some(color) => (*color).to_string(),
            None => {
                let hue = (i as f64 * GOLDEN_ANGLE) % 360.0;
                format!("hsl({hue}, 70%, 60%)")
            }
        })
        .collect()
}

/// Recolours grouped items by group; ungrouped items keep their colour.
///
/// Deterministic for a given ordering and idempotent.
pub fn assign_group_colors(items: &[OverlayItem]) -> Vec<OverlayItem> {
    let ids = group_ids(items);
    let colors = generate_group_colors(ids.len());
    let by_group: HashMap<&str, &String> = ids.into_iter().zip(colors.iter()).collect();

    items
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if let Some(color) = item.group().and_then(|id| by_group.get(id)) {
                item.color = Some((*color).clone());
            }
            item
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::item::Coordinates;

    fn item(id: &str) -> OverlayItem {
        OverlayItem::new(id, id, Coordinates::new(0.0, 0.0, 10.0, 10.0))
    }

    #[test]
    fn page_filter_keeps_unpaged_items() {
        let items = vec![
            item("a").on_page(1),
            item("b").on_page(2),
            item("c"),
            item("d").on_page(2),
        ];

        for page in 0..4 {
            let ids: Vec<_> = filter_by_page(&items, page)
                .into_iter()
                .map(|item| item.id)
                .collect();
            let expected: Vec<_> = items
                .iter()
                .filter(|item| item.page.is_none() || item.page == Some(page))
                .map(|item| item.id.clone())
                .collect();
            assert_eq!(ids, expected);
        }
        assert_eq!(filter_by_page(&items, 2).len(), 3);
    }

    #[test]
    fn group_members_are_matched_exactly() {
        let items = vec![
            item("a").with_group("g1"),
            item("b").with_group("g2"),
            item("c").with_group("g1"),
            item("d"),
        ];
        let members: Vec<_> = group_items(&items, "g1").into_iter().map(|i| i.id).collect();
        assert_eq!(members, vec!["a", "c"]);
        assert!(group_items(&items, "g3").is_empty());
    }

    #[test]
    fn palette_then_golden_angle() {
        let colors = generate_group_colors(12);
        assert_eq!(colors[0], "#FF6B6B");
        assert_eq!(colors[9], "#FF9F43");
        let hue = (10.0 * GOLDEN_ANGLE) % 360.0;
        assert_eq!(colors[10], format!("hsl({hue}, 70%, 60%)"));
        assert_ne!(colors[10], colors[11]);
        assert!(generate_group_colors(0).is_empty());
    }

    #[test]
    fn colours_follow_first_seen_group_order() {
        let items = vec![
            item("a").with_group("g2"),
            item("b").with_group("g1"),
            item("c").with_group("g2"),
            item("d").with_color("#123456"),
            item("e").with_group(""),
        ];
        let colored = assign_group_colors(&items);
        assert_eq!(colored[0].color.as_deref(), Some("#FF6B6B"));
        assert_eq!(colored[1].color.as_deref(), Some("#4ECDC4"));
        assert_eq!(colored[2].color.as_deref(), Some("#FF6B6B"));
        assert_eq!(colored[3].color.as_deref(), Some("#123456"));
        assert_eq!(colored[4].color, None);
    }

    #[test]
    fn colouring_is_idempotent() {
        let items: Vec<_> = (0..15)
            .map(|i| item(&format!("i{i}")).with_group(format!("g{}", i % 13)))
            .collect();
        let once = assign_group_colors(&items);
        let twice = assign_group_colors(&once);
        assert_eq!(once, twice);
    }
}
