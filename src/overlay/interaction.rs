use super::item::OverlayItem;
use super::style::ItemState;

/// Selection and hover state owned by the overlay renderer.
///
/// At most one of `selected_item_id` and `selected_group_id` is set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InteractionState {
    selected_item_id: Option<String>,
    hovered_item_id: Option<String>,
    selected_group_id: Option<String>,
}

impl InteractionState {
    pub fn selected_item_id(&self) -> Option<&str> {
        self.selected_item_id.as_deref()
    }

    pub fn hovered_item_id(&self) -> Option<&str> {
        self.hovered_item_id.as_deref()
    }

    pub fn selected_group_id(&self) -> Option<&str> {
        self.selected_group_id.as_deref()
    }

    /// Toggles group selection and clears item selection.
    ///
    /// Returns true when the group ends up selected.
    pub fn toggle_group(&mut self, group_id: &str) -> bool {
        self.selected_item_id = None;
        if self.selected_group_id.as_deref() == Some(group_id) {
            self.selected_group_id = None;
            false
        } else {
            self.selected_group_id = Some(group_id.to_string());
            true
        }
    }

    /// Toggles item selection and clears group selection.
    ///
    /// Returns true when the item ends up selected.
    pub fn toggle_item(&mut self, item_id: &str) -> bool {
        self.selected_group_id = None;
        if self.selected_item_id.as_deref() == Some(item_id) {
            self.selected_item_id = None;
            false
        } else {
            self.selected_item_id = Some(item_id.to_string());
            true
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected_item_id = None;
        self.selected_group_id = None;
    }

    /// Updates the hovered item; returns whether it changed.
    pub fn set_hovered(&mut self, item_id: Option<&str>) -> bool {
        if self.hovered_item_id.as_deref() == item_id {
            return false;
        }
        self.hovered_item_id = item_id.map(str::to_string);
        true
    }

    /// Styling rule for an item: selected (itself or its group), then hovered.
    pub fn item_state(&self, item: &OverlayItem) -> ItemState {
        let group_selected = item.group().is_some() && item.group() == self.selected_group_id();
        if self.selected_item_id.as_deref() == Some(item.id.as_str()) || group_selected {
            ItemState::Selected
        } else if self.hovered_item_id.as_deref() == Some(item.id.as_str()) {
            ItemState::Hovered
        } else {
            ItemState::Normal
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::item::Coordinates;

    fn exclusive(state: &InteractionState) -> bool {
        state.selected_item_id().is_none() || state.selected_group_id().is_none()
    }

    #[test]
    fn group_toggle_sequence() {
        let mut state = InteractionState::default();
        assert!(state.toggle_group("g1"));
        assert_eq!(state.selected_group_id(), Some("g1"));
        assert!(!state.toggle_group("g1"));
        assert_eq!(state.selected_group_id(), None);
        assert!(state.toggle_group("g2"));
        assert_eq!(state.selected_group_id(), Some("g2"));
    }

    #[test]
    fn item_and_group_selection_are_exclusive() {
        let mut state = InteractionState::default();
        let steps: [(&str, bool); 6] = [
            ("a", false),
            ("g1", true),
            ("b", false),
            ("b", false),
            ("g1", true),
            ("g1", true),
        ];
        for (id, group) in steps {
            if group {
                state.toggle_group(id);
            } else {
                state.toggle_item(id);
            }
            assert!(exclusive(&state));
        }
    }

    #[test]
    fn hover_change_is_reported_once() {
        let mut state = InteractionState::default();
        assert!(state.set_hovered(Some("a")));
        assert!(!state.set_hovered(Some("a")));
        assert!(state.set_hovered(None));
        assert!(!state.set_hovered(None));
    }

    #[test]
    fn selected_group_styles_every_member() {
        let mut state = InteractionState::default();
        let member = OverlayItem::new("a", "A", Coordinates::default()).with_group("g1");
        let other = OverlayItem::new("b", "B", Coordinates::default());
        state.toggle_group("g1");
        state.set_hovered(Some("a"));
        assert_eq!(state.item_state(&member), ItemState::Selected);
        assert_eq!(state.item_state(&other), ItemState::Normal);
        state.set_hovered(Some("b"));
        assert_eq!(state.item_state(&other), ItemState::Hovered);
    }

    #[test]
    fn empty_group_id_is_not_a_group() {
        let mut state = InteractionState::default();
        let a = OverlayItem::new("a", "A", Coordinates::default()).with_group("");
        let b = OverlayItem::new("b", "B", Coordinates::default()).with_group("");
        state.toggle_group("");
        assert_eq!(state.item_state(&a), ItemState::Normal);
        state.toggle_item("a");
        assert_eq!(state.item_state(&a), ItemState::Selected);
        assert_eq!(state.item_state(&b), ItemState::Normal);
    }
}
