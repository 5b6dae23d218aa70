use super::{DocumentPresentation, Placement, SlotContent, ViewStyle};
use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::collaborators::IconHandle;

struct ListRow {
    name: String,
    content: SlotContent,
    tooltip: String,
}

/// Documents as a side list plus a stack of cards, one card shown at a time.
///
/// Removing a slot rebuilds the card stack from the surviving rows, so card
/// `i` always belongs to row `i`.
pub struct SplitListCard {
    rows: Vec<ListRow>,
    cards: Vec<DocumentId>,
    selected: Option<usize>,
    placement: Placement,
    pending_change: Option<usize>,
}

impl Default for SplitListCard {
    fn default() -> Self {
        Self::new()
    }
}

impl SplitListCard {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            cards: Vec::new(),
            selected: None,
            placement: Placement::Left,
            pending_change: None,
        }
    }

    /// Document on the visible card.
    pub fn visible_card(&self) -> Option<DocumentId> {
        self.selected.and_then(|i| self.cards.get(i).copied())
    }

    pub fn list_names(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.name.as_str()).collect()
    }

    fn rebuild_cards(&mut self) {
        self.cards = self.rows.iter().map(|r| r.content.document).collect();
    }
}

impl DocumentPresentation for SplitListCard {
    fn view_style(&self) -> ViewStyle {
        ViewStyle::Split
    }

    fn add_slot(&mut self, display_name: &str, content: SlotContent, path: &str) -> usize {
        self.cards.push(content.document);
        self.rows.push(ListRow {
            name: display_name.to_string(),
            content,
            tooltip: path.to_string(),
        });
        self.rows.len() - 1
    }

    fn remove_slot(&mut self, index: usize) {
        if index >= self.rows.len() {
            return;
        }
        self.rows.remove(index);
        self.rebuild_cards();

        self.selected = match self.selected {
            _ if self.rows.is_empty() => None,
            Some(sel) if sel > index => Some(sel - 1),
            Some(sel) if sel == index => Some(index.min(self.rows.len() - 1)),
            other => other,
        };
    }

    fn slot_count(&self) -> usize {
        self.rows.len()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        if index >= self.rows.len() || self.selected == Some(index) {
            return;
        }
        self.selected = Some(index);
        self.pending_change = Some(index);
    }

    fn display_name_at(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|r| r.name.as_str())
    }

    fn set_display_name_at(&mut self, index: usize, name: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.name = name.to_string();
        }
    }

    fn content_at(&self, index: usize) -> Option<&SlotContent> {
        self.rows.get(index).map(|r| &r.content)
    }

    fn tooltip_at(&self, index: usize) -> Option<&str> {
        self.rows.get(index).map(|r| r.tooltip.as_str())
    }

    fn update_slot(&mut self, index: usize, icon: IconHandle, path: &str) {
        if let Some(row) = self.rows.get_mut(index) {
            row.content.icon = icon;
            row.tooltip = path.to_string();
        }
    }

    fn selection_placement(&self) -> Placement {
        self.placement
    }

    fn set_selection_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    fn focus_owner(&self) -> Option<DocumentId> {
        self.visible_card()
    }

    fn take_selection_change(&mut self) -> Option<usize> {
        self.pending_change.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn content(id: u64) -> SlotContent {
        SlotContent {
            document: DocumentId(id),
            icon: IconHandle("text".into()),
        }
    }

    #[test]
    fn test_cards_follow_rows_after_removal() {
        let mut s = SplitListCard::new();
        for id in 1..=4 {
            s.add_slot(&format!("d{}", id), content(id), "");
        }
        s.set_selected_index(3);
        s.remove_slot(1);

        assert_eq!(s.list_names(), vec!["d1", "d3", "d4"]);
        assert_eq!(s.selected_index(), Some(2));
        assert_eq!(s.visible_card(), Some(DocumentId(4)));
        for i in 0..s.slot_count() {
            assert_eq!(s.cards[i], s.content_at(i).unwrap().document);
        }
    }

    #[test]
    fn test_no_selection_until_asked() {
        let mut s = SplitListCard::new();
        s.add_slot("a", content(1), "");
        assert_eq!(s.selected_index(), None);
        assert_eq!(s.visible_card(), None);
        s.set_selected_index(0);
        assert_eq!(s.take_selection_change(), Some(0));
        assert_eq!(s.focus_owner(), Some(DocumentId(1)));
    }

    #[test]
    fn test_removing_visible_card_shows_neighbor() {
        let mut s = SplitListCard::new();
        s.add_slot("a", content(1), "");
        s.add_slot("b", content(2), "");
        s.set_selected_index(1);
        s.take_selection_change();
        s.remove_slot(1);
        assert_eq!(s.visible_card(), Some(DocumentId(1)));
        assert_eq!(s.take_selection_change(), None);
    }

    #[test]
    fn test_list_defaults_to_left() {
        assert_eq!(SplitListCard::new().selection_placement(), Placement::Left);
    }
}
