use super::{DocumentPresentation, Placement, SlotContent, ViewStyle};
use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::collaborators::IconHandle;

struct Tab {
    title: String,
    content: SlotContent,
    tooltip: String,
}

/// Documents as a strip of tabs.
///
/// The strip behaves like a native tab container: it moves the selection
/// by itself when the selected tab goes away, and reports every selection
/// change. Changes caused by closing a tab are swallowed so the controller
/// sees them once, through its own close flow.
pub struct TabbedStrip {
    tabs: Vec<Tab>,
    selected: Option<usize>,
    placement: Placement,
    focused: Option<DocumentId>,
    pending_change: Option<usize>,
    closing: bool,
}

impl Default for TabbedStrip {
    fn default() -> Self {
        Self::new()
    }
}

impl TabbedStrip {
    pub fn new() -> Self {
        Self {
            tabs: Vec::new(),
            selected: None,
            placement: Placement::Top,
            focused: None,
            pending_change: None,
            closing: false,
        }
    }

    /// Tab titles in order, as the strip would draw them.
    pub fn titles(&self) -> Vec<&str> {
        self.tabs.iter().map(|t| t.title.as_str()).collect()
    }

    /// The container's "active tab changed" notification.
    fn on_active_tab_changed(&mut self) {
        self.focused = self
            .selected
            .and_then(|i| self.tabs.get(i))
            .map(|t| t.content.document);
        if self.closing {
            return;
        }
        self.pending_change = self.selected;
    }

    fn select(&mut self, index: Option<usize>) {
        if self.selected != index {
            self.selected = index;
            self.on_active_tab_changed();
        }
    }
}

impl DocumentPresentation for TabbedStrip {
    fn view_style(&self) -> ViewStyle {
        ViewStyle::Tabbed
    }

    fn add_slot(&mut self, display_name: &str, content: SlotContent, path: &str) -> usize {
        self.tabs.push(Tab {
            title: display_name.to_string(),
            content,
            tooltip: path.to_string(),
        });
        let index = self.tabs.len() - 1;
        // The first tab of an empty strip becomes selected on its own.
        if self.selected.is_none() {
            self.select(Some(index));
        }
        index
    }

    fn remove_slot(&mut self, index: usize) {
        if index >= self.tabs.len() {
            return;
        }
        self.closing = true;
        self.tabs.remove(index);

        let next = match self.selected {
            _ if self.tabs.is_empty() => None,
            Some(sel) if sel > index => Some(sel - 1),
            Some(sel) if sel == index => Some(index.min(self.tabs.len() - 1)),
            other => other,
        };
        if next != self.selected || self.selected == Some(index) {
            self.selected = next;
            self.on_active_tab_changed();
        }
        self.closing = false;
    }

    fn slot_count(&self) -> usize {
        self.tabs.len()
    }

    fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    fn set_selected_index(&mut self, index: usize) {
        if index < self.tabs.len() {
            self.select(Some(index));
        }
    }

    fn display_name_at(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|t| t.title.as_str())
    }

    fn set_display_name_at(&mut self, index: usize, name: &str) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.title = name.to_string();
        }
    }

    fn content_at(&self, index: usize) -> Option<&SlotContent> {
        self.tabs.get(index).map(|t| &t.content)
    }

    fn tooltip_at(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(|t| t.tooltip.as_str())
    }

    fn update_slot(&mut self, index: usize, icon: IconHandle, path: &str) {
        if let Some(tab) = self.tabs.get_mut(index) {
            tab.content.icon = icon;
            tab.tooltip = path.to_string();
        }
    }

    fn selection_placement(&self) -> Placement {
        self.placement
    }

    fn set_selection_placement(&mut self, placement: Placement) {
        self.placement = placement;
    }

    fn focus_owner(&self) -> Option<DocumentId> {
        self.focused
    }

    fn take_selection_change(&mut self) -> Option<usize> {
        self.pending_change.take()
    }
}
