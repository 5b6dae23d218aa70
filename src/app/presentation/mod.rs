//! Presentation strategies: how the open documents are laid out.
//!
//! Every strategy owns its visual slots and nothing else. A slot refers to
//! its document by [`DocumentId`]; the controller owns the documents.
//! Selection changes made by a strategy are queued and picked up by the
//! controller through [`DocumentPresentation::take_selection_change`].

mod desktop;
mod split;
mod tabbed;

use serde::{Deserialize, Serialize};

pub use desktop::{Bounds, MultiWindowDesktop, WindowArrangement};
pub use split::SplitListCard;
pub use tabbed::TabbedStrip;

use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::collaborators::IconHandle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ViewStyle {
    #[default]
    Tabbed,
    Split,
    Desktop,
}

/// Where the selection area (tab strip or document list) sits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Placement {
    #[default]
    Top,
    Left,
    Bottom,
    Right,
}

impl Placement {
    /// Map the numeric placement constants used by the options dialog.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Top),
            2 => Some(Self::Left),
            3 => Some(Self::Bottom),
            4 => Some(Self::Right),
            _ => None,
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::Top => 1,
            Self::Left => 2,
            Self::Bottom => 3,
            Self::Right => 4,
        }
    }
}

/// What a slot renders: a reference to the document, its icon and tooltip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotContent {
    pub document: DocumentId,
    pub icon: IconHandle,
}

pub trait DocumentPresentation {
    fn view_style(&self) -> ViewStyle;

    /// Append a slot and return its index. `path` becomes the tooltip.
    fn add_slot(&mut self, display_name: &str, content: SlotContent, path: &str) -> usize;

    /// Remove a slot. Any resulting selection change is not queued;
    /// the caller reads [`selected_index`](Self::selected_index) afterwards.
    fn remove_slot(&mut self, index: usize);

    fn slot_count(&self) -> usize;

    fn selected_index(&self) -> Option<usize>;

    /// Select a slot and move input focus to its document. Out-of-range
    /// indices are ignored.
    fn set_selected_index(&mut self, index: usize);

    fn display_name_at(&self, index: usize) -> Option<&str>;

    fn set_display_name_at(&mut self, index: usize, name: &str);

    fn content_at(&self, index: usize) -> Option<&SlotContent>;

    fn tooltip_at(&self, index: usize) -> Option<&str>;

    /// Refresh a slot's icon and tooltip after its document moved.
    fn update_slot(&mut self, index: usize, icon: IconHandle, path: &str);

    fn selection_placement(&self) -> Placement;

    fn set_selection_placement(&mut self, placement: Placement);

    /// Document that currently holds input focus.
    fn focus_owner(&self) -> Option<DocumentId>;

    /// Selection change reported by the container since the last call.
    fn take_selection_change(&mut self) -> Option<usize>;

    /// Window arrangement is only offered by the desktop.
    fn as_desktop_mut(&mut self) -> Option<&mut MultiWindowDesktop> {
        None
    }

    fn index_of(&self, document: DocumentId) -> Option<usize> {
        (0..self.slot_count()).find(|&i| {
            self.content_at(i)
                .is_some_and(|content| content.document == document)
        })
    }
}

/// Build an empty strategy of the given style.
pub fn create(style: ViewStyle, placement: Placement) -> Box<dyn DocumentPresentation> {
    let mut presentation: Box<dyn DocumentPresentation> = match style {
        ViewStyle::Tabbed => Box::new(TabbedStrip::new()),
        ViewStyle::Split => Box::new(SplitListCard::new()),
        ViewStyle::Desktop => Box::new(MultiWindowDesktop::new()),
    };
    presentation.set_selection_placement(placement);
    presentation
}
