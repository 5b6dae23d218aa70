use super::{DocumentPresentation, Placement, SlotContent, ViewStyle};
use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::collaborators::IconHandle;

const CASCADE_STEP: i32 = 25;
const CASCADE_WRAP: usize = 10;
const MIN_FRAME_WIDTH: i32 = 200;
const MIN_FRAME_HEIGHT: i32 = 150;

/// Window layouts offered by the desktop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowArrangement {
    Cascade,
    TileHorizontal,
    TileVertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

struct InternalFrame {
    title: String,
    content: SlotContent,
    tooltip: String,
    bounds: Bounds,
}

/// Documents as floating sub-windows on a desktop.
///
/// Selection is whichever frame holds activation focus. Arranging windows
/// only moves frames; it never touches the documents.
pub struct MultiWindowDesktop {
    frames: Vec<InternalFrame>,
    /// Activation order, most recently activated last.
    activation: Vec<DocumentId>,
    width: i32,
    height: i32,
    pending_change: Option<usize>,
}

impl Default for MultiWindowDesktop {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiWindowDesktop {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            activation: Vec::new(),
            width: 1024,
            height: 768,
            pending_change: None,
        }
    }

    pub fn resize_desktop(&mut self, width: i32, height: i32) {
        self.width = width.max(1);
        self.height = height.max(1);
    }

    pub fn arrange(&mut self, arrangement: WindowArrangement) {
        match arrangement {
            WindowArrangement::Cascade => self.cascade(),
            WindowArrangement::TileHorizontal => self.tile_horizontal(),
            WindowArrangement::TileVertical => self.tile_vertical(),
        }
    }

    pub fn bounds_at(&self, index: usize) -> Option<Bounds> {
        self.frames.get(index).map(|f| f.bounds)
    }

    /// Stack every frame diagonally, the active one in front.
    pub fn cascade(&mut self) {
        let order = self.stacking_order();
        for (step, index) in order.into_iter().enumerate() {
            self.frames[index].bounds = self.cascade_bounds(step);
        }
    }

    /// Full-width frames stacked top to bottom.
    pub fn tile_horizontal(&mut self) {
        let n = self.frames.len() as i32;
        if n == 0 {
            return;
        }
        let band = self.height / n;
        let (width, height) = (self.width, self.height);
        for (i, frame) in self.frames.iter_mut().enumerate() {
            let i = i as i32;
            let bottom = if i == n - 1 { height } else { (i + 1) * band };
            frame.bounds = Bounds {
                x: 0,
                y: i * band,
                width,
                height: bottom - i * band,
            };
        }
    }

    /// Full-height frames side by side.
    pub fn tile_vertical(&mut self) {
        let n = self.frames.len() as i32;
        if n == 0 {
            return;
        }
        let column = self.width / n;
        let (width, height) = (self.width, self.height);
        for (i, frame) in self.frames.iter_mut().enumerate() {
            let i = i as i32;
            let right = if i == n - 1 { width } else { (i + 1) * column };
            frame.bounds = Bounds {
                x: i * column,
                y: 0,
                width: right - i * column,
                height,
            };
        }
    }

    /// Frame indices from back to front.
    fn stacking_order(&self) -> Vec<usize> {
        self.activation
            .iter()
            .filter_map(|doc| self.frames.iter().position(|f| f.content.document == *doc))
            .collect()
    }

    fn cascade_bounds(&self, step: usize) -> Bounds {
        let offset = (step % CASCADE_WRAP) as i32 * CASCADE_STEP;
        Bounds {
            x: offset,
            y: offset,
            width: (self.width * 2 / 3).max(MIN_FRAME_WIDTH),
            height: (self.height * 2 / 3).max(MIN_FRAME_HEIGHT),
        }
    }

    fn activate(&mut self, index: usize) {
        let doc = self.frames[index].content.document;
        self.activation.retain(|d| *d != doc);
        self.activation.push(doc);
    }
}

impl DocumentPresentation for MultiWindowDesktop {
    fn view_style(&self) -> ViewStyle {
        ViewStyle::Desktop
    }

    fn add_slot(&mut self, display_name: &str, content: SlotContent, path: &str) -> usize {
        let bounds = self.cascade_bounds(self.frames.len());
        self.frames.push(InternalFrame {
            title: display_name.to_string(),
            content,
            tooltip: path.to_string(),
            bounds,
        });
        let index = self.frames.len() - 1;
        // A newly shown frame takes activation.
        self.activate(index);
        self.pending_change = Some(index);
        index
    }

    fn remove_slot(&mut self, index: usize) {
        if index >= self.frames.len() {
            return;
        }
        let frame = self.frames.remove(index);
        self.activation.retain(|d| *d != frame.content.document);
        self.pending_change = None;
    }

    fn slot_count(&self) -> usize {
        self.frames.len()
    }

    fn selected_index(&self) -> Option<usize> {
        let active = self.activation.last()?;
        self.frames.iter().position(|f| f.content.document == *active)
    }

    fn set_selected_index(&mut self, index: usize) {
        if index >= self.frames.len() || self.selected_index() == Some(index) {
            return;
        }
        self.activate(index);
        self.pending_change = Some(index);
    }

    fn display_name_at(&self, index: usize) -> Option<&str> {
        self.frames.get(index).map(|f| f.title.as_str())
    }

    fn set_display_name_at(&mut self, index: usize, name: &str) {
        if let Some(frame) = self.frames.get_mut(index) {
            frame.title = name.to_string();
        }
    }

    fn content_at(&self, index: usize) -> Option<&SlotContent> {
        self.frames.get(index).map(|f| &f.content)
    }

    fn tooltip_at(&self, index: usize) -> Option<&str> {
        self.frames.get(index).map(|f| f.tooltip.as_str())
    }

    fn update_slot(&mut self, index: usize, icon: IconHandle, path: &str) {
        if let Some(frame) = self.frames.get_mut(index) {
            frame.content.icon = icon;
            frame.tooltip = path.to_string();
        }
    }

    fn selection_placement(&self) -> Placement {
        Placement::Top
    }

    /// Sub-windows have no selection strip to place.
    fn set_selection_placement(&mut self, _placement: Placement) {}

    fn focus_owner(&self) -> Option<DocumentId> {
        self.activation.last().copied()
    }

    fn take_selection_change(&mut self) -> Option<usize> {
        self.pending_change.take()
    }

    fn as_desktop_mut(&mut self) -> Option<&mut MultiWindowDesktop> {
        Some(self)
    }
}
