use super::document::DocumentId;

/// Notifications fired by the document controller, one per logical change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    CurrentChanged(DocumentId),
    Added(DocumentId),
    Removed(DocumentId),
    DirtyChanged { id: DocumentId, dirty: bool },
    PathChanged(DocumentId),
    StyleChanged { id: DocumentId, style: String },
}

impl DocumentEvent {
    pub fn document(&self) -> DocumentId {
        match self {
            Self::CurrentChanged(id)
            | Self::Added(id)
            | Self::Removed(id)
            | Self::PathChanged(id) => *id,
            Self::DirtyChanged { id, .. } | Self::StyleChanged { id, .. } => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type Observer = Box<dyn FnMut(&DocumentEvent)>;

/// Explicitly registered listeners for [`DocumentEvent`]s.
#[derive(Default)]
pub struct Observers {
    entries: Vec<(ObserverId, Observer)>,
    next_id: u64,
}

impl Observers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&DocumentEvent) + 'static,
    {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, Box::new(observer)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry_id, _)| *entry_id != id);
        self.entries.len() != before
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn emit(&mut self, event: &DocumentEvent) {
        for (_, observer) in &mut self.entries {
            observer(event);
        }
    }
}
