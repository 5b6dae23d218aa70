//! The multi-document controller.
//!
//! Owns every open [`Document`] and the "current document" pointer, runs the
//! open/close/save flows, and keeps the active presentation strategy in step.
//! Documents are kept in slot order: `documents[i]` is always rendered by
//! slot `i` of the presentation.

mod closing;
mod external;
mod opening;
mod restore;
mod saving;

#[cfg(test)]
mod test_support;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::app::domain::document::{Document, DocumentId};
use crate::app::domain::events::{DocumentEvent, ObserverId, Observers};
use crate::app::domain::settings::AppSettings;
use crate::app::infrastructure::collaborators::Collaborators;
use crate::app::infrastructure::error::AppError;
use crate::app::infrastructure::platform::file_system_is_case_sensitive;
use crate::app::presentation::{
    self, DocumentPresentation, Placement, SlotContent, ViewStyle, WindowArrangement,
};
use crate::app::services::display_names::{NameEntry, renumber};
use crate::app::services::file_io::TextFallbacks;
use crate::app::services::syntax::SyntaxStyleResolver;
use crate::app::services::watcher::{ModificationWatcher, WatchEntry};

pub const APP_NAME: &str = "DeskPad";

pub struct MultiDocumentController {
    documents: Vec<Document>,
    current: Option<DocumentId>,
    next_id: u64,
    presentation: Box<dyn DocumentPresentation>,
    resolver: SyntaxStyleResolver,
    settings: AppSettings,
    collaborators: Collaborators,
    observers: Observers,
    /// Snapshot of open local files read by the watcher thread.
    watch_list: Arc<RwLock<Vec<WatchEntry>>>,
    watcher: Option<ModificationWatcher>,
}

impl MultiDocumentController {
    /// Create a controller holding one empty untitled document. The
    /// modification watcher starts right away when enabled in `settings`.
    pub fn new(settings: AppSettings, collaborators: Collaborators) -> Self {
        let resolver = SyntaxStyleResolver::new(settings.syntax_filter_set());
        let presentation = presentation::create(settings.view_style, settings.selection_placement);
        let mut controller = Self {
            documents: Vec::new(),
            current: None,
            next_id: 1,
            presentation,
            resolver,
            settings,
            collaborators,
            observers: Observers::new(),
            watch_list: Arc::new(RwLock::new(Vec::new())),
            watcher: None,
        };
        controller.add_new_empty_document();
        controller.start_watcher();
        controller
    }

    // --- Queries ---

    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Documents in presentation order.
    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    pub fn document(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn document_at(&self, index: usize) -> Option<&Document> {
        self.documents.get(index)
    }

    pub fn current_id(&self) -> Option<DocumentId> {
        self.current
    }

    pub fn current_document(&self) -> Option<&Document> {
        self.document(self.current?)
    }

    pub fn current_index(&self) -> Option<usize> {
        self.index_of(self.current?)
    }

    pub fn index_of(&self, id: DocumentId) -> Option<usize> {
        self.documents.iter().position(|d| d.id == id)
    }

    /// Index of the first document backed by `path`.
    pub fn find_by_path(&self, path: &Path) -> Option<usize> {
        let case_sensitive = file_system_is_case_sensitive();
        self.documents.iter().position(|d| {
            d.is_local_file() && same_path(d.path(), path, case_sensitive)
        })
    }

    pub fn presentation(&self) -> &dyn DocumentPresentation {
        self.presentation.as_ref()
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    pub fn resolver(&self) -> &SyntaxStyleResolver {
        &self.resolver
    }

    /// Window title for the current document, e.g. `notes.txt* - DeskPad`.
    pub fn title(&self) -> String {
        match self.current_document() {
            Some(doc) => format!("{} - {}", doc.display_name, APP_NAME),
            None => APP_NAME.to_string(),
        }
    }

    // --- Observers ---

    pub fn subscribe<F>(&mut self, observer: F) -> ObserverId
    where
        F: FnMut(&DocumentEvent) + 'static,
    {
        self.observers.subscribe(observer)
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.unsubscribe(id)
    }

    // --- Selection ---

    /// Make the document at `index` current. Out-of-range indices are ignored.
    pub fn set_current_index(&mut self, index: usize) {
        if index >= self.documents.len() {
            tracing::debug!("Ignoring selection of missing slot {}", index);
            return;
        }
        self.select_index(index);
    }

    pub fn set_current_document(&mut self, id: DocumentId) {
        if let Some(index) = self.index_of(id) {
            self.select_index(index);
        }
    }

    pub fn select_next_document(&mut self) {
        let count = self.documents.len();
        if let Some(index) = self.current_index() {
            self.select_index((index + 1) % count);
        }
    }

    pub fn select_previous_document(&mut self) {
        let count = self.documents.len();
        if let Some(index) = self.current_index() {
            self.select_index((index + count - 1) % count);
        }
    }

    /// Pick up a selection change the presentation made on its own,
    /// e.g. the user clicking a tab.
    pub fn handle_selection_change(&mut self) {
        if self.presentation.take_selection_change().is_some() {
            self.sync_selection();
        }
    }

    /// The container's own selection event: a tab click, a list row pick
    /// or a sub-window gaining activation.
    pub fn on_slot_activated(&mut self, index: usize) {
        self.presentation.set_selected_index(index);
        self.handle_selection_change();
    }

    pub(super) fn select_index(&mut self, index: usize) {
        self.presentation.set_selected_index(index);
        self.sync_selection();
    }

    /// Point `current` at whatever the presentation has selected.
    fn sync_selection(&mut self) {
        let _ = self.presentation.take_selection_change();
        let index = match self.presentation.selected_index() {
            Some(index) => index,
            None if !self.documents.is_empty() => {
                self.presentation.set_selected_index(0);
                let _ = self.presentation.take_selection_change();
                0
            }
            None => {
                self.current = None;
                return;
            }
        };
        if let Some(id) = self.documents.get(index).map(|d| d.id) {
            self.set_current_pointer(id);
        }
    }

    fn set_current_pointer(&mut self, id: DocumentId) {
        if self.current != Some(id) {
            self.current = Some(id);
            self.emit(DocumentEvent::CurrentChanged(id));
        }
    }

    // --- Editing callbacks ---

    /// Replace a document's text, as the editing widget would after an edit.
    pub fn replace_text(&mut self, id: DocumentId, text: &str) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        if self.documents[index].read_only {
            let err = AppError::ReadOnly(self.documents[index].path().to_path_buf());
            self.report(&err);
            return false;
        }
        if self.documents[index].set_text(text) {
            self.dirty_changed(id, true);
        }
        true
    }

    /// The widget's dirty-changed notification.
    pub fn mark_dirty(&mut self, id: DocumentId) {
        if let Some(index) = self.index_of(id)
            && self.documents[index].mark_dirty()
        {
            self.dirty_changed(id, true);
        }
    }

    /// Move the caret of the current document to a one-based line.
    pub fn goto_line(&mut self, line: usize) -> bool {
        let Some(index) = self.current_index() else {
            return false;
        };
        match self.documents[index].goto_line(line) {
            Ok(()) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    pub(super) fn dirty_changed(&mut self, id: DocumentId, dirty: bool) {
        self.emit(DocumentEvent::DirtyChanged { id, dirty });
        self.renumber_display_names();
    }

    // --- Styles ---

    /// Override the syntax style of one document.
    pub fn set_document_style(&mut self, id: DocumentId, style: &str) {
        if let Some(index) = self.index_of(id) {
            self.apply_style(index, style.to_string());
        }
    }

    /// Replace the live syntax filters from their serialized form and
    /// re-style every open document. Invalid input changes nothing.
    pub fn apply_syntax_filters(&mut self, serialized: &str) -> bool {
        if let Err(e) = self.resolver.apply_filter_string(serialized) {
            self.report(&e);
            return false;
        }
        self.settings.syntax_filters = serialized.to_string();
        self.restyle_all();
        true
    }

    pub fn restore_default_syntax_filters(&mut self) {
        self.resolver.set_filters(Default::default());
        self.settings.syntax_filters.clear();
        self.restyle_all();
    }

    pub(super) fn resolve_style(&self, doc: &Document) -> String {
        self.resolver.resolve(
            &doc.file_name(),
            Some(doc.first_line()),
            self.settings.ignore_backup_extensions,
            self.settings.guess_content_type,
        )
    }

    /// Re-resolve the style of the document at `index` from its name and content.
    pub(super) fn restyle(&mut self, index: usize) {
        if self.documents[index].is_untitled() {
            return;
        }
        let style = self.resolve_style(&self.documents[index]);
        self.apply_style(index, style);
    }

    fn restyle_all(&mut self) {
        for index in 0..self.documents.len() {
            self.restyle(index);
        }
    }

    fn apply_style(&mut self, index: usize, style: String) {
        if self.documents[index].style == style {
            return;
        }
        let doc = &mut self.documents[index];
        self.collaborators.parsers.detach_parser(doc);
        doc.style = style.clone();
        self.collaborators.parsers.attach_parser(doc);
        let id = doc.id;
        tracing::debug!("Style of {} is now {}", doc.display_name, style);
        self.emit(DocumentEvent::StyleChanged { id, style });
    }

    // --- Presentation ---

    /// Move every slot into a new strategy of `style`, keeping the current
    /// document current. No file is closed or re-read.
    pub fn set_view_style(&mut self, style: ViewStyle) {
        if self.presentation.view_style() == style {
            return;
        }
        let placement = self.settings.selection_placement;
        let mut next = presentation::create(style, placement);
        for doc in &self.documents {
            let content = SlotContent {
                document: doc.id,
                icon: self.collaborators.icons.icon_for(doc),
            };
            next.add_slot(&doc.display_name, content, &doc.location_label());
        }
        if let Some(index) = self.current_index() {
            next.set_selected_index(index);
        }
        let _ = next.take_selection_change();

        tracing::info!(
            "Switched view from {:?} to {:?} ({} documents)",
            self.presentation.view_style(),
            style,
            self.documents.len()
        );
        self.presentation = next;
        self.settings.view_style = style;
        self.sync_selection();
    }

    /// Move the selection area. Takes the numeric placement constant;
    /// an unknown constant is ignored.
    pub fn set_selection_placement(&mut self, code: i32) -> bool {
        let Some(placement) = Placement::from_code(code) else {
            tracing::debug!("Ignoring unknown placement {}", code);
            return false;
        };
        self.presentation.set_selection_placement(placement);
        self.settings.selection_placement = placement;
        true
    }

    /// Arrange desktop sub-windows. Returns false for other view styles.
    pub fn arrange_windows(&mut self, arrangement: WindowArrangement) -> bool {
        match self.presentation.as_desktop_mut() {
            Some(desktop) => {
                desktop.arrange(arrangement);
                true
            }
            None => false,
        }
    }

    /// Follow a resize of the desktop area. Returns false for other view styles.
    pub fn resize_desktop(&mut self, width: i32, height: i32) -> bool {
        match self.presentation.as_desktop_mut() {
            Some(desktop) => {
                desktop.resize_desktop(width, height);
                true
            }
            None => false,
        }
    }

    // --- Internal bookkeeping ---

    pub(super) fn allocate_id(&mut self) -> DocumentId {
        let id = DocumentId(self.next_id);
        self.next_id += 1;
        id
    }

    pub(super) fn text_fallbacks(&self) -> TextFallbacks {
        TextFallbacks {
            encoding: self.settings.default_encoding,
            line_ending: self.settings.line_terminator,
        }
    }

    /// Append a document and its slot, and make it current.
    pub(super) fn push_document(&mut self, doc: Document) -> usize {
        let content = SlotContent {
            document: doc.id,
            icon: self.collaborators.icons.icon_for(&doc),
        };
        let index = self
            .presentation
            .add_slot(&doc.display_name, content, &doc.location_label());
        let id = doc.id;
        self.documents.push(doc);
        self.emit(DocumentEvent::Added(id));
        self.select_index(index);
        index
    }

    /// Drop the document at `index` without asking anything. An emptied
    /// collection gets a fresh untitled document.
    pub(super) fn remove_document_at(&mut self, index: usize) -> Option<DocumentId> {
        if index >= self.documents.len() {
            return None;
        }
        let doc = self.documents.remove(index);
        self.presentation.remove_slot(index);
        self.collaborators.parsers.detach_parser(&doc);
        self.emit(DocumentEvent::Removed(doc.id));

        if self.documents.is_empty() {
            self.current = None;
            self.add_new_empty_document();
        } else {
            self.sync_selection();
        }
        Some(doc.id)
    }

    /// Re-run name disambiguation and refresh the watcher's snapshot.
    pub(super) fn after_collection_change(&mut self) {
        self.renumber_display_names();
        self.refresh_watch_list();
    }

    pub(super) fn renumber_display_names(&mut self) {
        let names = {
            let entries: Vec<NameEntry<'_>> = self
                .documents
                .iter()
                .map(|d| NameEntry {
                    path: d.path(),
                    dirty: d.is_dirty(),
                })
                .collect();
            renumber(&entries)
        };
        for (index, (doc, name)) in self.documents.iter_mut().zip(names).enumerate() {
            if self.presentation.display_name_at(index) != Some(name.as_str()) {
                self.presentation.set_display_name_at(index, &name);
            }
            doc.display_name = name;
        }
    }

    pub(super) fn refresh_watch_list(&self) {
        let entries = self
            .documents
            .iter()
            .filter(|d| d.is_local_file())
            .map(|d| WatchEntry {
                id: d.id,
                path: d.path().to_path_buf(),
                remembered: d.disk_modified,
            })
            .collect();
        *self.watch_list.write() = entries;
    }

    /// Keep the at-least-one-document invariant after a failed operation.
    pub(super) fn ensure_document(&mut self) {
        if self.documents.is_empty() {
            self.add_new_empty_document();
        }
    }

    pub(super) fn emit(&mut self, event: DocumentEvent) {
        tracing::trace!("{:?}", event);
        self.observers.emit(&event);
    }

    pub(super) fn report(&mut self, err: &AppError) {
        tracing::warn!("{}", err);
        self.collaborators.prompt.report_error(&err.user_message());
    }
}

fn same_path(a: &Path, b: &Path, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase()
    }
}

/// Absolute, symlink-free form of a user-supplied location where possible.
pub(super) fn resolve_location(location: &Path) -> PathBuf {
    std::fs::canonicalize(location)
        .or_else(|_| std::path::absolute(location))
        .unwrap_or_else(|_| location.to_path_buf())
}
