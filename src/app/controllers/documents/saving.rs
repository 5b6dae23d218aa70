use std::path::{Path, PathBuf};

use super::{MultiDocumentController, resolve_location};
use crate::app::domain::events::DocumentEvent;
use crate::app::infrastructure::collaborators::Choice;
use crate::app::services::file_io::write_document;

impl MultiDocumentController {
    /// Save the current document. Untitled and read-only documents go
    /// through save-as.
    pub fn save_current_file(&mut self) -> bool {
        match self.current_index() {
            Some(index) => self.save_document_at(index),
            None => false,
        }
    }

    /// Save the current document under a new name. With no `target` the
    /// user is asked for one.
    pub fn save_current_file_as(&mut self, target: Option<PathBuf>) -> bool {
        match self.current_index() {
            Some(index) => self.save_as_at(index, target),
            None => false,
        }
    }

    /// Save every dirty document. Returns false if any save failed or was
    /// cancelled; the others are still attempted.
    pub fn save_all(&mut self) -> bool {
        let dirty: Vec<_> = self
            .documents
            .iter()
            .filter(|d| d.is_dirty())
            .map(|d| d.id)
            .collect();
        let mut all_saved = true;
        for id in dirty {
            if let Some(index) = self.index_of(id) {
                all_saved &= self.save_document_at(index);
            }
        }
        all_saved
    }

    pub(super) fn save_document_at(&mut self, index: usize) -> bool {
        let doc = &self.documents[index];
        if doc.is_untitled() || doc.read_only {
            return self.save_as_at(index, None);
        }
        let path = doc.path().to_path_buf();
        self.write_to(index, path)
    }

    fn save_as_at(&mut self, index: usize, target: Option<PathBuf>) -> bool {
        let target = match target {
            Some(target) => target,
            None => {
                let initial = self.documents[index].path().to_path_buf();
                match self.collaborators.prompt.choose_save_location(&initial) {
                    Some(target) => target,
                    None => {
                        tracing::debug!("Save as cancelled");
                        return false;
                    }
                }
            }
        };
        let target = resolve_location(&target);

        let doc = &self.documents[index];
        let own_file = doc.is_local_file() && doc.path() == target;
        if target.exists() && !own_file && !self.confirm_overwrite(&target) {
            return false;
        }
        self.write_to(index, target)
    }

    fn confirm_overwrite(&mut self, target: &Path) -> bool {
        let question = format!("\"{}\" already exists. Replace it?", target.display());
        self.collaborators.prompt.confirm(&question) == Choice::Yes
    }

    /// Write the document at `index` to `path` and update everything that
    /// depends on where it lives.
    fn write_to(&mut self, index: usize, path: PathBuf) -> bool {
        let doc = &self.documents[index];
        let modified = match write_document(&path, doc.text(), doc.encoding, doc.line_ending) {
            Ok(modified) => modified,
            Err(e) => {
                self.report(&e);
                return false;
            }
        };

        let doc = &mut self.documents[index];
        let id = doc.id;
        let moved = !doc.is_local_file() || doc.path() != path;
        if moved {
            let encoding = doc.encoding;
            doc.relocate(path, encoding);
        }
        doc.disk_modified = modified;
        let was_dirty = doc.mark_clean();
        tracing::info!("Saved {}", doc.path().display());

        if was_dirty {
            self.emit(DocumentEvent::DirtyChanged { id, dirty: false });
        }
        if moved {
            self.emit(DocumentEvent::PathChanged(id));
            let doc = &self.documents[index];
            let icon = self.collaborators.icons.icon_for(doc);
            let label = doc.location_label();
            self.presentation.update_slot(index, icon, &label);
            self.restyle(index);
        }
        self.after_collection_change();
        true
    }
}
