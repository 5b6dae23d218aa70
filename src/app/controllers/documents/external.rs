use std::sync::Arc;
use std::time::Duration;

use super::MultiDocumentController;
use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::collaborators::Choice;
use crate::app::services::file_io::{modified_time, read_document};
use crate::app::services::watcher::{ModificationWatcher, WatchSource};

impl MultiDocumentController {
    /// Start polling open files for outside changes, if enabled in settings.
    pub fn start_watcher(&mut self) -> bool {
        if self.watcher.is_some() {
            return true;
        }
        if !self.settings.check_modified_enabled {
            return false;
        }
        let period = Duration::from_secs(self.settings.check_modified_period_secs.max(1));
        let list = Arc::clone(&self.watch_list);
        let source: WatchSource = Arc::new(move || list.read().clone());
        match ModificationWatcher::spawn(period, source) {
            Ok(watcher) => {
                self.watcher = Some(watcher);
                true
            }
            Err(e) => {
                tracing::warn!("Could not start modification watcher: {}", e);
                false
            }
        }
    }

    pub fn stop_watcher(&mut self) {
        if let Some(mut watcher) = self.watcher.take() {
            watcher.stop();
        }
    }

    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Apply new modification-check settings, restarting the watcher.
    pub fn set_modification_check(&mut self, enabled: bool, period_secs: u64) {
        self.settings.check_modified_enabled = enabled;
        self.settings.check_modified_period_secs = period_secs;
        self.stop_watcher();
        if enabled {
            self.start_watcher();
        }
    }

    /// Handle findings from the watcher, if any arrived. Call from the UI
    /// thread's idle loop. The watcher stays paused until this returns.
    pub fn poll_external_changes(&mut self) -> bool {
        let Some(found) = self.watcher.as_ref().and_then(|w| w.try_take()) else {
            return false;
        };
        self.handle_external_changes(&found.ids);
        if let Some(watcher) = &self.watcher {
            watcher.resume();
        }
        true
    }

    /// Ask about each document changed on disk, in the order given, then
    /// return to the document that was current before.
    pub fn handle_external_changes(&mut self, ids: &[DocumentId]) {
        let original = self.current;

        for &id in ids {
            let Some(index) = self.index_of(id) else {
                continue;
            };
            let doc = &self.documents[index];
            if !doc.is_local_file() {
                continue;
            }
            // A save or reload since the scan makes the finding stale.
            let Some(disk) = modified_time(doc.path()) else {
                continue;
            };
            if doc.disk_modified.is_none_or(|remembered| remembered == disk) {
                continue;
            }

            let mut question = format!(
                "\"{}\" was modified by another program. Reload it?",
                doc.path().display()
            );
            if doc.is_dirty() {
                question.push_str("\nYour unsaved changes will be lost.");
            }

            self.select_index(index);
            match self.collaborators.prompt.confirm(&question) {
                Choice::Yes => self.reload_document_at(index),
                Choice::No | Choice::Cancel => {
                    let name = &self.documents[index].display_name;
                    tracing::debug!("Keeping in-memory copy of {}", name);
                    self.documents[index].disk_modified = Some(disk);
                }
            }
        }

        if let Some(index) = original.and_then(|id| self.index_of(id)) {
            self.select_index(index);
        }
        self.refresh_watch_list();
    }

    /// Re-read a document from disk, keeping the caret line where it fits.
    /// On failure the buffer is left as it was.
    fn reload_document_at(&mut self, index: usize) {
        let doc = &self.documents[index];
        let path = doc.path().to_path_buf();
        let loaded = match read_document(&path, Some(doc.encoding), self.text_fallbacks()) {
            Ok(loaded) => loaded,
            Err(e) => {
                self.report(&e);
                return;
            }
        };

        let doc = &mut self.documents[index];
        let id = doc.id;
        let was_dirty = doc.is_dirty();
        doc.reload_from(loaded);
        tracing::info!("Reloaded {}", path.display());
        if was_dirty {
            self.dirty_changed(id, false);
        }
    }
}
