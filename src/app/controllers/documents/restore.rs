use std::path::Path;

use super::MultiDocumentController;
use crate::app::services::session::{self, SessionData};

impl MultiDocumentController {
    /// Open local files in presentation order, plus which one is selected.
    pub fn session_snapshot(&self) -> SessionData {
        let files: Vec<_> = self
            .documents
            .iter()
            .filter(|d| d.is_local_file())
            .collect();
        let active_index = files
            .iter()
            .position(|d| Some(d.id) == self.current)
            .unwrap_or(0);
        SessionData {
            active_index,
            files: files.iter().map(|d| d.path().to_path_buf()).collect(),
        }
    }

    /// Persist the open files to `dir`, honoring the session-restore setting.
    pub fn save_session(&self, dir: &Path) -> bool {
        match session::save_session(dir, &self.session_snapshot(), self.settings.session_restore) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to save session: {}", e);
                false
            }
        }
    }

    /// Reopen the files of a saved session. Files that no longer exist are
    /// skipped. Returns how many were opened.
    pub fn restore_session(&mut self, dir: &Path) -> usize {
        let Some(data) = session::load_session(dir, self.settings.session_restore) else {
            return 0;
        };

        let mut opened = 0;
        let mut active = None;
        for (i, path) in data.files.iter().enumerate() {
            if !path.is_file() {
                tracing::warn!("Session file no longer exists: {}", path.display());
                continue;
            }
            if self.open_file(&path.to_string_lossy(), None, true) {
                opened += 1;
                if i == data.active_index {
                    active = self.current;
                }
            }
        }
        if let Some(id) = active {
            self.set_current_document(id);
        }
        tracing::info!("Restored {} of {} session files", opened, data.files.len());
        opened
    }
}
