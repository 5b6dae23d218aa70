use super::MultiDocumentController;
use crate::app::domain::document::DocumentId;
use crate::app::infrastructure::collaborators::Choice;

/// How the save prompt for a dirty document ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SavePrompt {
    Clean,
    SavedThenProceed,
    DiscardThenProceed,
    Cancelled,
}

impl SavePrompt {
    fn proceeds(self) -> bool {
        self != SavePrompt::Cancelled
    }
}

impl MultiDocumentController {
    /// Close the current document, offering to save it first. Returns false
    /// only when the user cancelled, in which case nothing changed.
    pub fn close_current_document(&mut self) -> bool {
        match self.current_id() {
            Some(id) => self.close_document(id),
            None => false,
        }
    }

    pub fn close_document(&mut self, id: DocumentId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let outcome = self.prompt_to_save(index);
        if !outcome.proceeds() {
            return false;
        }
        tracing::info!("Closing {} ({:?})", self.documents[index].display_name, outcome);
        self.remove_document_at(index);
        self.after_collection_change();
        true
    }

    /// Close every document except the one at `index`, last to first.
    ///
    /// Stops at the first cancellation. Documents closed before that stay
    /// closed. An out-of-range index closes nothing.
    pub fn close_all_except(&mut self, index: usize) -> bool {
        let Some(keep) = self.documents.get(index).map(|d| d.id) else {
            return false;
        };
        let others: Vec<DocumentId> = self
            .documents
            .iter()
            .rev()
            .map(|d| d.id)
            .filter(|id| *id != keep)
            .collect();
        for id in others {
            if !self.close_document(id) {
                return false;
            }
        }
        true
    }

    /// Close everything, last to first, leaving one untitled document.
    pub fn close_all(&mut self) -> bool {
        let all: Vec<DocumentId> = self.documents.iter().rev().map(|d| d.id).collect();
        for id in all {
            if !self.close_document(id) {
                return false;
            }
        }
        true
    }

    fn prompt_to_save(&mut self, index: usize) -> SavePrompt {
        let doc = &self.documents[index];
        if !doc.is_dirty() {
            return SavePrompt::Clean;
        }
        let question = format!("\"{}\" has been modified. Save changes?", doc.file_name());
        match self.collaborators.prompt.confirm(&question) {
            Choice::Yes if self.save_document_at(index) => SavePrompt::SavedThenProceed,
            Choice::Yes | Choice::Cancel => SavePrompt::Cancelled,
            Choice::No => SavePrompt::DiscardThenProceed,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::super::test_support::*;
    use crate::app::domain::events::DocumentEvent;
    use crate::app::infrastructure::collaborators::Choice;
    use crate::app::presentation::ViewStyle;

    #[test]
    fn test_closing_last_document_leaves_an_untitled_one() {
        for style in ALL_STYLES {
            let mut f = Fixture::new(style);
            let path = f.write("only.txt", "x");
            f.controller.open_file(&path, None, false);
            let only = f.controller.current_id().unwrap();
            f.events.borrow_mut().clear();

            assert!(f.controller.close_current_document());
            assert_eq!(f.controller.document_count(), 1);
            let fresh = f.controller.current_document().unwrap();
            assert!(fresh.is_untitled());
            let fresh = fresh.id;
            assert_eq!(
                f.events.borrow().as_slice(),
                &[
                    DocumentEvent::Removed(only),
                    DocumentEvent::Added(fresh),
                    DocumentEvent::CurrentChanged(fresh),
                ],
                "{:?}",
                style
            );
        }
    }

    #[test]
    fn test_closing_selects_a_neighbor() {
        for style in ALL_STYLES {
            let mut f = Fixture::new(style);
            for name in ["a.txt", "b.txt", "c.txt"] {
                let path = f.write(name, name);
                f.controller.open_file(&path, None, false);
            }
            f.controller.set_current_index(1);
            let b = f.controller.current_id().unwrap();

            assert!(f.controller.close_current_document());
            assert_eq!(f.controller.document_count(), 2);
            assert!(f.controller.document(b).is_none());
            let current = f.controller.current_id().unwrap();
            assert_eq!(
                f.controller.presentation().focus_owner(),
                Some(current),
                "{:?}",
                style
            );
            assert_eq!(
                f.controller.presentation().selected_index(),
                f.controller.current_index()
            );
        }
    }

    #[test]
    fn test_cancel_at_save_prompt_changes_nothing() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let path = f.write("dirty.txt", "v1");
        f.controller.open_file(&path, None, false);
        let id = f.controller.current_id().unwrap();
        f.controller.replace_text(id, "v2");
        f.events.borrow_mut().clear();
        f.parsers.clear();

        f.prompt.answer(Choice::Cancel);
        assert!(!f.controller.close_current_document());

        assert_eq!(f.controller.document_count(), 1);
        assert_eq!(f.controller.presentation().slot_count(), 1);
        assert!(f.controller.current_document().unwrap().is_dirty());
        assert!(f.events.borrow().is_empty());
        assert!(f.parsers.calls().is_empty());
    }

    #[test]
    fn test_cancelled_save_as_during_close_keeps_document() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let id = f.controller.current_id().unwrap();
        f.controller.replace_text(id, "unsaved thoughts");

        f.prompt.answer(Choice::Yes);
        f.prompt.save_to(None);
        assert!(!f.controller.close_current_document());

        let doc = f.controller.current_document().unwrap();
        assert_eq!(doc.id, id);
        assert!(doc.is_dirty());
        assert_eq!(doc.text(), "unsaved thoughts");
        assert_eq!(f.controller.presentation().display_name_at(0), Some("Untitled.txt*"));
    }

    #[test]
    fn test_yes_saves_before_closing() {
        let mut f = Fixture::new(ViewStyle::Split);
        let path = f.write("notes.txt", "old");
        f.controller.open_file(&path, None, false);
        let id = f.controller.current_id().unwrap();
        f.controller.replace_text(id, "new");

        f.prompt.answer(Choice::Yes);
        assert!(f.controller.close_document(id));
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(f.controller.document(id).is_none());
    }

    #[test]
    fn test_no_discards_changes() {
        let mut f = Fixture::new(ViewStyle::Desktop);
        let path = f.write("notes.txt", "old");
        f.controller.open_file(&path, None, false);
        let id = f.controller.current_id().unwrap();
        f.controller.replace_text(id, "new");

        f.prompt.answer(Choice::No);
        assert!(f.controller.close_document(id));
        assert_eq!(fs::read_to_string(&path).unwrap(), "old");
    }

    #[test]
    fn test_close_all_except_stops_at_first_cancel() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        for name in ["a.txt", "b.txt", "c.txt", "d.txt"] {
            let path = f.write(name, name);
            f.controller.open_file(&path, None, false);
        }
        let b = f.controller.document_at(1).unwrap().id;
        f.controller.replace_text(b, "edited");

        // d and c close, then b cancels.
        f.prompt.answer(Choice::Cancel);
        assert!(!f.controller.close_all_except(0));
        assert_eq!(f.names(), vec!["a.txt", "b.txt*"]);
    }

    #[test]
    fn test_close_all_except_keeps_one() {
        let mut f = Fixture::new(ViewStyle::Split);
        for name in ["a.txt", "b.txt", "c.txt"] {
            let path = f.write(name, name);
            f.controller.open_file(&path, None, false);
        }
        assert!(f.controller.close_all_except(1));
        assert_eq!(f.names(), vec!["b.txt"]);
        assert_eq!(f.controller.current_index(), Some(0));
        assert!(!f.controller.close_all_except(5));
    }

    #[test]
    fn test_close_all_leaves_one_untitled() {
        let mut f = Fixture::new(ViewStyle::Desktop);
        for name in ["a.txt", "b.txt"] {
            let path = f.write(name, name);
            f.controller.open_file(&path, None, false);
        }
        assert!(f.controller.close_all());
        assert_eq!(f.controller.document_count(), 1);
        assert!(f.controller.current_document().unwrap().is_untitled());
    }

    #[test]
    fn test_invariant_holds_across_mixed_sequence() {
        for style in ALL_STYLES {
            let mut f = Fixture::new(style);
            let path = f.write("z.txt", "z");
            for step in 0..12 {
                match step % 4 {
                    0 => {
                        f.controller.open_file(&path, None, step % 8 == 0);
                    }
                    1 => {
                        f.controller.add_new_empty_document();
                    }
                    _ => {
                        f.controller.close_current_document();
                    }
                }
                assert!(f.controller.document_count() >= 1);
                assert_eq!(
                    f.controller.presentation().slot_count(),
                    f.controller.document_count()
                );
                assert!(f.controller.current_index().is_some());
            }
        }
    }
}
