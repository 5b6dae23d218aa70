use std::path::{Path, PathBuf};

use super::{MultiDocumentController, resolve_location};
use crate::app::domain::document::{Document, DocumentId};
use crate::app::domain::encoding::Encoding;
use crate::app::infrastructure::collaborators::Choice;
use crate::app::infrastructure::platform::is_remote_location;
use crate::app::services::file_io::{create_empty, file_size, read_document};
use crate::app::services::remote::fetch_document;
use crate::app::services::text_ops::url_file_name;

impl MultiDocumentController {
    /// Add an empty untitled document seeded with the configured defaults.
    pub fn add_new_empty_document(&mut self) -> DocumentId {
        let id = self.allocate_id();
        let doc = Document::new_untitled(
            id,
            &self.settings.untitled_directory(),
            &self.settings.document_defaults(),
        );
        self.collaborators.parsers.attach_parser(&doc);
        self.push_document(doc);
        self.after_collection_change();
        id
    }

    /// Open a local file or an `http(s)` URL.
    ///
    /// With `reuse_if_open`, a location that is already open is just
    /// selected. `encoding: None` lets the byte order mark decide, then the
    /// configured default. Failures are reported to the user and return
    /// false; the collection is never left empty.
    pub fn open_file(
        &mut self,
        location: &str,
        encoding: Option<Encoding>,
        reuse_if_open: bool,
    ) -> bool {
        if is_remote_location(location) {
            return self.open_remote(location, encoding, reuse_if_open);
        }

        let mut path = resolve_location(Path::new(location));
        if reuse_if_open && let Some(index) = self.find_by_path(&path) {
            tracing::debug!("{} is already open", path.display());
            self.select_index(index);
            return true;
        }

        if !path.exists() {
            if !self.confirm_create(&path) {
                return false;
            }
            path = resolve_location(&path);
        }

        if self.settings.file_size_check_enabled && !self.confirm_size(&path) {
            return false;
        }

        let loaded = match read_document(&path, encoding, self.text_fallbacks()) {
            Ok(loaded) => loaded,
            Err(e) => {
                self.report(&e);
                self.ensure_document();
                return false;
            }
        };

        let id = self.allocate_id();
        let doc = Document::new_from_file(id, path, loaded, &self.settings.document_defaults());
        self.insert_opened(doc);
        true
    }

    /// Like [`open_file`](Self::open_file), with the encoding given by name.
    pub fn open_file_with_encoding_label(
        &mut self,
        location: &str,
        encoding_label: &str,
        reuse_if_open: bool,
    ) -> bool {
        match Encoding::from_label(encoding_label) {
            Ok(encoding) => self.open_file(location, Some(encoding), reuse_if_open),
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    fn open_remote(&mut self, url: &str, encoding: Option<Encoding>, reuse_if_open: bool) -> bool {
        if reuse_if_open
            && let Some(index) = self.documents.iter().position(|d| d.remote_url() == Some(url))
        {
            self.select_index(index);
            return true;
        }

        let loaded = match fetch_document(url, encoding, self.text_fallbacks()) {
            Ok(loaded) => loaded,
            Err(e) => {
                self.report(&e);
                self.ensure_document();
                return false;
            }
        };

        let id = self.allocate_id();
        let doc = Document::new_remote(
            id,
            url.to_string(),
            PathBuf::from(url_file_name(url)),
            loaded,
            &self.settings.document_defaults(),
        );
        self.insert_opened(doc);
        true
    }

    /// Style, attach and show a freshly loaded document. An untouched
    /// untitled document that was the only one open gives way to it.
    fn insert_opened(&mut self, mut doc: Document) {
        doc.style = self.resolve_style(&doc);
        let replaces_pristine = self.documents.len() == 1 && self.documents[0].is_pristine();

        tracing::info!("Opened {} ({})", doc.location_label(), doc.style);
        self.collaborators.parsers.attach_parser(&doc);
        self.push_document(doc);
        if replaces_pristine {
            self.remove_document_at(0);
        }
        self.after_collection_change();
    }

    fn confirm_create(&mut self, path: &Path) -> bool {
        let question = format!("File \"{}\" does not exist. Create it?", path.display());
        if self.collaborators.prompt.confirm(&question) != Choice::Yes {
            return false;
        }
        match create_empty(path) {
            Ok(()) => true,
            Err(e) => {
                self.report(&e);
                false
            }
        }
    }

    /// Ask before reading a file over the size threshold.
    fn confirm_size(&mut self, path: &Path) -> bool {
        let size = match file_size(path) {
            Ok(size) => size,
            Err(e) => {
                self.report(&e);
                return false;
            }
        };
        if size <= self.settings.max_file_size_bytes() {
            return true;
        }
        let question = format!(
            "\"{}\" is {:.1} MB. Large files may take a while to load. Open it anyway?",
            path.display(),
            size as f64 / (1024.0 * 1024.0)
        );
        self.collaborators.prompt.confirm(&question) == Choice::Yes
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::super::test_support::*;
    use crate::app::domain::encoding::{Encoding, LineEnding};
    use crate::app::domain::events::DocumentEvent;
    use crate::app::domain::settings::AppSettings;
    use crate::app::infrastructure::collaborators::Choice;
    use crate::app::presentation::ViewStyle;
    use crate::app::services::syntax::styles;

    #[test]
    fn test_reopening_with_reuse_selects_existing_copy() {
        for style in ALL_STYLES {
            let mut f = Fixture::new(style);
            let report = f.write("report.txt", "quarterly");
            assert!(f.controller.open_file(&report, None, false));
            f.controller.add_new_empty_document();
            f.controller.replace_text(f.controller.current_id().unwrap(), "draft");

            assert!(f.controller.open_file(&report, None, true));
            assert_eq!(f.controller.document_count(), 2, "{:?}", style);
            let current = f.controller.current_document().unwrap();
            assert_eq!(current.path(), f.path("report.txt"));
            assert_eq!(f.controller.presentation().selected_index(), Some(0));
        }
    }

    #[test]
    fn test_open_same_file_twice_with_reuse_keeps_one_copy() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let report = f.write("report.txt", "quarterly");
        assert!(f.controller.open_file(&report, None, false));
        assert!(f.controller.open_file(&report, None, true));
        assert_eq!(f.controller.document_count(), 1);
        assert_eq!(f.controller.current_index(), Some(0));
        assert_eq!(f.names(), vec!["report.txt"]);
    }

    #[test]
    fn test_same_path_opened_twice_without_reuse() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let report = f.write("report.txt", "quarterly");
        f.controller.open_file(&report, None, false);
        f.controller.open_file(&report, None, false);
        assert_eq!(f.names(), vec!["report.txt (1)", "report.txt (2)"]);
    }

    #[test]
    fn test_same_base_name_in_different_directories() {
        let mut f = Fixture::new(ViewStyle::Split);
        let a = f.write("a/x.c", "int a;");
        let b = f.write("b/x.c", "int b;");
        assert!(f.controller.open_file(&a, None, true));
        assert!(f.controller.open_file(&b, None, true));
        assert_eq!(f.controller.document_count(), 2);
        assert_eq!(f.names(), vec!["x.c (1)", "x.c (2)"]);
        assert_eq!(f.controller.presentation().display_name_at(1), Some("x.c (2)"));

        f.controller.close_document(f.controller.document_at(0).unwrap().id);
        assert_eq!(f.names(), vec!["x.c"]);
    }

    #[test]
    fn test_opening_replaces_pristine_untitled() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let untitled = f.controller.current_id().unwrap();
        f.events.borrow_mut().clear();

        let path = f.write("main.rs", "fn main() {}");
        assert!(f.controller.open_file(&path, None, false));

        assert_eq!(f.controller.document_count(), 1);
        let doc = f.controller.current_document().unwrap();
        assert_eq!(doc.style, styles::RUST);
        let opened = doc.id;
        assert_eq!(
            f.events.borrow().as_slice(),
            &[
                DocumentEvent::Added(opened),
                DocumentEvent::CurrentChanged(opened),
                DocumentEvent::Removed(untitled),
            ]
        );
    }

    #[test]
    fn test_edited_untitled_is_kept() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let untitled = f.controller.current_id().unwrap();
        f.controller.replace_text(untitled, "keep me");
        let path = f.write("a.txt", "a");
        f.controller.open_file(&path, None, false);
        assert_eq!(f.controller.document_count(), 2);
        assert!(f.controller.document(untitled).is_some());
    }

    #[test]
    fn test_missing_file_is_created_on_yes() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let target = f.dir.path().join("new.md");
        f.prompt.answer(Choice::Yes);

        assert!(f.controller.open_file(&target.to_string_lossy(), None, true));
        assert!(target.exists());
        assert_eq!(f.controller.current_document().unwrap().style, styles::MARKDOWN);
        assert!(f.prompt.questions()[0].contains("does not exist"));
    }

    #[test]
    fn test_missing_file_declined_changes_nothing() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let target = f.dir.path().join("nope.txt");
        f.prompt.answer(Choice::No);
        f.events.borrow_mut().clear();

        assert!(!f.controller.open_file(&target.to_string_lossy(), None, true));
        assert!(!target.exists());
        assert_eq!(f.controller.document_count(), 1);
        assert!(f.events.borrow().is_empty());
    }

    #[test]
    fn test_large_file_asks_first() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            max_file_size_mb: 0.000_01,
            default_directory: Some(dir.path().to_path_buf()),
            check_modified_enabled: false,
            ..AppSettings::default()
        };
        let mut f = Fixture::with_settings(dir, settings);
        let big = f.write("big.log", &"x".repeat(64));

        f.prompt.answer(Choice::No);
        assert!(!f.controller.open_file(&big, None, false));
        assert!(f.controller.current_document().unwrap().is_untitled());

        f.prompt.answer(Choice::Yes);
        assert!(f.controller.open_file(&big, None, false));
        assert_eq!(f.controller.current_document().unwrap().text().len(), 64);
        assert_eq!(f.prompt.questions().len(), 2);
    }

    #[test]
    fn test_read_failure_is_reported_and_keeps_a_document() {
        let mut f = Fixture::new(ViewStyle::Desktop);
        let dir_as_file = f.dir.path().join("folder");
        fs::create_dir(&dir_as_file).unwrap();

        assert!(!f.controller.open_file(&dir_as_file.to_string_lossy(), None, false));
        assert_eq!(f.controller.document_count(), 1);
        assert_eq!(f.prompt.errors().len(), 1);
    }

    #[test]
    fn test_malformed_content_reports_encoding() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let path = f.dir.path().join("bin.dat");
        fs::write(&path, [0x66, 0xff, 0xfe, 0x00, 0xc3]).unwrap();

        assert!(!f.controller.open_file(&path.to_string_lossy(), Some(Encoding::Utf8), false));
        assert!(f.prompt.errors()[0].contains("UTF-8"));
        assert_eq!(f.controller.document_count(), 1);
    }

    #[test]
    fn test_unknown_encoding_label_is_rejected() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let path = f.write("a.txt", "a");
        assert!(!f.controller.open_file_with_encoding_label(&path, "EBCDIC-42", false));
        assert_eq!(f.prompt.errors().len(), 1);
        assert!(f.controller.open_file_with_encoding_label(&path, "ISO-8859-1", false));
        assert_eq!(f.controller.current_document().unwrap().encoding, Encoding::Latin1);
    }

    #[test]
    fn test_bom_and_line_endings_are_detected() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let path = f.dir.path().join("win.txt");
        fs::write(&path, b"\xef\xbb\xbfone\r\ntwo\r\n").unwrap();

        assert!(f.controller.open_file(&path.to_string_lossy(), None, false));
        let doc = f.controller.current_document().unwrap();
        assert_eq!(doc.encoding, Encoding::Utf8Bom);
        assert_eq!(doc.line_ending, LineEnding::CrLf);
        assert_eq!(doc.text(), "one\ntwo\n");
    }

    #[test]
    fn test_extensionless_script_is_guessed_from_first_line() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        let path = f.write("deploy", "#!/usr/bin/env python\nprint('hi')\n");
        f.controller.open_file(&path, None, false);
        assert_eq!(f.controller.current_document().unwrap().style, styles::PYTHON);
    }

    #[test]
    fn test_new_document_uses_configured_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            tab_size: 8,
            font_size: 16,
            line_terminator: LineEnding::CrLf,
            default_encoding: Encoding::Utf16Le,
            default_directory: Some(dir.path().to_path_buf()),
            check_modified_enabled: false,
            ..AppSettings::default()
        };
        let mut f = Fixture::with_settings(dir, settings);
        let id = f.controller.add_new_empty_document();
        let doc = f.controller.document(id).unwrap();
        assert_eq!(doc.tab_size, 8);
        assert_eq!(doc.font_size, 16);
        assert_eq!(doc.line_ending, LineEnding::CrLf);
        assert_eq!(doc.encoding, Encoding::Utf16Le);
        assert_eq!(f.parsers.calls().last().cloned(), Some(format!("attach {}", id.0)));
    }

    #[test]
    fn test_unreachable_remote_host_is_reported() {
        let mut f = Fixture::new(ViewStyle::Tabbed);
        assert!(!f.controller.open_file("http://127.0.0.1:1/notes.txt", None, false));
        assert_eq!(f.controller.document_count(), 1);
        assert_eq!(f.prompt.errors().len(), 1);
    }
}
