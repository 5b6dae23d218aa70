use std::path::{Path, PathBuf};
use std::time::SystemTime;

use super::encoding::{Encoding, LineEnding};
use crate::app::infrastructure::error::{AppError, Result};
use crate::app::services::syntax::styles;
use crate::app::services::text_ops::extract_filename;

pub const UNTITLED_FILE_NAME: &str = "Untitled.txt";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(pub u64);

/// Defaults a new document is seeded with.
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentDefaults {
    pub tab_size: u32,
    pub font_name: String,
    pub font_size: u32,
    pub line_ending: LineEnding,
    pub encoding: Encoding,
}

/// Text decoded from disk or the network, ready to become a document's content.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedText {
    /// Content with line terminators normalized to `\n`.
    pub text: String,
    pub encoding: Encoding,
    pub line_ending: LineEnding,
    pub modified: Option<SystemTime>,
    pub read_only: bool,
}

/// One open file or untitled buffer.
///
/// Text is held with `\n` terminators; `line_ending` is re-applied on save.
#[derive(Debug)]
pub struct Document {
    pub id: DocumentId,
    path: PathBuf,
    remote_url: Option<String>,
    untitled: bool,
    pub encoding: Encoding,
    pub line_ending: LineEnding,
    pub style: String,
    pub read_only: bool,
    /// Disk timestamp remembered at the last load or save.
    pub disk_modified: Option<SystemTime>,
    pub display_name: String,
    pub tab_size: u32,
    pub font_name: String,
    pub font_size: u32,
    text: String,
    dirty: bool,
    caret_line: usize,
}

impl Document {
    pub fn new_untitled(id: DocumentId, directory: &Path, defaults: &DocumentDefaults) -> Self {
        Self {
            id,
            path: directory.join(UNTITLED_FILE_NAME),
            remote_url: None,
            untitled: true,
            encoding: defaults.encoding,
            line_ending: defaults.line_ending,
            style: styles::NONE.to_string(),
            read_only: false,
            disk_modified: None,
            display_name: UNTITLED_FILE_NAME.to_string(),
            tab_size: defaults.tab_size,
            font_name: defaults.font_name.clone(),
            font_size: defaults.font_size,
            text: String::new(),
            dirty: false,
            caret_line: 0,
        }
    }

    pub fn new_from_file(
        id: DocumentId,
        path: PathBuf,
        loaded: LoadedText,
        defaults: &DocumentDefaults,
    ) -> Self {
        let display_name = extract_filename(&path.to_string_lossy());
        Self {
            id,
            path,
            remote_url: None,
            untitled: false,
            encoding: loaded.encoding,
            line_ending: loaded.line_ending,
            style: styles::NONE.to_string(),
            read_only: loaded.read_only,
            disk_modified: loaded.modified,
            display_name,
            tab_size: defaults.tab_size,
            font_name: defaults.font_name.clone(),
            font_size: defaults.font_size,
            text: loaded.text,
            dirty: false,
            caret_line: 0,
        }
    }

    /// A document fetched from a URL. `path` is its name-only stand-in.
    pub fn new_remote(
        id: DocumentId,
        url: String,
        path: PathBuf,
        loaded: LoadedText,
        defaults: &DocumentDefaults,
    ) -> Self {
        let mut doc = Self::new_from_file(id, path, loaded, defaults);
        doc.remote_url = Some(url);
        doc.read_only = true;
        doc.disk_modified = None;
        doc
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn remote_url(&self) -> Option<&str> {
        self.remote_url.as_deref()
    }

    pub fn is_untitled(&self) -> bool {
        self.untitled
    }

    /// Backed by a file on the local file system.
    pub fn is_local_file(&self) -> bool {
        !self.untitled && self.remote_url.is_none()
    }

    pub fn file_name(&self) -> String {
        extract_filename(&self.path.to_string_lossy())
    }

    /// Full location for tooltips: the URL for remote documents, else the path.
    pub fn location_label(&self) -> String {
        match &self.remote_url {
            Some(url) => url.clone(),
            None => self.path.display().to_string(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the content. Returns true when the dirty flag flipped.
    pub fn set_text(&mut self, text: &str) -> bool {
        self.text = LineEnding::normalize(text);
        self.clamp_caret();
        let flipped = !self.dirty;
        self.dirty = true;
        flipped
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_dirty(&mut self) -> bool {
        let flipped = !self.dirty;
        self.dirty = true;
        flipped
    }

    pub fn mark_clean(&mut self) -> bool {
        let flipped = self.dirty;
        self.dirty = false;
        flipped
    }

    /// Untitled, never edited and empty.
    pub fn is_pristine(&self) -> bool {
        self.untitled && !self.dirty && self.text.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.text.split('\n').count()
    }

    /// Zero-based caret line.
    pub fn caret_line(&self) -> usize {
        self.caret_line
    }

    /// Move the caret to a zero-based line, clamped to the last line.
    pub fn set_caret_line(&mut self, line: usize) {
        self.caret_line = line.min(self.line_count() - 1);
    }

    /// Move the caret to a one-based line, rejecting out-of-range input.
    pub fn goto_line(&mut self, line: usize) -> Result<()> {
        let count = self.line_count();
        if line == 0 || line > count {
            return Err(AppError::LineOutOfRange { line, count });
        }
        self.caret_line = line - 1;
        Ok(())
    }

    /// First line of the content, used to guess a style for extension-less files.
    pub fn first_line(&self) -> &str {
        self.text.split('\n').next().unwrap_or("")
    }

    /// Replace the content with freshly loaded text, keeping the caret line where possible.
    pub fn reload_from(&mut self, loaded: LoadedText) {
        self.text = loaded.text;
        self.encoding = loaded.encoding;
        self.line_ending = loaded.line_ending;
        self.disk_modified = loaded.modified;
        self.read_only = loaded.read_only || self.remote_url.is_some();
        self.dirty = false;
        self.clamp_caret();
    }

    /// Point the document at a new file after a successful save-as.
    pub fn relocate(&mut self, path: PathBuf, encoding: Encoding) {
        self.path = path;
        self.encoding = encoding;
        self.untitled = false;
        self.remote_url = None;
        self.read_only = false;
    }

    fn clamp_caret(&mut self) {
        self.caret_line = self.caret_line.min(self.line_count() - 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> DocumentDefaults {
        DocumentDefaults {
            tab_size: 4,
            font_name: "Monospaced".into(),
            font_size: 13,
            line_ending: LineEnding::Lf,
            encoding: Encoding::Utf8,
        }
    }

    fn loaded(text: &str) -> LoadedText {
        LoadedText {
            text: text.to_string(),
            encoding: Encoding::Utf8,
            line_ending: LineEnding::Lf,
            modified: None,
            read_only: false,
        }
    }

    #[test]
    fn test_untitled_is_seeded_with_defaults() {
        let doc = Document::new_untitled(DocumentId(1), Path::new("/home/me"), &defaults());
        assert!(doc.is_untitled());
        assert!(doc.is_pristine());
        assert_eq!(doc.path(), Path::new("/home/me/Untitled.txt"));
        assert_eq!(doc.tab_size, 4);
        assert_eq!(doc.style, styles::NONE);
    }

    #[test]
    fn test_set_text_reports_dirty_flip_once() {
        let mut doc = Document::new_untitled(DocumentId(1), Path::new("/tmp"), &defaults());
        assert!(doc.set_text("a"));
        assert!(!doc.set_text("ab"));
        assert!(doc.is_dirty());
        assert!(!doc.is_pristine());
        assert!(doc.mark_clean());
        assert!(!doc.mark_clean());
    }

    #[test]
    fn test_set_text_normalizes_line_endings() {
        let mut doc = Document::new_untitled(DocumentId(1), Path::new("/tmp"), &defaults());
        doc.set_text("one\r\ntwo\rthree");
        assert_eq!(doc.text(), "one\ntwo\nthree");
        assert_eq!(doc.line_count(), 3);
    }

    #[test]
    fn test_reload_clamps_caret() {
        let path = PathBuf::from("/tmp/a.txt");
        let text = loaded("1\n2\n3\n4\n5");
        let mut doc = Document::new_from_file(DocumentId(2), path, text, &defaults());
        doc.set_caret_line(4);
        assert_eq!(doc.caret_line(), 4);
        doc.reload_from(loaded("1\n2"));
        assert_eq!(doc.caret_line(), 1);
        assert!(!doc.is_dirty());
    }

    #[test]
    fn test_goto_line_validates_range() {
        let path = PathBuf::from("/tmp/a.txt");
        let mut doc = Document::new_from_file(DocumentId(2), path, loaded("a\nb\nc"), &defaults());
        assert!(doc.goto_line(3).is_ok());
        assert_eq!(doc.caret_line(), 2);
        assert!(matches!(doc.goto_line(0), Err(AppError::LineOutOfRange { .. })));
        assert!(matches!(doc.goto_line(4), Err(AppError::LineOutOfRange { line: 4, count: 3 })));
        assert_eq!(doc.caret_line(), 2);
    }

    #[test]
    fn test_remote_documents_are_read_only() {
        let doc = Document::new_remote(
            DocumentId(3),
            "https://example.com/notes.md".into(),
            PathBuf::from("notes.md"),
            loaded("# hi"),
            &defaults(),
        );
        assert!(doc.read_only);
        assert!(!doc.is_local_file());
        assert_eq!(doc.location_label(), "https://example.com/notes.md");
        assert_eq!(doc.file_name(), "notes.md");
    }
}
