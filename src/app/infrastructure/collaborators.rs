//! Contracts for the components the document core drives but does not own:
//! the user-prompt surface, the icon provider and the parser host.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::app::domain::document::Document;
use crate::app::services::text_ops::extension_of;

/// Answer to a yes/no/cancel question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Yes,
    No,
    Cancel,
}

/// Synchronous dialogs shown to the user.
pub trait UserPrompt {
    fn confirm(&mut self, message: &str) -> Choice;

    /// Ask where to save. `None` means the user cancelled.
    fn choose_save_location(&mut self, initial: &Path) -> Option<PathBuf>;

    fn report_error(&mut self, message: &str);
}

/// Prompt surface without a user: answers every question the same way and
/// never picks a save location.
pub struct HeadlessPrompt {
    pub answer: Choice,
}

impl UserPrompt for HeadlessPrompt {
    fn confirm(&mut self, message: &str) -> Choice {
        tracing::info!("{} -> {:?}", message, self.answer);
        self.answer
    }

    fn choose_save_location(&mut self, _initial: &Path) -> Option<PathBuf> {
        None
    }

    fn report_error(&mut self, message: &str) {
        tracing::error!("{}", message);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IconHandle(pub String);

pub trait IconProvider {
    fn icon_for(&self, document: &Document) -> IconHandle;
}

/// Icons keyed by lower-case file extension, with a fallback.
pub struct ExtensionIcons {
    by_extension: HashMap<String, IconHandle>,
    fallback: IconHandle,
}

impl ExtensionIcons {
    pub fn new(fallback: IconHandle) -> Self {
        Self {
            by_extension: HashMap::new(),
            fallback,
        }
    }

    pub fn with_icon(mut self, extension: &str, icon: &str) -> Self {
        self.by_extension
            .insert(extension.to_lowercase(), IconHandle(icon.to_string()));
        self
    }
}

impl Default for ExtensionIcons {
    fn default() -> Self {
        Self::new(IconHandle("text".into()))
            .with_icon("c", "source-c")
            .with_icon("h", "source-c")
            .with_icon("cpp", "source-cpp")
            .with_icon("java", "source-java")
            .with_icon("py", "source-python")
            .with_icon("rs", "source-rust")
            .with_icon("html", "markup")
            .with_icon("xml", "markup")
            .with_icon("md", "markdown")
    }
}

impl IconProvider for ExtensionIcons {
    fn icon_for(&self, document: &Document) -> IconHandle {
        extension_of(document.path())
            .and_then(|ext| self.by_extension.get(&ext).cloned())
            .unwrap_or_else(|| self.fallback.clone())
    }
}

/// Host for per-document parsers such as the spell checker.
pub trait ParserHost {
    fn attach_parser(&mut self, document: &Document);
    fn detach_parser(&mut self, document: &Document);
}

pub struct NoParsers;

impl ParserHost for NoParsers {
    fn attach_parser(&mut self, _document: &Document) {}
    fn detach_parser(&mut self, _document: &Document) {}
}

/// Everything the controller calls out to.
pub struct Collaborators {
    pub prompt: Box<dyn UserPrompt>,
    pub icons: Box<dyn IconProvider>,
    pub parsers: Box<dyn ParserHost>,
}

impl Collaborators {
    pub fn new(prompt: Box<dyn UserPrompt>) -> Self {
        Self {
            prompt,
            icons: Box::new(ExtensionIcons::default()),
            parsers: Box::new(NoParsers),
        }
    }
}
