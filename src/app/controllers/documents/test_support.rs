//! Scripted collaborators and a controller fixture for the controller tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use tempfile::TempDir;

use super::MultiDocumentController;
use crate::app::domain::document::Document;
use crate::app::domain::encoding::LineEnding;
use crate::app::domain::events::{DocumentEvent, ObserverId};
use crate::app::domain::settings::AppSettings;
use crate::app::infrastructure::collaborators::{
    Choice, Collaborators, ExtensionIcons, ParserHost, UserPrompt,
};
use crate::app::presentation::ViewStyle;

pub const ALL_STYLES: [ViewStyle; 3] = [ViewStyle::Tabbed, ViewStyle::Split, ViewStyle::Desktop];

#[derive(Default)]
struct Script {
    answers: VecDeque<Choice>,
    locations: VecDeque<Option<PathBuf>>,
    questions: Vec<String>,
    errors: Vec<String>,
}

/// Prompt that replays queued answers. Unscripted questions are cancelled.
#[derive(Clone, Default)]
pub struct ScriptedPrompt(Rc<RefCell<Script>>);

impl ScriptedPrompt {
    pub fn answer(&self, choice: Choice) {
        self.0.borrow_mut().answers.push_back(choice);
    }

    pub fn save_to(&self, location: Option<PathBuf>) {
        self.0.borrow_mut().locations.push_back(location);
    }

    pub fn questions(&self) -> Vec<String> {
        self.0.borrow().questions.clone()
    }

    pub fn errors(&self) -> Vec<String> {
        self.0.borrow().errors.clone()
    }
}

impl UserPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> Choice {
        let mut script = self.0.borrow_mut();
        script.questions.push(message.to_string());
        script.answers.pop_front().unwrap_or(Choice::Cancel)
    }

    fn choose_save_location(&mut self, _initial: &Path) -> Option<PathBuf> {
        self.0.borrow_mut().locations.pop_front().flatten()
    }

    fn report_error(&mut self, message: &str) {
        self.0.borrow_mut().errors.push(message.to_string());
    }
}

/// Parser host that records attach/detach calls.
#[derive(Clone, Default)]
pub struct RecordingParsers(Rc<RefCell<Vec<String>>>);

impl RecordingParsers {
    pub fn calls(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn clear(&self) {
        self.0.borrow_mut().clear();
    }
}

impl ParserHost for RecordingParsers {
    fn attach_parser(&mut self, document: &Document) {
        self.0.borrow_mut().push(format!("attach {}", document.id.0));
    }

    fn detach_parser(&mut self, document: &Document) {
        self.0.borrow_mut().push(format!("detach {}", document.id.0));
    }
}

pub struct Fixture {
    pub dir: TempDir,
    pub prompt: ScriptedPrompt,
    pub parsers: RecordingParsers,
    pub events: Rc<RefCell<Vec<DocumentEvent>>>,
    pub subscription: ObserverId,
    pub controller: MultiDocumentController,
}

impl Fixture {
    pub fn new(style: ViewStyle) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings {
            view_style: style,
            default_directory: Some(dir.path().to_path_buf()),
            line_terminator: LineEnding::Lf,
            check_modified_enabled: false,
            ..AppSettings::default()
        };
        Self::with_settings(dir, settings)
    }

    pub fn with_settings(dir: TempDir, settings: AppSettings) -> Self {
        let prompt = ScriptedPrompt::default();
        let parsers = RecordingParsers::default();
        let collaborators = Collaborators {
            prompt: Box::new(prompt.clone()),
            icons: Box::new(ExtensionIcons::default()),
            parsers: Box::new(parsers.clone()),
        };
        let mut controller = MultiDocumentController::new(settings, collaborators);

        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        let subscription = controller.subscribe(move |event| sink.borrow_mut().push(event.clone()));

        Self {
            dir,
            prompt,
            parsers,
            events,
            subscription,
            controller,
        }
    }

    /// Write a file under the scratch directory and return its location.
    pub fn write(&self, name: &str, contents: &str) -> String {
        let path = self.dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, contents).unwrap();
        path.to_string_lossy().into_owned()
    }

    pub fn path(&self, name: &str) -> PathBuf {
        fs::canonicalize(self.dir.path()).unwrap().join(name)
    }

    pub fn names(&self) -> Vec<String> {
        self.controller
            .documents()
            .iter()
            .map(|d| d.display_name.clone())
            .collect()
    }
}
