pub mod app;

pub use app::{
    AppError, AppSettings, Choice, Collaborators, Document, DocumentEvent, DocumentId,
    MultiDocumentController, ViewStyle,
};
