//! Application layer - organized by Clean Architecture principles.
//!
//! # Structure
//!
//! - `domain/` - Core data structures (Document, Settings, Events)
//! - `controllers/` - Orchestration (MultiDocumentController)
//! - `presentation/` - Tabbed, split and desktop document layouts
//! - `services/` - Business operations (syntax, file I/O, watcher, session)
//! - `infrastructure/` - Collaborator contracts, platform probes, errors

pub mod controllers;
pub mod domain;
pub mod infrastructure;
pub mod presentation;
pub mod services;

// Re-exports for convenient external access
pub use controllers::{APP_NAME, MultiDocumentController};
pub use domain::{AppSettings, Document, DocumentEvent, DocumentId, Encoding, LineEnding};
pub use infrastructure::collaborators::{Choice, Collaborators, HeadlessPrompt, UserPrompt};
pub use infrastructure::error::{AppError, Result};
pub use presentation::{Placement, ViewStyle, WindowArrangement};
pub use services::session::SessionRestore;
pub use services::syntax::{SyntaxFilterSet, SyntaxStyleResolver};
