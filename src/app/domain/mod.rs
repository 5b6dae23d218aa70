//! Domain layer - core data structures and types.
//!
//! This module contains the fundamental domain models:
//! - Document and DocumentId
//! - Encodings and line terminators
//! - Application settings
//! - Typed document events and their observers

pub mod document;
pub mod encoding;
pub mod events;
pub mod settings;

pub use document::{Document, DocumentDefaults, DocumentId, LoadedText};
pub use encoding::{Encoding, LineEnding};
pub use events::{DocumentEvent, ObserverId, Observers};
pub use settings::AppSettings;
