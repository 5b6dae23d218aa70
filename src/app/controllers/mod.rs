//! Controllers layer - orchestration and coordination.
//!
//! This module contains the controller that coordinates between
//! domain models, services, and the active presentation:
//! - Document lifecycle (open, close, save, reload)
//! - Current-document selection and change notification
//! - External modification handling and session restore

pub mod documents;

pub use documents::{APP_NAME, MultiDocumentController};
