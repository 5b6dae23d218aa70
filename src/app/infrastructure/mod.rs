//! Infrastructure layer - external integrations and utilities.
//!
//! This module contains code that interfaces with external systems:
//! - Collaborator contracts (prompts, icons, parsers)
//! - Platform-specific detection
//! - Error types

pub mod collaborators;
pub mod error;
pub mod platform;
