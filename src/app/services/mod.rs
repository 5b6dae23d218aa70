//! Services layer - business operations and utilities.
//!
//! This module contains business logic and operations:
//! - Syntax style resolution
//! - Display name disambiguation
//! - External modification watching
//! - File and remote I/O
//! - Session persistence
//! - Text helpers

pub mod display_names;
pub mod file_io;
pub mod remote;
pub mod session;
pub mod syntax;
pub mod text_ops;
pub mod watcher;
