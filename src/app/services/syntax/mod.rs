//! Assignment of syntax styles to documents.
//!
//! A style is chosen from the file name through the wildcard patterns of a
//! [`SyntaxFilterSet`]. Files without an extension may instead be styled
//! from their first line (`#!` interpreter lines and XML declarations).

mod filters;
pub mod styles;
mod wildcard;

use std::path::Path;

pub use filters::{SyntaxFilterSet, is_valid_filter_string};

use crate::app::infrastructure::error::Result;
use crate::app::infrastructure::platform::file_system_is_case_sensitive;

const BACKUP_EXTENSIONS: &[&str] = &[".bak", ".old", ".orig"];

pub struct SyntaxStyleResolver {
    filters: SyntaxFilterSet,
    case_sensitive: bool,
}

impl Default for SyntaxStyleResolver {
    fn default() -> Self {
        Self::new(SyntaxFilterSet::default())
    }
}

impl SyntaxStyleResolver {
    pub fn new(filters: SyntaxFilterSet) -> Self {
        Self {
            filters,
            case_sensitive: file_system_is_case_sensitive(),
        }
    }

    pub fn with_case_sensitivity(mut self, case_sensitive: bool) -> Self {
        self.case_sensitive = case_sensitive;
        self
    }

    pub fn filters(&self) -> &SyntaxFilterSet {
        &self.filters
    }

    pub fn set_filters(&mut self, filters: SyntaxFilterSet) {
        self.filters = filters;
    }

    /// Replace the live filters from their serialized form.
    /// An invalid string leaves the current filters untouched.
    pub fn apply_filter_string(&mut self, serialized: &str) -> Result<()> {
        let parsed = SyntaxFilterSet::parse(serialized)?;
        self.filters = parsed;
        Ok(())
    }

    /// Style for a file name, or [`styles::NONE`] when no filter matches.
    pub fn style_for_file(&self, file_name: &str, ignore_backup_extensions: bool) -> &str {
        let name = Path::new(file_name)
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(file_name);
        let name = if ignore_backup_extensions {
            strip_backup_extension(name)
        } else {
            name
        };
        let name = if self.case_sensitive {
            name.to_string()
        } else {
            name.to_lowercase()
        };

        for (style, patterns) in self.filters.iter() {
            if let Some(regex) = wildcard::compile(patterns, self.case_sensitive)
                && regex.is_match(&name)
            {
                return style;
            }
        }
        styles::NONE
    }

    /// Style for a document: file name first, then content sniffing for
    /// extension-less files when `guess_content_type` is set.
    pub fn resolve(
        &self,
        file_name: &str,
        first_line: Option<&str>,
        ignore_backup_extensions: bool,
        guess_content_type: bool,
    ) -> String {
        let style = self.style_for_file(file_name, ignore_backup_extensions);
        if style != styles::NONE || !guess_content_type {
            return style.to_string();
        }
        let base = if ignore_backup_extensions {
            strip_backup_extension(file_name)
        } else {
            file_name
        };
        let has_extension = Path::new(base).extension().is_some();
        match first_line {
            Some(line) if !has_extension => guess_style_from_content(line).to_string(),
            _ => styles::NONE.to_string(),
        }
    }
}

/// Drop one trailing `.bak`, `.old` or `.orig` (any case).
pub fn strip_backup_extension(name: &str) -> &str {
    for ext in BACKUP_EXTENSIONS {
        if name.len() <= ext.len() {
            continue;
        }
        let cut = name.len() - ext.len();
        if name.is_char_boundary(cut) && name[cut..].eq_ignore_ascii_case(ext) {
            return &name[..cut];
        }
    }
    name
}

/// Guess a style from a file's first line.
pub fn guess_style_from_content(first_line: &str) -> &'static str {
    let line = first_line.trim_end();

    if let Some(command) = line.strip_prefix("#!") {
        let mut words = command.split_whitespace();
        let mut interpreter = words.next().unwrap_or("");
        if interpreter == "env" || interpreter.ends_with("/env") {
            interpreter = words.find(|w| !w.starts_with('-')).unwrap_or("");
        }
        let program = interpreter.rsplit('/').next().unwrap_or(interpreter);
        // python3.12 -> python, perl5 -> perl
        let program = program.trim_end_matches(|c: char| c.is_ascii_digit() || c == '.');
        return match program {
            "perl" => styles::PERL,
            "php" => styles::PHP,
            "python" => styles::PYTHON,
            "lua" => styles::LUA,
            "ruby" => styles::RUBY,
            p if p.ends_with("sh") => styles::UNIX_SHELL,
            _ => styles::NONE,
        };
    }

    if line.starts_with("<?xml") && line.ends_with("?>") {
        return styles::XML;
    }
    styles::NONE
}
