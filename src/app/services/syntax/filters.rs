use std::fmt;

use super::styles::DEFAULT_FILTERS;
use crate::app::infrastructure::error::{AppError, Result};

/// Returns true if `filters` only uses characters allowed in a filter string.
pub fn is_valid_filter_string(filters: &str) -> bool {
    filters
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, ' ' | '*' | '?' | '.' | '-' | '_' | '$'))
}

/// Ordered mapping of style identifier to wildcard file name patterns.
///
/// Serialized form is a single comma-delimited string alternating style and
/// space-separated patterns: `text/c,*.c *.h,text/java,*.java`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxFilterSet {
    entries: Vec<(String, Vec<String>)>,
}

impl Default for SyntaxFilterSet {
    fn default() -> Self {
        let mut set = Self::empty();
        for (style, filters) in DEFAULT_FILTERS {
            set.entries.push((style.to_string(), split_patterns(filters)));
        }
        set
    }
}

impl SyntaxFilterSet {
    pub fn empty() -> Self {
        Self { entries: Vec::new() }
    }

    /// Parse the serialized form, rejecting it whole on any invalid entry.
    pub fn parse(serialized: &str) -> Result<Self> {
        let mut set = Self::empty();
        if serialized.trim().is_empty() {
            return Ok(set);
        }
        let tokens: Vec<&str> = serialized.split(',').collect();
        if tokens.len() % 2 != 0 {
            return Err(AppError::InvalidFilter(format!(
                "expected style/filter pairs, found {} fields",
                tokens.len()
            )));
        }
        for pair in tokens.chunks_exact(2) {
            set.set_filters(pair[0].trim(), pair[1])?;
        }
        Ok(set)
    }

    /// Replace the patterns for `style`, appending the style if it is new.
    pub fn set_filters(&mut self, style: &str, filters: &str) -> Result<()> {
        if style.is_empty() || style.contains(char::is_whitespace) {
            return Err(AppError::InvalidFilter(format!("bad style identifier {:?}", style)));
        }
        if !is_valid_filter_string(filters) {
            return Err(AppError::InvalidFilter(format!(
                "{:?} contains characters outside A-Za-z0-9 *?.-_$",
                filters
            )));
        }
        let patterns = split_patterns(filters);
        match self.entries.iter_mut().find(|(s, _)| s == style) {
            Some((_, existing)) => *existing = patterns,
            None => self.entries.push((style.to_string(), patterns)),
        }
        Ok(())
    }

    pub fn filters_for(&self, style: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(s, _)| s == style)
            .map(|(_, patterns)| patterns.as_slice())
    }

    /// Space-joined patterns for `style`, as shown in an options editor.
    pub fn filter_string(&self, style: &str) -> String {
        self.filters_for(style).map(|p| p.join(" ")).unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(s, p)| (s.as_str(), p.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn restore_defaults(&mut self) {
        *self = Self::default();
    }
}

impl fmt::Display for SyntaxFilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (style, patterns)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{},{}", style, patterns.join(" "))?;
        }
        Ok(())
    }
}

fn split_patterns(filters: &str) -> Vec<String> {
    filters.split_whitespace().map(str::to_string).collect()
}
