use std::collections::HashMap;
use std::path::Path;

use super::text_ops::extract_filename;

/// One document as seen by [`renumber`].
#[derive(Debug, Clone, Copy)]
pub struct NameEntry<'a> {
    pub path: &'a Path,
    pub dirty: bool,
}

/// Compute a display name for every entry, in order.
///
/// Entries sharing a file name get `name (k)`, `k` counting from 1 in list
/// order; a dirty entry ends with `*`. The result depends only on the input.
pub fn renumber(entries: &[NameEntry<'_>]) -> Vec<String> {
    let names: Vec<String> = entries
        .iter()
        .map(|e| extract_filename(&e.path.to_string_lossy()))
        .collect();

    let mut totals: HashMap<&str, usize> = HashMap::new();
    for name in &names {
        *totals.entry(name.as_str()).or_default() += 1;
    }

    let mut seen: HashMap<&str, usize> = HashMap::new();
    names
        .iter()
        .zip(entries)
        .map(|(name, entry)| {
            let mut display = if totals[name.as_str()] > 1 {
                let k = seen.entry(name.as_str()).or_default();
                *k += 1;
                format!("{} ({})", name, k)
            } else {
                name.clone()
            };
            if entry.dirty {
                display.push('*');
            }
            display
        })
        .collect()
}
