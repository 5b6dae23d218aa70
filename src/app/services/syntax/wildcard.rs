use regex_lite::{Regex, RegexBuilder};

/// Translate one wildcard pattern into an unanchored regex fragment.
///
/// `*` matches any run of characters and `?` a single character; every
/// other character is literal.
pub fn wildcard_to_regex(pattern: &str) -> String {
    let mut out = String::with_capacity(pattern.len() * 2);
    for ch in pattern.chars() {
        match ch {
            '*' => out.push_str(".*"),
            '?' => out.push('.'),
            other => {
                let mut buf = [0u8; 4];
                out.push_str(&regex_lite::escape(other.encode_utf8(&mut buf)));
            }
        }
    }
    out
}

/// Compile a set of wildcard patterns into one anchored regex.
///
/// Returns `None` for an empty set.
pub fn compile(patterns: &[String], case_sensitive: bool) -> Option<Regex> {
    if patterns.is_empty() {
        return None;
    }
    let alternatives: Vec<String> = patterns.iter().map(|p| wildcard_to_regex(p)).collect();
    let source = format!("^(?:{})$", alternatives.join("|"));
    match RegexBuilder::new(&source)
        .case_insensitive(!case_sensitive)
        .build()
    {
        Ok(regex) => Some(regex),
        Err(e) => {
            tracing::warn!("Could not compile wildcard set {:?}: {}", patterns, e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pats(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_literal_dots_and_dollars_are_escaped() {
        let re = compile(&pats(&["a$b.c"]), true).unwrap();
        assert!(re.is_match("a$b.c"));
        assert!(!re.is_match("a$bxc"));
    }

    #[test]
    fn test_star_and_question_mark() {
        let re = compile(&pats(&["*.java", "make?ile"]), true).unwrap();
        assert!(re.is_match("Main.java"));
        assert!(re.is_match(".java"));
        assert!(re.is_match("makefile"));
        assert!(!re.is_match("makfile"));
        assert!(!re.is_match("Main.javax"));
    }

    #[test]
    fn test_case_insensitive_compile() {
        let re = compile(&pats(&["*.c"]), false).unwrap();
        assert!(re.is_match("X.C"));
        let re = compile(&pats(&["*.c"]), true).unwrap();
        assert!(!re.is_match("X.C"));
    }

    #[test]
    fn test_empty_set_compiles_to_none() {
        assert!(compile(&[], true).is_none());
    }
}
