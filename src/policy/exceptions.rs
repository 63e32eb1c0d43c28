//! Exception patterns
//!
//! Policy files list glob-style patterns, one per line, that exempt matching
//! paths from the file-size rule. Patterns are translated to anchored
//! regular expressions:
//!
//! - `*` matches any run of characters within one path segment
//! - `**` matches any run of characters across segments, and `**/` also
//!   matches no directory at all
//! - `?` matches exactly one character, `/` included
//! - everything else is literal (including `.`)
//!
//! So `src/generated/*.ts` exempts `src/generated/models.ts` but not
//! `src/generated/sub/models.ts`; use `src/generated/**.ts` for both.

use anyhow::{Context, Result};
use regex::Regex;
use std::fs;
use std::path::Path;

/// File looked up at the repository root when no exception file is configured
pub const DEFAULT_EXCEPTIONS_FILE: &str = ".repolint-exceptions";

/// Extract patterns from policy file content
///
/// Blank lines and lines whose first non-whitespace character is `#` are
/// skipped; everything else is trimmed and kept.
pub fn parse_pattern_lines(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_string)
        .collect()
}

/// Read a policy file and extract its patterns
pub fn load_patterns(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read policy file: {}", path.display()))?;
    Ok(parse_pattern_lines(&content))
}

/// Translate a glob pattern into an anchored regular expression
pub fn glob_to_regex(pattern: &str) -> String {
    let mut regex = String::with_capacity(pattern.len() * 2 + 2);
    let mut literal = String::new();
    let mut chars = pattern.chars().peekable();

    regex.push('^');
    while let Some(c) = chars.next() {
        match c {
            '*' | '?' => {
                regex.push_str(&regex::escape(&literal));
                literal.clear();

                if c == '?' {
                    regex.push('.');
                } else if chars.peek() == Some(&'*') {
                    chars.next();
                    if chars.peek() == Some(&'/') {
                        chars.next();
                        regex.push_str("(?:.*/)?");
                    } else {
                        regex.push_str(".*");
                    }
                } else {
                    regex.push_str("[^/]*");
                }
            }
            _ => literal.push(c),
        }
    }
    regex.push_str(&regex::escape(&literal));
    regex.push('$');

    regex
}

#[derive(Debug, Clone)]
struct CompiledPattern {
    source: String,
    regex: Regex,
}

/// Compiled set of exception patterns
///
/// A path is exempt when any pattern matches it in full. An empty matcher
/// exempts nothing.
#[derive(Debug, Clone, Default)]
pub struct ExceptionMatcher {
    patterns: Vec<CompiledPattern>,
}

impl ExceptionMatcher {
    /// Matcher that exempts nothing
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compile patterns; fails naming the first pattern that cannot be compiled
    pub fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Self> {
        let patterns = patterns
            .iter()
            .map(|pattern| {
                let source = pattern.as_ref().to_string();
                let regex = Regex::new(&glob_to_regex(&source))
                    .with_context(|| format!("Invalid exception pattern '{source}'"))?;
                Ok(CompiledPattern { source, regex })
            })
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!("Compiled {} exception patterns", patterns.len());
        Ok(Self { patterns })
    }

    /// Read and compile a policy file
    pub fn load(path: &Path) -> Result<Self> {
        Self::compile(&load_patterns(path)?)
            .with_context(|| format!("Invalid exception file: {}", path.display()))
    }

    /// Whether `path` (root-relative, `/`-separated) is exempt
    pub fn matches(&self, path: &str) -> bool {
        self.matching_pattern(path).is_some()
    }

    /// The first pattern exempting `path`, if any
    pub fn matching_pattern(&self, path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .find(|pattern| pattern.regex.is_match(path))
            .map(|pattern| pattern.source.as_str())
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}
