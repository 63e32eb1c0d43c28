//! Language detection
//!
//! Maps file extensions to a fixed set of language tags. The detected set is
//! what hooks use to decide which language-specific linters and test runners
//! to invoke; the File-Size rule also uses it to tell source code apart from
//! documentation, configuration and binaries.

use crate::files::FileRecord;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Language of a source file
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Typescript,
    Javascript,
    Python,
    Java,
    Go,
    Rust,
    Cpp,
    Unknown,
}

/// Extensions per language, lower-case with leading dot
const LANGUAGE_EXTENSIONS: &[(LanguageTag, &[&str])] = &[
    (LanguageTag::Typescript, &[".ts", ".tsx", ".mts", ".cts"]),
    (LanguageTag::Javascript, &[".js", ".jsx", ".mjs", ".cjs"]),
    (LanguageTag::Python, &[".py", ".pyi"]),
    (LanguageTag::Java, &[".java"]),
    (LanguageTag::Go, &[".go"]),
    (LanguageTag::Rust, &[".rs"]),
    (
        LanguageTag::Cpp,
        &[".c", ".cc", ".cpp", ".cxx", ".h", ".hh", ".hpp", ".hxx"],
    ),
];

impl LanguageTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            LanguageTag::Typescript => "typescript",
            LanguageTag::Javascript => "javascript",
            LanguageTag::Python => "python",
            LanguageTag::Java => "java",
            LanguageTag::Go => "go",
            LanguageTag::Rust => "rust",
            LanguageTag::Cpp => "cpp",
            LanguageTag::Unknown => "unknown",
        }
    }

    /// Look up the tag for an extension such as `.ts`
    pub fn from_extension(extension: &str) -> Self {
        LANGUAGE_EXTENSIONS
            .iter()
            .find(|(_, extensions)| extensions.contains(&extension))
            .map(|(tag, _)| *tag)
            .unwrap_or(LanguageTag::Unknown)
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify one file by extension. Never fails; unrecognized files are `Unknown`.
pub fn classify(record: &FileRecord) -> LanguageTag {
    LanguageTag::from_extension(record.extension())
}

/// Set of known languages present in `records`, `Unknown` excluded
pub fn classify_all<'a, I>(records: I) -> BTreeSet<LanguageTag>
where
    I: IntoIterator<Item = &'a FileRecord>,
{
    records
        .into_iter()
        .map(classify)
        .filter(|tag| *tag != LanguageTag::Unknown)
        .collect()
}

/// Whether the record is source code in one of the recognized languages
pub fn is_source(record: &FileRecord) -> bool {
    classify(record) != LanguageTag::Unknown
}
