//! @ai:module:intent Define language-specific documentation comment formats
//! @ai:module:layer domain
//! @ai:module:public_api Language, CommentStyle, detect_language, is_supported_file
//! @ai:module:stateless true

use std::path::Path;

/// @ai:intent Represents a supported programming language with its comment syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    R,
    Rust,
    Python,
    TypeScript,
    JavaScript,
    Go,
    Java,
    C,
    Cpp,
}

/// @ai:intent Documentation comment style for a language
#[derive(Debug, Clone)]
pub struct CommentStyle {
    pub doc_line: Vec<&'static str>,
    pub block_start: Option<&'static str>,
    pub block_end: Option<&'static str>,
    pub block_line_prefix: Option<&'static str>,
}

const ALL_LANGUAGES: [Language; 9] = [
    Language::R,
    Language::Rust,
    Language::Python,
    Language::TypeScript,
    Language::JavaScript,
    Language::Go,
    Language::Java,
    Language::C,
    Language::Cpp,
];

impl Language {
    /// @ai:intent Get the documentation comment style for this language
    /// @ai:effects pure
    pub fn comment_style(&self) -> CommentStyle {
        match self {
            Language::R => CommentStyle {
                doc_line: vec!["#'"],
                block_start: None,
                block_end: None,
                block_line_prefix: None,
            },
            Language::Rust => CommentStyle {
                doc_line: vec!["///", "//!"],
                block_start: Some("/**"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
            Language::Python => CommentStyle {
                doc_line: vec!["#"],
                block_start: None,
                block_end: None,
                block_line_prefix: None,
            },
            Language::TypeScript | Language::JavaScript | Language::Go => CommentStyle {
                doc_line: vec!["//"],
                block_start: Some("/**"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
            Language::Java => CommentStyle {
                doc_line: vec!["///", "//"],
                block_start: Some("/**"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
            Language::C | Language::Cpp => CommentStyle {
                doc_line: vec!["//'", "///", "//"],
                block_start: Some("/**"),
                block_end: Some("*/"),
                block_line_prefix: Some("*"),
            },
        }
    }

    /// @ai:intent Get file extensions for this language
    /// @ai:effects pure
    pub fn extensions(&self) -> &[&str] {
        match self {
            Language::R => &["R", "r"],
            Language::Rust => &["rs"],
            Language::Python => &["py", "pyi"],
            Language::TypeScript => &["ts", "tsx"],
            Language::JavaScript => &["js", "jsx", "mjs"],
            Language::Go => &["go"],
            Language::Java => &["java"],
            Language::C => &["c", "h"],
            Language::Cpp => &["cpp", "cc", "cxx", "hpp", "hh", "hxx"],
        }
    }

    /// @ai:intent Regex matching a function definition line, capturing the name in group 1
    /// @ai:effects pure
    pub fn function_pattern(&self) -> &'static str {
        match self {
            Language::R => r"^\s*([A-Za-z.][\w.]*)\s*(?:<-|=)\s*function\b",
            Language::Rust => r"^\s*(?:pub(?:\([^)]*\))?\s+)?(?:const\s+)?(?:async\s+)?(?:unsafe\s+)?fn\s+(\w+)",
            Language::Python => r"^\s*(?:async\s+)?def\s+(\w+)",
            Language::TypeScript | Language::JavaScript => {
                r"^\s*(?:export\s+)?(?:async\s+)?function\s+(\w+)"
            }
            Language::Go => r"^\s*func\s+(?:\([^)]*\)\s+)?(\w+)",
            Language::Java => {
                r"^\s*(?:public|private|protected)?\s*(?:static\s+)?(?:\w+\s+)+(\w+)\s*\("
            }
            Language::C | Language::Cpp => r"^\s*(?:\w+\s+)+(\w+)\s*\(",
        }
    }
}

/// @ai:intent Detect the programming language from a file path
/// @ai:example ("R/fit.R") -> Some(R)
/// @ai:example ("src/lib.rs") -> Some(Rust)
/// @ai:example ("README.md") -> None
/// @ai:effects pure
pub fn detect_language(path: &Path) -> Option<Language> {
    let ext = path.extension()?.to_str()?;

    ALL_LANGUAGES
        .into_iter()
        .find(|lang| lang.extensions().contains(&ext))
}

/// @ai:intent Check if a file should be scanned based on extension
/// @ai:effects pure
pub fn is_supported_file(path: &Path) -> bool {
    detect_language(path).is_some()
}
