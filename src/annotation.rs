//! @ai:module:intent Define data structures for standards annotations
//! @ai:module:layer domain
//! @ai:module:public_api TagKind, RawAnnotation, AnnotationRecord, category_code, sort_standard_ids
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// Directory label for files sitting directly in the package root.
pub const ROOT_DIRECTORY: &str = "root";

/// @ai:intent Classification of a standards annotation
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    Addressed,
    NotApplicable,
    Pending,
}

impl TagKind {
    /// Fixed rendering order.
    pub const ALL: [TagKind; 3] = [TagKind::Addressed, TagKind::NotApplicable, TagKind::Pending];

    /// @ai:intent Source-level tag word without the leading `@`
    /// @ai:effects pure
    pub fn tag(&self) -> &'static str {
        match self {
            TagKind::Addressed => "srrstats",
            TagKind::NotApplicable => "srrstatsNA",
            TagKind::Pending => "srrstatsTODO",
        }
    }

    /// @ai:intent Resolve a tag word (without `@`) into a kind
    /// @ai:example ("srrstatsNA") -> Some(NotApplicable)
    /// @ai:example ("srrstatsVerbose") -> None
    /// @ai:effects pure
    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }
}

impl std::fmt::Display for TagKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// @ai:intent Annotation message text plus the directory it came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawAnnotation {
    pub text: String,
    pub directory: String,
}

/// @ai:intent One parsed annotation, immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotationRecord {
    pub tag_kind: TagKind,
    pub source_file: Option<String>,
    pub function_name: Option<String>,
    pub line_number: Option<u32>,
    /// Deduplicated, `G` category first, each group alphabetical.
    pub standard_ids: Vec<String>,
    pub directory: String,
}

impl AnnotationRecord {
    /// @ai:intent Category codes referenced by this record, in id order
    /// @ai:effects pure
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.standard_ids.iter().map(|id| category_code(id))
    }
}

/// @ai:intent Leading uppercase letters of a standard identifier
/// @ai:example ("G1.2a") -> "G"
/// @ai:example ("RE4.10") -> "RE"
/// @ai:effects pure
pub fn category_code(id: &str) -> &str {
    let end = id
        .find(|c: char| !c.is_ascii_uppercase())
        .unwrap_or(id.len());
    &id[..end]
}

/// @ai:intent Sort identifiers with the general category first, then dedup
/// @ai:post result has no duplicates
/// @ai:effects pure
pub fn sort_standard_ids(ids: &mut Vec<String>) {
    ids.sort_by(|a, b| {
        let a_general = category_code(a) == "G";
        let b_general = category_code(b) == "G";
        b_general.cmp(&a_general).then_with(|| a.cmp(b))
    });
    ids.dedup();
}

/// @ai:intent Grouping label for a relative file path: first segment, or `root`
/// @ai:example ("R/fit.R") -> "R"
/// @ai:example ("main.R") -> "root"
/// @ai:effects pure
pub fn directory_of(path: &str) -> String {
    match path.split_once('/') {
        Some((first, _)) if !first.is_empty() => first.to_string(),
        _ => ROOT_DIRECTORY.to_string(),
    }
}
