//! @ai:module:intent Parse annotation messages into structured records
//! @ai:module:layer application
//! @ai:module:public_api parse_message, parse_annotation
//! @ai:module:depends_on annotation
//! @ai:module:stateless true
//!
//! Message grammar, scanned left to right in a single pass:
//!
//! ```text
//! standard-id := UPPER+ DIGIT+ "." DIGIT DIGIT? LOWER?      (anywhere)
//! line        := "line#" DIGIT+                              (first wins)
//! function    := "function" WS* "'" name "'"                 (first wins)
//! file        := "file" WS* "[" path "]" END                 (must end the text)
//! ```
//!
//! Quoted function names and bracketed file paths are consumed whole, so
//! identifier-shaped text inside them is not taken as a standard.

use crate::annotation::{sort_standard_ids, AnnotationRecord, RawAnnotation, TagKind};

/// @ai:intent Fields recovered from one message, before classification
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedMessage {
    pub standard_ids: Vec<String>,
    pub line_number: Option<u32>,
    pub function_name: Option<String>,
    pub source_file: Option<String>,
}

/// @ai:intent Parse a collected annotation into an immutable record
/// @ai:effects pure
pub fn parse_annotation(raw: &RawAnnotation, kind: TagKind) -> AnnotationRecord {
    let parsed = parse_message(&raw.text);

    if parsed.source_file.is_none() {
        tracing::warn!("No file path found in annotation: {}", raw.text);
    }

    AnnotationRecord {
        tag_kind: kind,
        source_file: parsed.source_file,
        function_name: parsed.function_name,
        line_number: parsed.line_number,
        standard_ids: parsed.standard_ids,
        directory: raw.directory.clone(),
    }
}

/// @ai:intent Parse one message; sub-matches that fail leave their field empty
/// @ai:example ("[G1.1, G1.1] of file [R/a.R]") -> ids ["G1.1"], file "R/a.R"
/// @ai:effects pure
pub fn parse_message(text: &str) -> ParsedMessage {
    let mut cursor = Cursor::new(text);
    let mut parsed = ParsedMessage::default();
    let mut line_seen = false;

    while !cursor.at_end() {
        if let Some(id) = cursor.standard_id() {
            parsed.standard_ids.push(id.to_string());
        } else if cursor.literal("line#") {
            if let Some(digits) = cursor.digits() {
                if !line_seen {
                    line_seen = true;
                    parsed.line_number = digits.parse().ok();
                }
            }
        } else if cursor.word("function") {
            cursor.skip_whitespace();
            if let Some(name) = cursor.delimited(b'\'', b'\'') {
                parsed.function_name.get_or_insert_with(|| name.to_string());
            }
        } else if cursor.word("file") {
            cursor.skip_whitespace();
            if let Some(path) = cursor.delimited(b'[', b']') {
                if cursor.rest().trim().is_empty() && !path.trim().is_empty() {
                    parsed.source_file = Some(path.trim().to_string());
                }
            }
        } else {
            cursor.bump();
        }
    }

    sort_standard_ids(&mut parsed.standard_ids);
    parsed
}

/// Byte cursor; every token boundary sits on an ASCII byte, so slicing is safe.
struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn peek_at(&self, pos: usize) -> Option<u8> {
        self.text.as_bytes().get(pos).copied()
    }

    fn bump(&mut self) {
        let step = self.rest().chars().next().map(char::len_utf8).unwrap_or(1);
        self.pos += step;
    }

    fn skip_whitespace(&mut self) {
        while self.peek_at(self.pos).is_some_and(|b| b.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    /// Advance past `count` bytes matching `pred`, up to `max`; returns how many.
    fn take_while(&self, start: usize, max: usize, pred: impl Fn(u8) -> bool) -> usize {
        let mut n = 0;
        while n < max && self.peek_at(start + n).is_some_and(&pred) {
            n += 1;
        }
        n
    }

    fn standard_id(&mut self) -> Option<&'a str> {
        let start = self.pos;
        let mut end = start;

        let letters = self.take_while(end, usize::MAX, |b| b.is_ascii_uppercase());
        if letters == 0 {
            return None;
        }
        end += letters;

        let major = self.take_while(end, usize::MAX, |b| b.is_ascii_digit());
        if major == 0 || self.peek_at(end + major) != Some(b'.') {
            return None;
        }
        end += major + 1;

        let minor = self.take_while(end, 2, |b| b.is_ascii_digit());
        if minor == 0 {
            return None;
        }
        end += minor;
        end += self.take_while(end, 1, |b| b.is_ascii_lowercase());

        self.pos = end;
        Some(&self.text[start..end])
    }

    fn literal(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn word(&mut self, token: &str) -> bool {
        let preceded_by_word = self.pos > 0
            && self
                .peek_at(self.pos - 1)
                .is_some_and(|b| b.is_ascii_alphanumeric() || b == b'_');
        !preceded_by_word && self.literal(token)
    }

    fn digits(&mut self) -> Option<&'a str> {
        let n = self.take_while(self.pos, usize::MAX, |b| b.is_ascii_digit());
        if n == 0 {
            return None;
        }
        let digits = &self.text[self.pos..self.pos + n];
        self.pos += n;
        Some(digits)
    }

    fn delimited(&mut self, open: u8, close: u8) -> Option<&'a str> {
        if self.peek_at(self.pos) != Some(open) {
            return None;
        }
        let body_start = self.pos + 1;
        let len = self.text[body_start..].find(close as char)?;
        self.pos = body_start + len + 1;
        Some(&self.text[body_start..body_start + len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_message() {
        let parsed = parse_message(
            "Standards addressed: G1.1, G1.1a, EA2.0 in function 'foo' on line#42 of file [R/bar.R]",
        );
        assert_eq!(parsed.standard_ids, vec!["G1.1", "G1.1a", "EA2.0"]);
        assert_eq!(parsed.function_name.as_deref(), Some("foo"));
        assert_eq!(parsed.line_number, Some(42));
        assert_eq!(parsed.source_file.as_deref(), Some("R/bar.R"));
    }

    #[test]
    fn test_duplicates_and_general_precedence() {
        let parsed = parse_message("Standards [X1.1, X1.1, G2.3] of file [R/a.R]");
        assert_eq!(parsed.standard_ids, vec!["G2.3", "X1.1"]);
    }

    #[test]
    fn test_optional_fields_absent() {
        let parsed = parse_message("Standards [G1.0]");
        assert_eq!(parsed.line_number, None);
        assert_eq!(parsed.function_name, None);
        assert_eq!(parsed.source_file, None);
    }

    #[test]
    fn test_first_line_number_wins() {
        let parsed = parse_message("G1.0 on line#7 and line#9 of file [a.R]");
        assert_eq!(parsed.line_number, Some(7));
    }

    #[test]
    fn test_overflowing_line_number_still_counts_as_first() {
        let parsed = parse_message("G1.0 on line#99999999999 and line#5 of file [a.R]");
        assert_eq!(parsed.line_number, None);
        assert_eq!(parsed.source_file.as_deref(), Some("a.R"));
    }

    #[test]
    fn test_function_requires_quotes() {
        let parsed = parse_message("G1.0 in function foo of file [a.R]");
        assert_eq!(parsed.function_name, None);
        let parsed = parse_message("G1.0 in dysfunction 'foo' of file [a.R]");
        assert_eq!(parsed.function_name, None);
    }

    #[test]
    fn test_file_must_end_text() {
        let parsed = parse_message("G1.0 of file [R/a.R] trailing words");
        assert_eq!(parsed.source_file, None);
    }

    #[test]
    fn test_identifier_shapes() {
        let parsed = parse_message("G1.0 RE10.12b G1. g1.0");
        assert_eq!(parsed.standard_ids, vec!["G1.0", "RE10.12b"]);

        let parsed = parse_message("see G1.123 and TS2.4zz");
        assert_eq!(parsed.standard_ids, vec!["G1.12", "TS2.4z"]);
    }

    #[test]
    fn test_non_ascii_text_is_skipped() {
        let parsed = parse_message("Standards — G1.0 für function 'näive' of file [R/ä.R]");
        assert_eq!(parsed.standard_ids, vec!["G1.0"]);
        assert_eq!(parsed.function_name.as_deref(), Some("näive"));
        assert_eq!(parsed.source_file.as_deref(), Some("R/ä.R"));
    }

    #[test]
    fn test_parse_annotation_carries_kind_and_directory() {
        let raw = RawAnnotation {
            text: "Standards [G1.0] on line#3 of file [tests/test-a.R]".to_string(),
            directory: "tests".to_string(),
        };
        let record = parse_annotation(&raw, TagKind::Pending);
        assert_eq!(record.tag_kind, TagKind::Pending);
        assert_eq!(record.directory, "tests");
        assert_eq!(record.line_number, Some(3));
    }
}
