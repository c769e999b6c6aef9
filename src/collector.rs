//! @ai:module:intent Collect tagged standards annotations from documentation blocks
//! @ai:module:layer application
//! @ai:module:public_api collect, annotation_message
//! @ai:module:depends_on scanner, annotation
//! @ai:module:stateless true

use crate::annotation::{directory_of, RawAnnotation, TagKind};
use crate::scanner::DocBlock;

/// @ai:intent Collect every annotation of one tag kind, in scan order
/// @ai:post one entry per tag line; order follows file order, then line order
/// @ai:effects pure
pub fn collect(blocks: &[DocBlock], kind: TagKind) -> Vec<RawAnnotation> {
    let mut annotations = Vec::new();

    for doc in blocks {
        let lines = &doc.block.lines;

        for (idx, line) in lines.iter().enumerate() {
            let Some((tag, payload)) = split_tag(&line.content) else {
                continue;
            };
            if TagKind::from_tag(tag) != Some(kind) {
                continue;
            }

            let continuation = lines[idx + 1..].iter().map(|l| l.content.as_str());
            let ids = identifier_list(payload, continuation);

            annotations.push(RawAnnotation {
                text: annotation_message(
                    &ids,
                    doc.function.as_deref(),
                    Some(line.line_number),
                    &doc.file,
                ),
                directory: directory_of(&doc.file),
            });
        }
    }

    tracing::debug!("Collected {} @{} annotations", annotations.len(), kind.tag());
    annotations
}

/// @ai:intent Render the annotation message interchange text
/// @ai:example (["G1.0"], Some("fit"), Some(4), "R/fit.R") -> "Standards [G1.0] in function 'fit' on line#4 of file [R/fit.R]"
/// @ai:effects pure
pub fn annotation_message(
    ids: &[String],
    function: Option<&str>,
    line: Option<usize>,
    file: &str,
) -> String {
    let mut message = format!("Standards [{}]", ids.join(", "));
    if let Some(function) = function {
        message.push_str(&format!(" in function '{}'", function));
    }
    if let Some(line) = line {
        message.push_str(&format!(" on line#{}", line));
    }
    message.push_str(&format!(" of file [{}]", file));
    message
}

/// @ai:intent Split `@tag rest` into its tag word and payload
/// @ai:example ("@srrstats{G1.0}") -> Some(("srrstats", "{G1.0}"))
/// @ai:effects pure
fn split_tag(content: &str) -> Option<(&str, &str)> {
    let rest = content.strip_prefix('@')?;
    let end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    Some((&rest[..end], rest[end..].trim()))
}

/// @ai:intent Pull identifier tokens out of a tag payload
/// @ai:post braced lists may continue on following lines until `}` or the next tag
/// @ai:effects pure
fn identifier_list<'a>(payload: &str, continuation: impl Iterator<Item = &'a str>) -> Vec<String> {
    let Some(open) = payload.strip_prefix('{') else {
        return tokens(payload);
    };

    if let Some((inside, _)) = open.split_once('}') {
        return tokens(inside);
    }

    let mut inside = open.to_string();
    for next in continuation {
        if next.starts_with('@') {
            break;
        }
        match next.split_once('}') {
            Some((tail, _)) => {
                inside.push(' ');
                inside.push_str(tail);
                break;
            }
            None => {
                inside.push(' ');
                inside.push_str(next);
            }
        }
    }
    tokens(&inside)
}

fn tokens(list: &str) -> Vec<String> {
    list.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner::{CommentBlock, CommentLine};

    fn doc(file: &str, function: Option<&str>, lines: &[(usize, &str)]) -> DocBlock {
        DocBlock {
            file: file.to_string(),
            function: function.map(str::to_string),
            block: CommentBlock {
                lines: lines
                    .iter()
                    .map(|(n, c)| CommentLine {
                        line_number: *n,
                        content: c.to_string(),
                    })
                    .collect(),
                start_line: lines.first().map(|l| l.0).unwrap_or(0),
                end_line: lines.last().map(|l| l.0).unwrap_or(0),
            },
        }
    }

    #[test]
    fn test_collect_by_kind_in_order() {
        let blocks = vec![
            doc(
                "R/fit.R",
                Some("fit"),
                &[
                    (1, "Fit a model"),
                    (2, "@srrstats {G1.0, G1.1} documented"),
                    (3, "@srrstatsNA {RE2.0} not relevant"),
                    (4, "@srrstats {G2.0}"),
                ],
            ),
            doc("main.R", None, &[(7, "@srrstats {G3.0}")]),
        ];

        let addressed = collect(&blocks, TagKind::Addressed);
        assert_eq!(addressed.len(), 3);
        assert_eq!(
            addressed[0].text,
            "Standards [G1.0, G1.1] in function 'fit' on line#2 of file [R/fit.R]"
        );
        assert_eq!(addressed[0].directory, "R");
        assert_eq!(addressed[1].text, "Standards [G2.0] in function 'fit' on line#4 of file [R/fit.R]");
        assert_eq!(addressed[2].text, "Standards [G3.0] on line#7 of file [main.R]");
        assert_eq!(addressed[2].directory, "root");

        let not_applicable = collect(&blocks, TagKind::NotApplicable);
        assert_eq!(not_applicable.len(), 1);
        assert!(collect(&blocks, TagKind::Pending).is_empty());
    }

    #[test]
    fn test_multiline_braced_list() {
        let blocks = vec![doc(
            "R/a.R",
            None,
            &[(1, "@srrstatsTODO {G1.0,"), (2, "G1.1, G1.2} later"), (3, "@export")],
        )];

        let pending = collect(&blocks, TagKind::Pending);
        assert_eq!(pending.len(), 1);
        assert!(pending[0].text.starts_with("Standards [G1.0, G1.1, G1.2]"));
    }

    #[test]
    fn test_tag_directly_followed_by_brace() {
        let blocks = vec![doc("R/a.R", None, &[(2, "@srrstats{G1.0, G1.1}")])];

        let addressed = collect(&blocks, TagKind::Addressed);
        assert_eq!(addressed.len(), 1);
        assert_eq!(addressed[0].text, "Standards [G1.0, G1.1] on line#2 of file [R/a.R]");
    }

    #[test]
    fn test_similar_tag_names_do_not_match() {
        let blocks = vec![doc("R/a.R", None, &[(1, "@srrstatsVerbose TRUE"), (2, "@srrstatsNAX {G1.0}")])];
        for kind in TagKind::ALL {
            assert!(collect(&blocks, kind).is_empty());
        }
    }
}
