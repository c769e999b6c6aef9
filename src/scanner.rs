//! @ai:module:intent Walk a source tree and extract documentation comment blocks
//! @ai:module:layer application
//! @ai:module:public_api scan_directory, scan_file, DocBlock, CommentBlock, CommentLine
//! @ai:module:depends_on language, config, error
//! @ai:module:stateless true

use crate::config::ScanConfig;
use crate::error::{Error, Result};
use crate::language::{detect_language, is_supported_file, CommentStyle, Language};
use regex::Regex;
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// @ai:intent A run of consecutive documentation comment lines
#[derive(Debug, Clone)]
pub struct CommentBlock {
    pub lines: Vec<CommentLine>,
    pub start_line: usize,
    pub end_line: usize,
}

/// @ai:intent One documentation comment line with its marker stripped
#[derive(Debug, Clone)]
pub struct CommentLine {
    pub line_number: usize,
    pub content: String,
}

/// @ai:intent A comment block tagged with its file and the function it documents
#[derive(Debug, Clone)]
pub struct DocBlock {
    /// Path relative to the scanned root, `/`-separated.
    pub file: String,
    pub function: Option<String>,
    pub block: CommentBlock,
}

/// @ai:intent Scan every supported file under root, in sorted walk order
/// @ai:post a missing or empty root yields an empty result, never an error
/// @ai:effects fs:read
pub fn scan_directory(root: &Path, config: &ScanConfig) -> Vec<DocBlock> {
    if !root.is_dir() {
        tracing::warn!("Source directory {} does not exist", root.display());
        return Vec::new();
    }

    let mut blocks = Vec::new();
    let mut files_scanned = 0usize;

    for entry in WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded(e, config))
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_supported_file(e.path()))
    {
        match scan_file(root, entry.path()) {
            Ok(file_blocks) => {
                files_scanned += 1;
                blocks.extend(file_blocks);
            }
            Err(e) => tracing::warn!("Skipping {}: {}", entry.path().display(), e),
        }
    }

    if files_scanned == 0 {
        tracing::warn!("No source files found under {}", root.display());
    } else {
        tracing::info!(
            "Scanned {} files, found {} documentation blocks",
            files_scanned,
            blocks.len()
        );
    }

    blocks
}

/// @ai:intent Extract documentation blocks from one file
/// @ai:pre path is a supported file under root
/// @ai:effects fs:read
pub fn scan_file(root: &Path, path: &Path) -> Result<Vec<DocBlock>> {
    let Some(language) = detect_language(path) else {
        return Ok(Vec::new());
    };

    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let file = relative_path(root, path);
    let blocks = extract_doc_blocks(&content, language);
    let functions = extract_function_locations(&content, language);

    Ok(blocks
        .into_iter()
        .map(|block| DocBlock {
            file: file.clone(),
            function: documented_function(&block, &functions),
            block,
        })
        .collect())
}

fn is_excluded(entry: &DirEntry, config: &ScanConfig) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || config.exclude.iter().any(|ex| *ex == name)
}

/// @ai:intent Render path relative to root with forward slashes
/// @ai:effects pure
fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// @ai:intent Group consecutive documentation comment lines into blocks
/// @ai:effects pure
fn extract_doc_blocks(content: &str, language: Language) -> Vec<CommentBlock> {
    let style = language.comment_style();
    let mut blocks = Vec::new();
    let mut current: Option<CommentBlock> = None;
    let mut in_block_comment = false;

    for (line_idx, line) in content.lines().enumerate() {
        let line_number = line_idx + 1;
        let trimmed = line.trim();

        if let Some(text) = doc_comment_content(trimmed, &style, &mut in_block_comment) {
            let comment_line = CommentLine {
                line_number,
                content: text,
            };

            match &mut current {
                Some(block) => {
                    block.lines.push(comment_line);
                    block.end_line = line_number;
                }
                None => {
                    current = Some(CommentBlock {
                        lines: vec![comment_line],
                        start_line: line_number,
                        end_line: line_number,
                    });
                }
            }
        } else if let Some(block) = current.take() {
            blocks.push(block);
        }
    }

    if let Some(block) = current {
        blocks.push(block);
    }

    blocks
}

/// @ai:intent Strip the documentation marker from a trimmed line
/// @ai:post None when the line is not part of a documentation comment
/// @ai:effects pure
fn doc_comment_content(line: &str, style: &CommentStyle, in_block: &mut bool) -> Option<String> {
    if *in_block {
        let mut body = line;
        if let Some(end) = style.block_end {
            if let Some(stripped) = body.strip_suffix(end) {
                *in_block = false;
                body = stripped;
            }
        }
        if let Some(prefix) = style.block_line_prefix {
            body = body.strip_prefix(prefix).unwrap_or(body);
        }
        return Some(body.trim().to_string());
    }

    for prefix in &style.doc_line {
        if let Some(rest) = line.strip_prefix(prefix) {
            return Some(rest.trim().to_string());
        }
    }

    if let (Some(start), Some(end)) = (style.block_start, style.block_end) {
        if let Some(rest) = line.strip_prefix(start) {
            return match rest.strip_suffix(end) {
                Some(inner) => Some(inner.trim().to_string()),
                None => {
                    *in_block = true;
                    Some(rest.trim().to_string())
                }
            };
        }
    }

    None
}

/// @ai:intent Find (line, name) of every function definition
/// @ai:effects pure
fn extract_function_locations(content: &str, language: Language) -> Vec<(usize, String)> {
    let re = Regex::new(language.function_pattern()).expect("Invalid regex pattern");

    content
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            re.captures(line)
                .and_then(|caps| caps.get(1))
                .map(|m| (idx + 1, m.as_str().to_string()))
        })
        .collect()
}

/// @ai:intent Name the function defined right below a block, allowing one line in between
/// @ai:effects pure
fn documented_function(block: &CommentBlock, functions: &[(usize, String)]) -> Option<String> {
    functions
        .iter()
        .find(|(line, _)| *line == block.end_line + 1 || *line == block.end_line + 2)
        .map(|(_, name)| name.clone())
}
