//! @ai:module:intent Assemble the markdown compliance report and compute missing standards
//! @ai:module:layer application
//! @ai:module:public_api assemble, missing_standards, ReportContext, AssembledReport, MissingCategory
//! @ai:module:depends_on annotation, catalog
//! @ai:module:stateless true

use crate::annotation::{AnnotationRecord, TagKind};
use crate::catalog::{Catalog, Category};
use serde::Serialize;
use std::collections::BTreeSet;

/// Placeholder shown when an annotation carried no parsable file path.
pub const UNKNOWN_FILE: &str = "unknown file";

/// @ai:intent Everything about the package the renderer needs besides records
#[derive(Debug, Clone)]
pub struct ReportContext<'a> {
    pub title: &'a str,
    pub package: &'a str,
    pub remote: Option<&'a str>,
    pub branch: &'a str,
    pub standards_url: &'a str,
}

/// @ai:intent Catalog identifiers of one category that were never rendered
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MissingCategory {
    pub code: String,
    pub title: String,
    pub ids: Vec<String>,
}

/// @ai:intent Rendered lines plus the identifier sets both sections were built from
#[derive(Debug, Clone, Default)]
pub struct AssembledReport {
    pub lines: Vec<String>,
    /// Every identifier that produced a bullet, in any tag section.
    pub rendered_ids: BTreeSet<String>,
    pub missing: Vec<MissingCategory>,
}

/// @ai:intent Render the full report: title, one section per tag kind, missing standards
/// @ai:post sections without renderable records are omitted entirely
/// @ai:post no identifier appears both as a bullet and in the missing section
/// @ai:effects pure
pub fn assemble(
    records: &[AnnotationRecord],
    catalog: &Catalog,
    ctx: &ReportContext<'_>,
) -> AssembledReport {
    let mut report = AssembledReport {
        lines: title_block(ctx),
        ..Default::default()
    };

    for kind in TagKind::ALL {
        let section = render_section(kind, records, catalog, ctx, &mut report.rendered_ids);
        report.lines.extend(section);
    }

    report.missing = missing_standards(catalog, &report.rendered_ids);
    report.lines.extend(missing_section(&report.missing));
    report
}

/// @ai:intent Catalog ids absent from the rendered set, grouped in catalog order
/// @ai:effects pure
pub fn missing_standards(catalog: &Catalog, rendered: &BTreeSet<String>) -> Vec<MissingCategory> {
    catalog
        .checklists()
        .iter()
        .filter_map(|checklist| {
            let ids: Vec<String> = checklist
                .ids
                .iter()
                .filter(|id| !rendered.contains(*id))
                .cloned()
                .collect();
            (!ids.is_empty()).then(|| missing_category(&checklist.category, ids))
        })
        .collect()
}

fn missing_category(category: &Category, ids: Vec<String>) -> MissingCategory {
    MissingCategory {
        code: category.code.clone(),
        title: category.title(),
        ids,
    }
}

fn title_block(ctx: &ReportContext<'_>) -> Vec<String> {
    let package = match ctx.remote {
        Some(remote) => format!("[{}]({})", ctx.package, remote),
        None => ctx.package.to_string(),
    };

    vec![
        format!("# {} for {}", ctx.title, package),
        String::new(),
        format!("[Click here for full text of all standards]({})", ctx.standards_url),
        String::new(),
    ]
}

/// @ai:intent Render one tag section grouped by directory in first-seen order
/// @ai:effects pure
fn render_section(
    kind: TagKind,
    records: &[AnnotationRecord],
    catalog: &Catalog,
    ctx: &ReportContext<'_>,
    rendered: &mut BTreeSet<String>,
) -> Vec<String> {
    let mut groups: Vec<(&str, Vec<String>)> = Vec::new();

    for record in records.iter().filter(|r| r.tag_kind == kind) {
        let ids: Vec<&String> = record
            .standard_ids
            .iter()
            .filter(|id| catalog.contains(id))
            .collect();
        if ids.is_empty() {
            tracing::debug!("No catalog standards left for record in {:?}", record.source_file);
            continue;
        }

        let mut block = vec![record_header(record, ctx), String::new()];
        for id in ids {
            let description = catalog.description(id).unwrap_or_default();
            block.push(format!("- {} {}", id, description).trim_end().to_string());
            rendered.insert(id.clone());
        }
        block.push(String::new());

        match groups.iter_mut().find(|(dir, _)| *dir == record.directory) {
            Some((_, lines)) => lines.extend(block),
            None => groups.push((record.directory.as_str(), block)),
        }
    }

    if groups.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![format!("## Standards with `{}` tag", kind.tag()), String::new()];
    for (dir, block) in groups {
        lines.push(format!("### {} directory", dir));
        lines.push(String::new());
        lines.extend(block);
    }
    lines.push("---".to_string());
    lines.push(String::new());
    lines
}

/// @ai:intent Header naming function, line and file of one record
/// @ai:effects pure
fn record_header(record: &AnnotationRecord, ctx: &ReportContext<'_>) -> String {
    let mut header = String::from("Standards");
    if let Some(function) = &record.function_name {
        header.push_str(&format!(" in function '{}'", function));
    }
    if let Some(line) = record.line_number {
        header.push_str(&format!(" on line#{}", line));
    }
    header.push_str(" of file ");
    header.push_str(&file_reference(record, ctx));
    header.push(':');
    header
}

fn file_reference(record: &AnnotationRecord, ctx: &ReportContext<'_>) -> String {
    let Some(file) = &record.source_file else {
        return format!("`{}`", UNKNOWN_FILE);
    };

    match ctx.remote {
        Some(remote) => {
            let mut url = format!("{}/blame/{}/{}", remote, ctx.branch, file);
            if let Some(line) = record.line_number {
                url.push_str(&format!("#L{}", line));
            }
            format!("[{}]({})", file, url)
        }
        None => format!("`{}`", file),
    }
}

fn missing_section(missing: &[MissingCategory]) -> Vec<String> {
    if missing.is_empty() {
        return Vec::new();
    }

    let mut lines = vec![
        "## Missing Standards".to_string(),
        String::new(),
        "The following standards are missing:".to_string(),
        String::new(),
    ];
    for category in missing {
        lines.push(format!("### {}", category.title));
        lines.push(String::new());
        lines.push(category.ids.join(", "));
        lines.push(String::new());
    }
    lines
}
