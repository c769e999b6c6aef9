//! @ai:module:intent Format records and check results as text or JSON
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_check_result, format_records, to_json
//! @ai:module:depends_on check, annotation
//! @ai:module:stateless true

use crate::annotation::{AnnotationRecord, TagKind};
use crate::check::{CheckResult, Severity};
use colored::Colorize;
use serde::Serialize;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format check results as a string
/// @ai:effects pure
pub fn format_check_result(result: &CheckResult, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(result, false),
        OutputFormat::JsonPretty => to_json(result, true),
        OutputFormat::Text => format_check_result_text(result),
    }
}

fn format_check_result_text(result: &CheckResult) -> String {
    let mut output = String::new();

    for issue in &result.issues {
        let severity = match issue.severity {
            Severity::Error => "ERROR".red().bold(),
            Severity::Warning => "WARN".yellow().bold(),
        };

        let location = match (&issue.file, issue.line) {
            (Some(file), Some(line)) => format!("{}:{} ", file, line),
            (Some(file), None) => format!("{} ", file),
            _ => String::new(),
        };

        output.push_str(&format!(
            "{} {}{} ({})\n",
            severity,
            location.dimmed(),
            issue.message,
            issue.code.dimmed()
        ));

        if let Some(suggestion) = &issue.suggestion {
            output.push_str(&format!("  {} {}\n", "hint:".cyan(), suggestion));
        }
    }

    if !result.issues.is_empty() {
        output.push('\n');
    }
    output.push_str(&format!(
        "Checked {} annotations in {}\n",
        result.records_checked,
        result.package.bold()
    ));

    if result.errors > 0 {
        output.push_str(&format!(
            "{} errors, {} warnings\n",
            result.errors.to_string().red().bold(),
            result.warnings.to_string().yellow()
        ));
    } else if result.warnings > 0 {
        output.push_str(&format!(
            "{} {} warnings\n",
            "OK".green().bold(),
            result.warnings.to_string().yellow()
        ));
    } else {
        output.push_str(&format!("{} Ready for submission\n", "OK".green().bold()));
    }

    output
}

/// @ai:intent Format extracted annotation records
/// @ai:effects pure
pub fn format_records(records: &[AnnotationRecord], format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => to_json(&records, false),
        OutputFormat::JsonPretty => to_json(&records, true),
        OutputFormat::Text => format_records_text(records),
    }
}

fn format_records_text(records: &[AnnotationRecord]) -> String {
    let mut output = String::new();

    for kind in TagKind::ALL {
        let of_kind: Vec<_> = records.iter().filter(|r| r.tag_kind == kind).collect();
        if of_kind.is_empty() {
            continue;
        }

        output.push_str(&format!("{} ({})\n", format!("@{}", kind).bold(), of_kind.len()));
        for record in of_kind {
            let file = record.source_file.as_deref().unwrap_or("?");
            let location = match record.line_number {
                Some(line) => format!("{}:{}", file, line),
                None => file.to_string(),
            };
            output.push_str(&format!("  {}", location.dimmed()));
            if let Some(function) = &record.function_name {
                output.push_str(&format!(" {}()", function.cyan()));
            }
            output.push_str(&format!("  {}\n", record.standard_ids.join(", ")));
        }
    }

    if output.is_empty() {
        output.push_str("No standards annotations found\n");
    }
    output
}

/// @ai:intent Format any serializable value as JSON
/// @ai:effects pure
pub fn to_json<T: Serialize + ?Sized>(value: &T, pretty: bool) -> String {
    if pretty {
        serde_json::to_string_pretty(value).unwrap_or_default()
    } else {
        serde_json::to_string(value).unwrap_or_default()
    }
}
