//! @ai:module:intent Decide whether a package is ready to submit for review
//! @ai:module:layer application
//! @ai:module:public_api check_report, CheckResult, CheckIssue, Severity
//! @ai:module:depends_on pipeline, annotation, catalog
//! @ai:module:stateless true

use crate::annotation::TagKind;
use crate::pipeline::Report;
use serde::{Deserialize, Serialize};

/// @ai:intent Severity level for check issues
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
}

/// @ai:intent A single problem standing between the package and submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckIssue {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    pub file: Option<String>,
    pub line: Option<u32>,
    pub suggestion: Option<String>,
}

/// @ai:intent Outcome of checking one package
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CheckResult {
    pub package: String,
    pub records_checked: usize,
    pub issues: Vec<CheckIssue>,
    pub errors: usize,
    pub warnings: usize,
}

impl CheckResult {
    /// @ai:intent Check passed when no errors were found
    pub fn passed(&self) -> bool {
        self.errors == 0
    }

    fn push(&mut self, issue: CheckIssue) {
        match issue.severity {
            Severity::Error => self.errors += 1,
            Severity::Warning => self.warnings += 1,
        }
        self.issues.push(issue);
    }
}

/// @ai:intent Check a generated report for leftover work
/// @ai:post pending annotations and missing standards are errors
/// @ai:post unresolved identifiers and annotations without a file are warnings
/// @ai:effects pure
pub fn check_report(report: &Report) -> CheckResult {
    let mut result = CheckResult {
        package: report.package.clone(),
        records_checked: report.records.len(),
        ..Default::default()
    };

    for record in &report.records {
        if record.source_file.is_none() {
            result.push(CheckIssue {
                severity: Severity::Warning,
                code: "no-file".to_string(),
                message: format!(
                    "@{} annotation for {} has no file",
                    record.tag_kind,
                    record.standard_ids.join(", ")
                ),
                file: None,
                line: record.line_number,
                suggestion: None,
            });
        }

        if record.tag_kind == TagKind::Pending {
            result.push(CheckIssue {
                severity: Severity::Error,
                code: "todo".to_string(),
                message: format!("Standards still marked TODO: {}", record.standard_ids.join(", ")),
                file: record.source_file.clone(),
                line: record.line_number,
                suggestion: Some(format!(
                    "Replace @{} with @{} or @{}",
                    TagKind::Pending,
                    TagKind::Addressed,
                    TagKind::NotApplicable
                )),
            });
            continue;
        }

        let unresolved: Vec<&str> = record
            .standard_ids
            .iter()
            .filter(|id| !report.catalog.contains(id))
            .map(String::as_str)
            .collect();
        if !unresolved.is_empty() {
            result.push(CheckIssue {
                severity: Severity::Warning,
                code: "unknown-standard".to_string(),
                message: format!("Not in the standards catalog: {}", unresolved.join(", ")),
                file: record.source_file.clone(),
                line: record.line_number,
                suggestion: Some("Check the identifier against the published checklist".to_string()),
            });
        }
    }

    for category in &report.missing {
        result.push(CheckIssue {
            severity: Severity::Error,
            code: "missing".to_string(),
            message: format!(
                "{} standards not addressed: {}",
                category.title,
                category.ids.join(", ")
            ),
            file: None,
            line: None,
            suggestion: Some(format!(
                "Document each with @{} or @{}",
                TagKind::Addressed,
                TagKind::NotApplicable
            )),
        });
    }

    tracing::info!(
        "Checked {} annotations: {} errors, {} warnings",
        result.records_checked,
        result.errors,
        result.warnings
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{directory_of, AnnotationRecord};
    use crate::catalog::{order_categories, Catalog};
    use crate::report::MissingCategory;

    fn record(kind: TagKind, file: Option<&str>, ids: &[&str]) -> AnnotationRecord {
        AnnotationRecord {
            tag_kind: kind,
            source_file: file.map(str::to_string),
            function_name: None,
            line_number: Some(3),
            standard_ids: ids.iter().map(|s| s.to_string()).collect(),
            directory: file.map(directory_of).unwrap_or_else(|| "root".to_string()),
        }
    }

    fn report(records: Vec<AnnotationRecord>, missing: Vec<MissingCategory>) -> Report {
        let lines = vec!["- [ ] **G1.0** a".to_string(), "- [ ] **G1.1** b".to_string()];
        Report {
            package: "demo".to_string(),
            lines: Vec::new(),
            records,
            missing,
            catalog: Catalog::from_lines(order_categories(["G"]), &lines),
        }
    }

    #[test]
    fn test_complete_package_passes() {
        let result = check_report(&report(
            vec![
                record(TagKind::Addressed, Some("R/a.R"), &["G1.0"]),
                record(TagKind::NotApplicable, Some("R/b.R"), &["G1.1"]),
            ],
            Vec::new(),
        ));
        assert!(result.passed());
        assert!(result.issues.is_empty());
        assert_eq!(result.records_checked, 2);
    }

    #[test]
    fn test_todo_and_missing_are_errors() {
        let result = check_report(&report(
            vec![record(TagKind::Pending, Some("R/a.R"), &["G1.0"])],
            vec![MissingCategory {
                code: "G".to_string(),
                title: "General".to_string(),
                ids: vec!["G1.1".to_string()],
            }],
        ));
        assert!(!result.passed());
        assert_eq!(result.errors, 2);
        assert_eq!(result.issues[0].code, "todo");
        assert_eq!(result.issues[0].file.as_deref(), Some("R/a.R"));
        assert_eq!(result.issues[1].code, "missing");
        assert!(result.issues[1].message.contains("G1.1"));
    }

    #[test]
    fn test_unresolved_and_fileless_are_warnings() {
        let result = check_report(&report(
            vec![
                record(TagKind::Addressed, Some("R/a.R"), &["G1.0", "G9.9"]),
                record(TagKind::Addressed, None, &["G1.1"]),
            ],
            Vec::new(),
        ));
        assert!(result.passed());
        assert_eq!(result.warnings, 2);
        let codes: Vec<&str> = result.issues.iter().map(|i| i.code.as_str()).collect();
        assert_eq!(codes, vec!["unknown-standard", "no-file"]);
        assert!(result.issues[0].message.ends_with("G9.9"));
    }
}
