//! @ai:module:intent Run the full scan-to-report pipeline for one source tree
//! @ai:module:layer application
//! @ai:module:public_api generate_report, collect_records, Report
//! @ai:module:depends_on scanner, collector, reference, catalog, report, manifest, vcs, config
//! @ai:module:stateless true

use crate::annotation::{AnnotationRecord, TagKind};
use crate::catalog::{Catalog, CatalogSource};
use crate::collector::collect;
use crate::config::{ReportConfig, ScanConfig};
use crate::error::Result;
use crate::manifest::package_name;
use crate::reference::parse_annotation;
use crate::report::{assemble, MissingCategory, ReportContext};
use crate::scanner::scan_directory;
use crate::vcs::VersionControl;
use std::path::Path;

/// Branch used in links when none is given and none can be detected.
const FALLBACK_BRANCH: &str = "HEAD";

/// @ai:intent Outcome of one report run
#[derive(Debug, Clone)]
pub struct Report {
    pub package: String,
    pub lines: Vec<String>,
    pub records: Vec<AnnotationRecord>,
    pub missing: Vec<MissingCategory>,
    pub catalog: Catalog,
}

impl Report {
    pub fn markdown(&self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}

/// @ai:intent Scan, collect and parse every annotation under root
/// @ai:post records are ordered by tag kind, then file order, then line order
/// @ai:effects fs:read
pub fn collect_records(root: &Path, config: &ScanConfig) -> Vec<AnnotationRecord> {
    let blocks = scan_directory(root, config);

    TagKind::ALL
        .into_iter()
        .flat_map(|kind| {
            collect(&blocks, kind)
                .into_iter()
                .map(move |raw| parse_annotation(&raw, kind))
        })
        .collect()
}

/// @ai:intent Generate the compliance report for the package at root
/// @ai:pre catalog source is reachable whenever any standard is referenced
/// @ai:post identical inputs give byte-identical lines
/// @ai:effects fs:read, network (via catalog), io (via vcs)
pub fn generate_report(
    root: &Path,
    config: &ReportConfig,
    branch: Option<&str>,
    source: &dyn CatalogSource,
    vcs: &dyn VersionControl,
) -> Result<Report> {
    let package = package_name(root, &config.report.manifest_file)?;
    tracing::info!("Generating {} for {}", config.report.title, package);

    let records = collect_records(root, &config.scan);

    let referenced = records
        .iter()
        .filter(|r| r.tag_kind != TagKind::Pending)
        .flat_map(|r| r.categories());
    let catalog = Catalog::resolve(source, referenced)?;

    let remote = vcs.remote_url(root);
    let branch = match (branch, &remote) {
        (Some(explicit), _) => explicit.to_string(),
        (None, Some(_)) => vcs
            .current_branch(root)
            .unwrap_or_else(|| FALLBACK_BRANCH.to_string()),
        (None, None) => FALLBACK_BRANCH.to_string(),
    };

    let ctx = ReportContext {
        title: &config.report.title,
        package: &package,
        remote: remote.as_deref(),
        branch: &branch,
        standards_url: &config.report.standards_url,
    };
    let assembled = assemble(&records, &catalog, &ctx);

    Ok(Report {
        package,
        lines: assembled.lines,
        records,
        missing: assembled.missing,
        catalog,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::StaticCatalog;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct FixedVcs {
        remote: Option<&'static str>,
        branch: Option<&'static str>,
    }

    impl VersionControl for FixedVcs {
        fn remote_url(&self, _: &Path) -> Option<String> {
            self.remote.map(str::to_string)
        }

        fn current_branch(&self, _: &Path) -> Option<String> {
            self.branch.map(str::to_string)
        }
    }

    const NO_VCS: FixedVcs = FixedVcs {
        remote: None,
        branch: None,
    };

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    fn package() -> TempDir {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "DESCRIPTION", "Package: demo\nVersion: 0.1.0\n");
        write(
            temp.path(),
            "R/a.R",
            "#' Fit\n#' @srrstats {G1.0, G1.0, RE1.0} fitted\nfit <- function(x) x\n",
        );
        write(
            temp.path(),
            "R/b.R",
            "#' @srrstatsNA {RE1.1} no formula interface\n#' @noRd\nNULL\n",
        );
        write(
            temp.path(),
            "tests/test-a.R",
            "#' @srrstatsTODO {G1.1} add tests\nNULL\n",
        );
        write(temp.path(), "zzz.R", "#' @srrstats {G1.2}\nonload <- function() NULL\n");
        temp
    }

    fn catalog() -> StaticCatalog {
        StaticCatalog::new([
            "- [ ] **G1.0** References",
            "- [ ] **G1.1** Tests",
            "- [ ] **G1.2** Lifecycle",
            "- [ ] **G1.3** Terminology",
            "- [ ] **RE1.0** Formula",
            "- [ ] **RE1.1** Interface",
            "- [ ] **RE1.2** Coefficients",
            "- [ ] **SP1.0** Spatial",
        ])
    }

    #[test]
    fn test_end_to_end_report() {
        let temp = package();
        let config = ReportConfig::default();

        let report = generate_report(temp.path(), &config, None, &catalog(), &NO_VCS).unwrap();
        assert_eq!(report.package, "demo");
        assert_eq!(
            report.lines,
            vec![
                "# srr report for demo",
                "",
                "[Click here for full text of all standards](https://stats-devguide.ropensci.org/standards.html)",
                "",
                "## Standards with `srrstats` tag",
                "",
                "### R directory",
                "",
                "Standards in function 'fit' on line#2 of file `R/a.R`:",
                "",
                "- G1.0 References",
                "- RE1.0 Formula",
                "",
                "### root directory",
                "",
                "Standards in function 'onload' on line#1 of file `zzz.R`:",
                "",
                "- G1.2 Lifecycle",
                "",
                "---",
                "",
                "## Standards with `srrstatsNA` tag",
                "",
                "### R directory",
                "",
                "Standards on line#1 of file `R/b.R`:",
                "",
                "- RE1.1 Interface",
                "",
                "---",
                "",
                "## Standards with `srrstatsTODO` tag",
                "",
                "### tests directory",
                "",
                "Standards on line#1 of file `tests/test-a.R`:",
                "",
                "- G1.1 Tests",
                "",
                "---",
                "",
                "## Missing Standards",
                "",
                "The following standards are missing:",
                "",
                "### General",
                "",
                "G1.3",
                "",
                "### Regression",
                "",
                "RE1.2",
                "",
            ]
        );
        assert!(!report.markdown().contains("SP1.0"));
    }

    #[test]
    fn test_repeated_runs_are_identical() {
        let temp = package();
        let config = ReportConfig::default();

        let first = generate_report(temp.path(), &config, None, &catalog(), &NO_VCS).unwrap();
        let second = generate_report(temp.path(), &config, None, &catalog(), &NO_VCS).unwrap();
        assert_eq!(first.markdown(), second.markdown());
    }

    #[test]
    fn test_links_use_detected_or_explicit_branch() {
        let temp = package();
        let config = ReportConfig::default();
        let vcs = FixedVcs {
            remote: Some("https://github.com/org/demo"),
            branch: Some("dev"),
        };

        let detected = generate_report(temp.path(), &config, None, &catalog(), &vcs).unwrap();
        assert!(detected
            .markdown()
            .contains("[R/a.R](https://github.com/org/demo/blame/dev/R/a.R#L2)"));

        let explicit =
            generate_report(temp.path(), &config, Some("release"), &catalog(), &vcs).unwrap();
        assert!(explicit
            .markdown()
            .contains("[R/a.R](https://github.com/org/demo/blame/release/R/a.R#L2)"));
    }

    #[test]
    fn test_empty_tree_is_title_only() {
        let temp = TempDir::new().unwrap();
        write(temp.path(), "DESCRIPTION", "Package: empty\n");

        let report =
            generate_report(temp.path(), &ReportConfig::default(), None, &catalog(), &NO_VCS)
                .unwrap();
        assert_eq!(report.lines.len(), 4);
        assert!(report.records.is_empty());
        assert!(report.missing.is_empty());
    }

    #[test]
    fn test_catalog_failure_is_fatal() {
        struct Offline;
        impl CatalogSource for Offline {
            fn checklist(&self, categories: &[crate::catalog::Category]) -> Result<Vec<String>> {
                Err(crate::error::Error::ChecklistMissing {
                    category: categories[0].name.clone(),
                    path: std::path::PathBuf::from("offline"),
                })
            }
        }

        let temp = package();
        let result = generate_report(temp.path(), &ReportConfig::default(), None, &Offline, &NO_VCS);
        assert!(result.is_err());
    }

    #[test]
    fn test_malformed_message_still_renders() {
        use crate::annotation::RawAnnotation;

        let raw = RawAnnotation {
            text: "Standards [G1.0] of file [R/a.R] trailing".to_string(),
            directory: "R".to_string(),
        };
        let record = parse_annotation(&raw, TagKind::Addressed);
        assert_eq!(record.source_file, None);
        assert_eq!(record.standard_ids, vec!["G1.0"]);

        let resolved = Catalog::resolve(&catalog(), record.categories()).unwrap();
        let ctx = ReportContext {
            title: "srr report",
            package: "demo",
            remote: None,
            branch: FALLBACK_BRANCH,
            standards_url: "https://stats-devguide.ropensci.org/standards.html",
        };
        let assembled = assemble(std::slice::from_ref(&record), &resolved, &ctx);
        assert!(assembled
            .lines
            .contains(&"Standards of file `unknown file`:".to_string()));
        assert!(assembled.rendered_ids.contains("G1.0"));
    }

    #[test]
    fn test_collect_records_orders_by_kind() {
        let temp = package();
        let records = collect_records(temp.path(), &ScanConfig::default());
        let kinds: Vec<TagKind> = records.iter().map(|r| r.tag_kind).collect();
        assert_eq!(
            kinds,
            vec![
                TagKind::Addressed,
                TagKind::Addressed,
                TagKind::NotApplicable,
                TagKind::Pending
            ]
        );
        assert_eq!(records[0].standard_ids, vec!["G1.0", "RE1.0"]);
    }
}
