//! @ai:module:intent Standards compliance reports for srr-annotated source trees
//! @ai:module:layer infrastructure
//! @ai:module:public_api pipeline, check, catalog, report, reference, collector, scanner, output, config, error
//! @ai:module:stateless true
//!
//! # srr-report
//!
//! Scans documentation comments for `@srrstats`, `@srrstatsNA` and
//! `@srrstatsTODO` tags, resolves the standards they cite against the
//! published catalog and renders a markdown report, including the standards
//! nobody addressed yet.
//!
//! ## Example
//!
//! ```rust,no_run
//! use srr_report::{catalog, pipeline, GitCli, ReportConfig};
//! use std::path::Path;
//!
//! let root = Path::new(".");
//! let config = ReportConfig::load_or_default(root, None).unwrap();
//! let source = catalog::source_from_config(&config.catalog).unwrap();
//!
//! let report =
//!     pipeline::generate_report(root, &config, None, source.as_ref(), &GitCli::new()).unwrap();
//! println!("{}", report.markdown());
//! ```

pub mod annotation;
pub mod catalog;
pub mod check;
pub mod collector;
pub mod config;
pub mod error;
pub mod language;
pub mod manifest;
pub mod output;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod scanner;
pub mod vcs;
pub mod viewer;

pub use annotation::{AnnotationRecord, RawAnnotation, TagKind};
pub use catalog::{
    Catalog, CatalogEntry, CatalogSource, Category, DirCatalog, HttpCatalog, StaticCatalog,
};
pub use check::{check_report, CheckIssue, CheckResult, Severity};
pub use config::ReportConfig;
pub use error::{Error, Result};
pub use language::{detect_language, is_supported_file, Language};
pub use output::{format_check_result, format_records, to_json, OutputFormat};
pub use pipeline::{collect_records, generate_report, Report};
pub use report::{assemble, missing_standards, AssembledReport, MissingCategory, ReportContext};
pub use vcs::{GitCli, VersionControl};
