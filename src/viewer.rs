//! @ai:module:intent Write the rendered report to disk and optionally open it
//! @ai:module:layer infrastructure
//! @ai:module:public_api publish, document_path
//! @ai:module:depends_on error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// @ai:intent Location of the transient report document for a package
/// @ai:effects pure
pub fn document_path(dir: &Path, package: &str) -> PathBuf {
    let safe: String = package
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '-' { c } else { '_' })
        .collect();
    dir.join(format!("srr-report-{}.md", safe))
}

/// @ai:intent Write the document; open it when `view`, otherwise just return where it is
/// @ai:effects fs:write, io
pub fn publish(lines: &[String], package: &str, view: bool) -> Result<PathBuf> {
    publish_in(&std::env::temp_dir(), lines, package, view)
}

/// @ai:effects fs:write, io
fn publish_in(dir: &Path, lines: &[String], package: &str, view: bool) -> Result<PathBuf> {
    let path = document_path(dir, package);
    let mut content = lines.join("\n");
    content.push('\n');
    std::fs::write(&path, content)?;
    tracing::info!("Report written to {}", path.display());

    if view {
        open_in_viewer(&path)?;
    }
    Ok(path)
}

/// @ai:effects io
fn open_in_viewer(path: &Path) -> Result<()> {
    let mut command = viewer_command();
    command
        .arg(path)
        .spawn()
        .map(|_| ())
        .map_err(|e| Error::Viewer {
            path: path.to_path_buf(),
            source: e,
        })
}

fn viewer_command() -> Command {
    if cfg!(target_os = "macos") {
        Command::new("open")
    } else if cfg!(target_os = "windows") {
        let mut command = Command::new("cmd");
        command.args(["/C", "start", ""]);
        command
    } else {
        Command::new("xdg-open")
    }
}
