//! @ai:module:intent Read the package name from the package manifest
//! @ai:module:layer infrastructure
//! @ai:module:public_api package_name, parse_dcf_field
//! @ai:module:depends_on error
//! @ai:module:stateless true

use crate::error::{Error, Result};
use std::path::Path;

/// @ai:intent Package name from the DCF manifest, else Cargo.toml, else the directory name
/// @ai:effects fs:read
pub fn package_name(root: &Path, manifest_file: &str) -> Result<String> {
    let manifest = root.join(manifest_file);
    if manifest.is_file() {
        let content = std::fs::read_to_string(&manifest).map_err(|e| Error::FileRead {
            path: manifest.clone(),
            source: e,
        })?;
        return parse_dcf_field(&content, "Package").ok_or_else(|| Error::Manifest {
            path: manifest,
            message: "no `Package` field".to_string(),
        });
    }

    let cargo = root.join("Cargo.toml");
    if cargo.is_file() {
        if let Some(name) = cargo_package_name(&cargo)? {
            return Ok(name);
        }
    }

    let fallback = root
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "package".to_string());
    tracing::warn!(
        "No {} found in {}; using '{}' as package name",
        manifest_file,
        root.display(),
        fallback
    );
    Ok(fallback)
}

/// @ai:intent Value of one field in `Key: value` records with indented continuations
/// @ai:example ("Package: srr\nTitle: x", "Package") -> Some("srr")
/// @ai:effects pure
pub fn parse_dcf_field(content: &str, key: &str) -> Option<String> {
    let mut value: Option<String> = None;

    for line in content.lines() {
        let continuation = line.starts_with(' ') || line.starts_with('\t');
        if let Some(v) = value.as_mut() {
            if !continuation {
                break;
            }
            v.push(' ');
            v.push_str(line.trim());
        } else if !continuation {
            if let Some((k, v)) = line.split_once(':') {
                if k.trim() == key {
                    value = Some(v.trim().to_string());
                }
            }
        }
    }

    value.filter(|v| !v.is_empty())
}

fn cargo_package_name(path: &Path) -> Result<Option<String>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc: toml::Value = toml::from_str(&content).map_err(|e| Error::Manifest {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(doc
        .get("package")
        .and_then(|p| p.get("name"))
        .and_then(|n| n.as_str())
        .map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_dcf_field_with_continuation() {
        let content = "Package: demo\nTitle: A Long\n    Title Here\nVersion: 0.1\n";
        assert_eq!(parse_dcf_field(content, "Package"), Some("demo".to_string()));
        assert_eq!(
            parse_dcf_field(content, "Title"),
            Some("A Long Title Here".to_string())
        );
        assert_eq!(parse_dcf_field(content, "Depends"), None);
    }

    #[test]
    fn test_package_name_from_description() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("DESCRIPTION"), "Package: demo\nVersion: 1.0\n").unwrap();
        assert_eq!(package_name(temp.path(), "DESCRIPTION").unwrap(), "demo");
    }

    #[test]
    fn test_description_without_package_is_error() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("DESCRIPTION"), "Version: 1.0\n").unwrap();
        assert!(matches!(
            package_name(temp.path(), "DESCRIPTION"),
            Err(Error::Manifest { .. })
        ));
    }

    #[test]
    fn test_package_name_from_cargo() {
        let temp = TempDir::new().unwrap();
        std::fs::write(
            temp.path().join("Cargo.toml"),
            "[package]\nname = \"crate-demo\"\nversion = \"0.1.0\"\n",
        )
        .unwrap();
        assert_eq!(package_name(temp.path(), "DESCRIPTION").unwrap(), "crate-demo");
    }
}
