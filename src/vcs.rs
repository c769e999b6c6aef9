//! @ai:module:intent Query version control for the remote URL and branch of a source tree
//! @ai:module:layer infrastructure
//! @ai:module:public_api VersionControl, GitCli, normalize_remote
//! @ai:module:stateless true

use std::path::Path;
use std::process::Command;

/// @ai:intent Collaborator answering where a tree is hosted and which branch is checked out
pub trait VersionControl {
    /// @ai:intent Browsable https URL of the remote, or None when none is configured
    fn remote_url(&self, root: &Path) -> Option<String>;

    /// @ai:intent Name of the currently checked-out branch
    fn current_branch(&self, root: &Path) -> Option<String>;
}

/// @ai:intent Answers version-control queries by running the `git` binary
#[derive(Debug, Clone)]
pub struct GitCli {
    remote: String,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }

    /// @ai:intent Run git in root and return trimmed stdout on success
    /// @ai:effects io
    fn git(root: &Path, args: &[&str]) -> Option<String> {
        let output = Command::new("git")
            .arg("-C")
            .arg(root)
            .args(args)
            .output()
            .ok()?;

        if !output.status.success() {
            return None;
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        (!stdout.is_empty()).then_some(stdout)
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl VersionControl for GitCli {
    /// @ai:effects io
    fn remote_url(&self, root: &Path) -> Option<String> {
        let raw = Self::git(root, &["remote", "get-url", self.remote.as_str()]);
        if raw.is_none() {
            tracing::warn!("No git remote '{}' for {}; links disabled", self.remote, root.display());
        }
        raw.and_then(|url| normalize_remote(&url))
    }

    /// @ai:effects io
    fn current_branch(&self, root: &Path) -> Option<String> {
        Self::git(root, &["rev-parse", "--abbrev-ref", "HEAD"]).filter(|b| b != "HEAD")
    }
}

/// @ai:intent Turn a git remote into a browsable https base URL
/// @ai:example ("git@github.com:org/pkg.git") -> Some("https://github.com/org/pkg")
/// @ai:example ("https://github.com/org/pkg.git") -> Some("https://github.com/org/pkg")
/// @ai:example ("/srv/git/pkg") -> None
/// @ai:effects pure
pub fn normalize_remote(url: &str) -> Option<String> {
    let url = url.trim();

    let base = if let Some(rest) = url.strip_prefix("git@") {
        let (host, path) = rest.split_once(':')?;
        format!("https://{}/{}", host, path)
    } else if let Some(rest) = url.strip_prefix("ssh://") {
        let rest = rest.split_once('@').map(|(_, r)| r).unwrap_or(rest);
        format!("https://{}", rest)
    } else if url.starts_with("https://") || url.starts_with("http://") {
        url.to_string()
    } else {
        return None;
    };

    let base = base.trim_end_matches('/');
    Some(base.strip_suffix(".git").unwrap_or(base).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_normalize_ssh_remote() {
        assert_eq!(
            normalize_remote("git@github.com:ropensci/srr.git"),
            Some("https://github.com/ropensci/srr".to_string())
        );
        assert_eq!(
            normalize_remote("ssh://git@gitlab.com/org/pkg.git"),
            Some("https://gitlab.com/org/pkg".to_string())
        );
    }

    #[test]
    fn test_normalize_https_remote() {
        assert_eq!(
            normalize_remote("https://github.com/org/pkg/\n"),
            Some("https://github.com/org/pkg".to_string())
        );
    }

    #[test]
    fn test_local_remote_has_no_url() {
        assert_eq!(normalize_remote("/srv/git/pkg"), None);
    }

    #[test]
    fn test_non_repository_has_no_remote() {
        let temp = TempDir::new().unwrap();
        let git = GitCli::new();
        assert_eq!(git.remote_url(temp.path()), None);
    }
}
