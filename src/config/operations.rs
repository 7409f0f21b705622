//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{ArborError, Result};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static WORKTREE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9._-]+$").expect("valid worktree name pattern"));

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(ArborError::UserError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            ArborError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Config::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| ArborError::UserError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `worktrees_dir` and `remote` must be non-empty
    /// - worktree names are single path components of `[A-Za-z0-9._-]`
    /// - branches are non-empty and each branch is assigned to one name only
    /// - a promotion target cannot be the entry itself
    pub fn validate(&self) -> Result<()> {
        if self.worktrees_dir.trim().is_empty() {
            return Err(invalid("worktrees_dir must not be empty"));
        }
        if self.remote.trim().is_empty() {
            return Err(invalid("remote must not be empty"));
        }

        let mut owners: BTreeMap<&str, &str> = BTreeMap::new();
        for (name, entry) in &self.worktrees {
            if !WORKTREE_NAME.is_match(name) || name == "." || name == ".." {
                return Err(invalid(&format!(
                    "invalid worktree name '{}' (use letters, digits, '.', '_' or '-')",
                    name
                )));
            }
            if entry.branch.trim().is_empty() {
                return Err(invalid(&format!("worktree '{}' has an empty branch", name)));
            }
            if let Some(other) = owners.insert(entry.branch.as_str(), name.as_str()) {
                return Err(invalid(&format!(
                    "branch '{}' is assigned to both '{}' and '{}'",
                    entry.branch, other, name
                )));
            }
            if entry.promotion_target.as_deref() == Some(name.as_str()) {
                return Err(invalid(&format!(
                    "worktree '{}' cannot promote from itself",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Absolute directory holding managed worktrees.
    pub fn worktrees_path(&self, repo_root: &Path) -> PathBuf {
        let dir = PathBuf::from(&self.worktrees_dir);
        if dir.is_absolute() {
            dir
        } else {
            repo_root.join(dir)
        }
    }
}

fn invalid(reason: &str) -> ArborError {
    ArborError::UserError(format!("config validation failed: {}", reason))
}
