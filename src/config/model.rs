//! Config struct definition and default implementation.

use crate::model::DesiredMapping;
use serde::Deserialize;

/// Default config file name, looked up at the repository root.
pub const CONFIG_FILE_NAME: &str = "arbor.yaml";

/// Configuration for an arbor-managed repository.
///
/// Unknown fields in the YAML are ignored for forward compatibility.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding managed worktrees, relative to the repo root
    /// (default: ".worktrees").
    pub worktrees_dir: String,

    /// Remote used for branch lookups and fetch (default: "origin").
    pub remote: String,

    /// Fetch from `remote` before probing.
    pub fetch: bool,

    /// Desired worktrees: name -> branch (or `{ branch, promotes }`).
    pub worktrees: DesiredMapping,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            worktrees_dir: default_worktrees_dir(),
            remote: default_remote(),
            fetch: false,
            worktrees: DesiredMapping::new(),
        }
    }
}

fn default_worktrees_dir() -> String {
    ".worktrees".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}
