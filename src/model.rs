//! Shared data types: desired mapping and actual worktree state.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Logical, case-sensitive worktree identifier.
pub type WorktreeName = String;

/// Desired state of one worktree.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "RawDesiredEntry")]
pub struct DesiredEntry {
    /// Branch the worktree should have checked out.
    pub branch: String,
    /// Worktree whose branch this entry is expected to inherit (`promotes`).
    pub promotion_target: Option<WorktreeName>,
}

impl DesiredEntry {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            promotion_target: None,
        }
    }

    pub fn promoting(branch: impl Into<String>, target: impl Into<WorktreeName>) -> Self {
        Self {
            branch: branch.into(),
            promotion_target: Some(target.into()),
        }
    }
}

/// Config accepts either `name: branch` or `name: { branch, promotes }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDesiredEntry {
    Branch(String),
    Full {
        branch: String,
        #[serde(default)]
        promotes: Option<String>,
    },
}

impl From<RawDesiredEntry> for DesiredEntry {
    fn from(raw: RawDesiredEntry) -> Self {
        match raw {
            RawDesiredEntry::Branch(branch) => DesiredEntry::new(branch),
            RawDesiredEntry::Full { branch, promotes } => DesiredEntry {
                branch,
                promotion_target: promotes,
            },
        }
    }
}

/// Desired worktree set, keyed by name.
pub type DesiredMapping = BTreeMap<WorktreeName, DesiredEntry>;

/// Working-tree status counts for one worktree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct GitStatus {
    /// Any tracked or untracked change is present.
    pub dirty: bool,
    /// Number of paths with staged changes.
    pub staged: u32,
    /// Commits ahead of upstream (0 without an upstream).
    pub ahead: u32,
    /// Commits behind upstream (0 without an upstream).
    pub behind: u32,
}

/// Observed state of one existing worktree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActualEntry {
    pub path: PathBuf,
    pub current_branch: String,
    /// Branch the desired mapping assigns to this name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_branch: Option<String>,
    pub git_status: GitStatus,
}

impl ActualEntry {
    /// True when the worktree is on the branch the mapping expects.
    pub fn matches_expected(&self) -> bool {
        self.expected_branch
            .as_deref()
            .is_none_or(|expected| expected == self.current_branch)
    }
}

/// Snapshot of every managed worktree, keyed by name.
pub type ActualState = BTreeMap<WorktreeName, ActualEntry>;
