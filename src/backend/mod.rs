//! Git backend abstraction.
//!
//! The reconciliation engine never touches the repository directly; every
//! query and mutation goes through a [`GitBackend`] trait object. The
//! production implementation shells out to git ([`CliBackend`]); tests use an
//! in-memory double that records every mutating call.

mod cli;
#[cfg(test)]
pub(crate) mod memory;

pub use cli::CliBackend;

use crate::error::Result;
use crate::model::{GitStatus, WorktreeName};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Capability set the engine needs from a git repository.
///
/// Calls are blocking. Any timeout policy belongs to the implementation.
pub trait GitBackend {
    /// Whether `branch` exists locally or on the configured remote.
    fn branch_exists(&self, branch: &str) -> Result<bool>;

    /// Branch currently checked out in the worktree at `worktree_path`.
    fn current_branch(&self, worktree_path: &Path) -> Result<String>;

    /// Dirty/staged/ahead/behind counts for the worktree at `worktree_path`.
    fn status(&self, worktree_path: &Path) -> Result<GitStatus>;

    /// Name of the worktree that has `branch` checked out, if any.
    ///
    /// Worktrees outside the managed set (such as the primary checkout) are
    /// reported by their absolute path, which never equals a worktree name.
    fn worktree_holding(&self, branch: &str) -> Result<Option<WorktreeName>>;

    /// Create worktree `name` checked out on `branch`.
    fn create_worktree(&self, name: &str, branch: &str) -> Result<()>;

    /// Check out `branch` in existing worktree `name`.
    fn switch_branch(&self, name: &str, branch: &str) -> Result<()>;

    /// Remove worktree `name` and its directory.
    fn remove_worktree(&self, name: &str) -> Result<()>;

    /// Managed worktrees known to git, keyed by name.
    fn list_worktrees(&self) -> Result<BTreeMap<WorktreeName, PathBuf>>;

    /// Refresh remote-tracking refs. Backends without a remote do nothing.
    fn fetch(&self) -> Result<()> {
        Ok(())
    }
}
