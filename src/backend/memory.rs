//! In-memory [`GitBackend`] for tests.
//!
//! Mirrors the git rules the engine depends on: a branch can be checked out
//! in at most one worktree, and worktrees can only be created on existing
//! branches. Every mutating call is appended to a log so tests can assert
//! exactly what was done and in which order.

use super::GitBackend;
use crate::error::{ArborError, Operation, Result};
use crate::model::{GitStatus, WorktreeName};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

const ROOT: &str = "/repo/.worktrees";

/// A mutating call that reached the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Call {
    Create(String, String),
    Switch(String, String),
    Remove(String),
}

#[derive(Debug, Clone)]
struct MemWorktree {
    path: PathBuf,
    branch: String,
    status: GitStatus,
}

#[derive(Debug, Default)]
struct MemRepo {
    branches: BTreeSet<String>,
    worktrees: BTreeMap<String, MemWorktree>,
    /// Branches held by unmanaged checkouts (by path), e.g. the primary clone.
    external: BTreeMap<String, String>,
    failures: BTreeMap<(String, String), String>,
    fail_listing: bool,
    fail_holding: bool,
    calls: Vec<Call>,
}

#[derive(Debug, Default)]
pub(crate) struct MemoryBackend {
    repo: RefCell<MemRepo>,
}

fn op_key(operation: Operation) -> String {
    operation.to_string()
}

impl MemoryBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_branches(self, branches: &[&str]) -> Self {
        self.repo
            .borrow_mut()
            .branches
            .extend(branches.iter().map(|b| b.to_string()));
        self
    }

    /// Add an existing managed worktree; its branch is created if needed.
    pub(crate) fn with_worktree(self, name: &str, branch: &str) -> Self {
        self.with_worktree_status(name, branch, GitStatus::default())
    }

    pub(crate) fn with_worktree_status(self, name: &str, branch: &str, status: GitStatus) -> Self {
        {
            let mut repo = self.repo.borrow_mut();
            repo.branches.insert(branch.to_string());
            repo.worktrees.insert(
                name.to_string(),
                MemWorktree {
                    path: Path::new(ROOT).join(name),
                    branch: branch.to_string(),
                    status,
                },
            );
        }
        self
    }

    /// Mark `branch` as checked out by the unmanaged checkout at path `holder`.
    pub(crate) fn with_external_holder(self, holder: &str, branch: &str) -> Self {
        {
            let mut repo = self.repo.borrow_mut();
            repo.branches.insert(branch.to_string());
            repo.external.insert(branch.to_string(), holder.to_string());
        }
        self
    }

    /// Make the next `operation` on `name` fail with `cause`.
    pub(crate) fn fail_on(self, operation: Operation, name: &str, cause: &str) -> Self {
        self.repo
            .borrow_mut()
            .failures
            .insert((op_key(operation), name.to_string()), cause.to_string());
        self
    }

    pub(crate) fn fail_listing(self) -> Self {
        self.repo.borrow_mut().fail_listing = true;
        self
    }

    pub(crate) fn fail_holding(self) -> Self {
        self.repo.borrow_mut().fail_holding = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<Call> {
        self.repo.borrow().calls.clone()
    }

    pub(crate) fn branch_of(&self, name: &str) -> Option<String> {
        self.repo
            .borrow()
            .worktrees
            .get(name)
            .map(|wt| wt.branch.clone())
    }

    fn injected_failure(&self, operation: Operation, name: &str) -> Result<()> {
        let key = (op_key(operation), name.to_string());
        match self.repo.borrow_mut().failures.remove(&key) {
            Some(cause) => Err(ArborError::backend(operation.to_string(), cause)),
            None => Ok(()),
        }
    }

    fn holder_of(repo: &MemRepo, branch: &str) -> Option<String> {
        repo.worktrees
            .iter()
            .find(|(_, wt)| wt.branch == branch)
            .map(|(name, _)| name.clone())
            .or_else(|| repo.external.get(branch).cloned())
    }
}

impl GitBackend for MemoryBackend {
    fn branch_exists(&self, branch: &str) -> Result<bool> {
        Ok(self.repo.borrow().branches.contains(branch))
    }

    fn current_branch(&self, worktree_path: &Path) -> Result<String> {
        self.repo
            .borrow()
            .worktrees
            .values()
            .find(|wt| wt.path == worktree_path)
            .map(|wt| wt.branch.clone())
            .ok_or_else(|| {
                ArborError::backend(
                    "rev-parse",
                    format!("'{}' is not a worktree", worktree_path.display()),
                )
            })
    }

    fn status(&self, worktree_path: &Path) -> Result<GitStatus> {
        self.repo
            .borrow()
            .worktrees
            .values()
            .find(|wt| wt.path == worktree_path)
            .map(|wt| wt.status)
            .ok_or_else(|| {
                ArborError::backend(
                    "status",
                    format!("'{}' is not a worktree", worktree_path.display()),
                )
            })
    }

    fn worktree_holding(&self, branch: &str) -> Result<Option<WorktreeName>> {
        let repo = self.repo.borrow();
        if repo.fail_holding {
            return Err(ArborError::backend(
                "worktree list",
                "fatal: unable to read worktree metadata",
            ));
        }
        Ok(Self::holder_of(&repo, branch))
    }

    fn create_worktree(&self, name: &str, branch: &str) -> Result<()> {
        self.injected_failure(Operation::Create, name)?;
        let mut repo = self.repo.borrow_mut();
        if repo.worktrees.contains_key(name) {
            return Err(ArborError::backend("worktree add", "path already exists"));
        }
        if !repo.branches.contains(branch) {
            return Err(ArborError::backend(
                "worktree add",
                format!("branch '{}' does not exist", branch),
            ));
        }
        if let Some(holder) = Self::holder_of(&repo, branch) {
            return Err(ArborError::backend(
                "worktree add",
                format!("'{}' is already checked out at '{}'", branch, holder),
            ));
        }
        repo.worktrees.insert(
            name.to_string(),
            MemWorktree {
                path: Path::new(ROOT).join(name),
                branch: branch.to_string(),
                status: GitStatus::default(),
            },
        );
        repo.calls
            .push(Call::Create(name.to_string(), branch.to_string()));
        Ok(())
    }

    fn switch_branch(&self, name: &str, branch: &str) -> Result<()> {
        self.injected_failure(Operation::Switch, name)?;
        let mut repo = self.repo.borrow_mut();
        if let Some(holder) = Self::holder_of(&repo, branch) {
            return Err(ArborError::backend(
                "switch",
                format!("'{}' is already checked out at '{}'", branch, holder),
            ));
        }
        let wt = repo
            .worktrees
            .get_mut(name)
            .ok_or_else(|| ArborError::backend("switch", format!("no worktree '{}'", name)))?;
        wt.branch = branch.to_string();
        repo.calls
            .push(Call::Switch(name.to_string(), branch.to_string()));
        Ok(())
    }

    fn remove_worktree(&self, name: &str) -> Result<()> {
        self.injected_failure(Operation::Remove, name)?;
        let mut repo = self.repo.borrow_mut();
        if repo.worktrees.remove(name).is_none() {
            return Err(ArborError::backend(
                "worktree remove",
                format!("no worktree '{}'", name),
            ));
        }
        repo.calls.push(Call::Remove(name.to_string()));
        Ok(())
    }

    fn list_worktrees(&self) -> Result<BTreeMap<WorktreeName, PathBuf>> {
        let repo = self.repo.borrow();
        if repo.fail_listing {
            return Err(ArborError::backend(
                "worktree list",
                "fatal: not a git repository",
            ));
        }
        Ok(repo
            .worktrees
            .iter()
            .map(|(name, wt)| (name.clone(), wt.path.clone()))
            .collect())
    }
}
