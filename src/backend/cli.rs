//! Production backend that drives the `git` binary.
//!
//! Managed worktrees live directly under one directory (default
//! `<repo>/.worktrees/`); the directory name is the worktree name. Worktrees
//! elsewhere, including the primary checkout, are visible to
//! [`GitBackend::worktree_holding`] but are never listed as managed.

use super::GitBackend;
use crate::error::{ArborError, Result};
use crate::git::{ref_exists, run_git};
use crate::model::{GitStatus, WorktreeName};
use log::{debug, info};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A worktree entry parsed from `git worktree list --porcelain`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ListedWorktree {
    path: PathBuf,
    /// Checked-out branch, `None` when detached.
    branch: Option<String>,
    bare: bool,
    /// Directory is gone; git only keeps the administrative entry.
    prunable: bool,
}

/// Git backend backed by the `git` command-line client.
#[derive(Debug, Clone)]
pub struct CliBackend {
    repo_root: PathBuf,
    worktrees_dir: PathBuf,
    remote: String,
}

impl CliBackend {
    /// Create a backend for the repository at `repo_root` managing worktrees
    /// under `worktrees_dir`.
    pub fn new(
        repo_root: impl Into<PathBuf>,
        worktrees_dir: impl Into<PathBuf>,
        remote: impl Into<String>,
    ) -> Self {
        Self {
            repo_root: repo_root.into(),
            worktrees_dir: worktrees_dir.into(),
            remote: remote.into(),
        }
    }

    pub fn worktrees_dir(&self) -> &Path {
        &self.worktrees_dir
    }

    fn worktree_path(&self, name: &str) -> PathBuf {
        self.worktrees_dir.join(name)
    }

    fn list_all(&self) -> Result<Vec<ListedWorktree>> {
        let output = run_git(&self.repo_root, &["worktree", "list", "--porcelain"])?;
        Ok(parse_worktree_list(&output.stdout))
    }

    fn is_managed(&self, path: &Path) -> bool {
        let managed_root = canonical(&self.worktrees_dir);
        path.parent()
            .is_some_and(|parent| parent == self.worktrees_dir || canonical(parent) == managed_root)
    }

    fn local_branch_exists(&self, branch: &str) -> Result<bool> {
        ref_exists(&self.repo_root, &format!("refs/heads/{}", branch))
    }

    fn remote_branch_exists(&self, branch: &str) -> Result<bool> {
        ref_exists(
            &self.repo_root,
            &format!("refs/remotes/{}/{}", self.remote, branch),
        )
    }

    /// Managed worktrees go by name; any other checkout by its full path,
    /// which can never equal a managed name.
    fn holder_name(&self, path: &Path) -> WorktreeName {
        if self.is_managed(path) {
            directory_name(path)
        } else {
            path.display().to_string()
        }
    }

    fn remote_ref(&self, branch: &str) -> String {
        format!("{}/{}", self.remote, branch)
    }
}

impl GitBackend for CliBackend {
    fn branch_exists(&self, branch: &str) -> Result<bool> {
        Ok(self.local_branch_exists(branch)? || self.remote_branch_exists(branch)?)
    }

    fn current_branch(&self, worktree_path: &Path) -> Result<String> {
        let output = run_git(worktree_path, &["rev-parse", "--abbrev-ref", "HEAD"])?;
        Ok(output.stdout)
    }

    fn status(&self, worktree_path: &Path) -> Result<GitStatus> {
        let output = run_git(worktree_path, &["status", "--porcelain=v2", "--branch"])?;
        Ok(parse_status_v2(&output.stdout))
    }

    fn worktree_holding(&self, branch: &str) -> Result<Option<WorktreeName>> {
        let holder = self
            .list_all()?
            .into_iter()
            .find(|wt| wt.branch.as_deref() == Some(branch))
            .map(|wt| self.holder_name(&wt.path));
        Ok(holder)
    }

    fn create_worktree(&self, name: &str, branch: &str) -> Result<()> {
        let path = self.worktree_path(name);
        let path_str = path.to_string_lossy();

        std::fs::create_dir_all(&self.worktrees_dir).map_err(|e| {
            ArborError::backend(
                "worktree add",
                format!(
                    "failed to create worktrees directory '{}': {}",
                    self.worktrees_dir.display(),
                    e
                ),
            )
        })?;

        if self.local_branch_exists(branch)? {
            run_git(&self.repo_root, &["worktree", "add", &path_str, branch])?;
        } else if self.remote_branch_exists(branch)? {
            let upstream = self.remote_ref(branch);
            run_git(
                &self.repo_root,
                &["worktree", "add", "--track", "-b", branch, &path_str, &upstream],
            )?;
        } else {
            return Err(ArborError::backend(
                "worktree add",
                format!("branch '{}' does not exist", branch),
            ));
        }

        info!("created worktree '{}' on '{}'", name, branch);
        Ok(())
    }

    fn switch_branch(&self, name: &str, branch: &str) -> Result<()> {
        let path = self.worktree_path(name);

        if self.local_branch_exists(branch)? {
            run_git(&path, &["switch", branch])?;
        } else {
            let upstream = self.remote_ref(branch);
            run_git(&path, &["switch", "--track", "-c", branch, &upstream])?;
        }

        info!("switched worktree '{}' to '{}'", name, branch);
        Ok(())
    }

    fn remove_worktree(&self, name: &str) -> Result<()> {
        let path = self.worktree_path(name);
        let path_str = path.to_string_lossy();

        // Removal is only reached after confirmation; a doubled --force also
        // removes locked worktrees.
        run_git(
            &self.repo_root,
            &["worktree", "remove", "--force", "--force", &path_str],
        )?;

        info!("removed worktree '{}'", name);
        Ok(())
    }

    fn list_worktrees(&self) -> Result<BTreeMap<WorktreeName, PathBuf>> {
        let managed = self
            .list_all()?
            .into_iter()
            .filter(|wt| !wt.bare && !wt.prunable && self.is_managed(&wt.path))
            .map(|wt| (directory_name(&wt.path), wt.path))
            .collect::<BTreeMap<_, _>>();
        debug!("found {} managed worktree(s)", managed.len());
        Ok(managed)
    }

    fn fetch(&self) -> Result<()> {
        run_git(&self.repo_root, &["fetch", "--prune", &self.remote])?;
        info!("fetched '{}'", self.remote);
        Ok(())
    }
}

fn canonical(path: &Path) -> PathBuf {
    path.canonicalize().unwrap_or_else(|_| path.to_path_buf())
}

fn directory_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse `git worktree list --porcelain` output.
///
/// Format: blank-line separated records, each starting with
/// `worktree <path>` followed by `HEAD <sha>`, `branch refs/heads/<name>`
/// or `detached`, and optional `bare`, `locked`, `prunable` lines.
fn parse_worktree_list(stdout: &str) -> Vec<ListedWorktree> {
    let mut worktrees = Vec::new();
    let mut current: Option<ListedWorktree> = None;

    for line in stdout.lines() {
        if let Some(path) = line.strip_prefix("worktree ") {
            worktrees.extend(current.take());
            current = Some(ListedWorktree {
                path: PathBuf::from(path),
                branch: None,
                bare: false,
                prunable: false,
            });
            continue;
        }

        let Some(wt) = current.as_mut() else {
            continue;
        };

        if let Some(branch_ref) = line.strip_prefix("branch ") {
            wt.branch = branch_ref.strip_prefix("refs/heads/").map(String::from);
        } else if line == "detached" {
            wt.branch = None;
        } else if line == "bare" {
            wt.bare = true;
        } else if line == "prunable" || line.starts_with("prunable ") {
            wt.prunable = true;
        }
    }

    worktrees.extend(current);
    worktrees
}

/// Parse `git status --porcelain=v2 --branch` output.
fn parse_status_v2(stdout: &str) -> GitStatus {
    let mut status = GitStatus::default();

    for line in stdout.lines() {
        if let Some(ab) = line.strip_prefix("# branch.ab ") {
            for part in ab.split_whitespace() {
                if let Some(n) = part.strip_prefix('+') {
                    status.ahead = n.parse().unwrap_or(0);
                } else if let Some(n) = part.strip_prefix('-') {
                    status.behind = n.parse().unwrap_or(0);
                }
            }
        } else if line.starts_with("1 ") || line.starts_with("2 ") {
            status.dirty = true;
            // Second field is XY; X is the index (staged) state.
            let staged = line
                .split(' ')
                .nth(1)
                .and_then(|xy| xy.chars().next())
                .is_some_and(|x| x != '.');
            if staged {
                status.staged += 1;
            }
        } else if line.starts_with("u ") || line.starts_with("? ") {
            status.dirty = true;
        }
    }

    status
}
