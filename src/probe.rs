//! Actual-state probe.
//!
//! Builds a fresh snapshot of every managed worktree on each call. Nothing is
//! cached: the repository can change between invocations.

use crate::backend::GitBackend;
use crate::error::Result;
use crate::model::{ActualEntry, ActualState, DesiredMapping};
use log::debug;

/// Probes a backend for the current worktree set.
pub struct Prober<'a> {
    backend: &'a dyn GitBackend,
    desired: Option<&'a DesiredMapping>,
}

impl<'a> Prober<'a> {
    pub fn new(backend: &'a dyn GitBackend) -> Self {
        Self {
            backend,
            desired: None,
        }
    }

    /// Fill each entry's `expected_branch` from `desired`.
    pub fn with_desired(mut self, desired: &'a DesiredMapping) -> Self {
        self.desired = Some(desired);
        self
    }

    /// Snapshot every managed worktree.
    ///
    /// All-or-nothing: the first failing backend query fails the whole probe.
    pub fn probe(&self) -> Result<ActualState> {
        let listed = self.backend.list_worktrees()?;
        let mut state = ActualState::new();

        for (name, path) in listed {
            let current_branch = self.backend.current_branch(&path)?;
            let git_status = self.backend.status(&path)?;
            let expected_branch = self
                .desired
                .and_then(|desired| desired.get(&name))
                .map(|entry| entry.branch.clone());

            debug!("probed '{}': on '{}' {:?}", name, current_branch, git_status);
            state.insert(
                name,
                ActualEntry {
                    path,
                    current_branch,
                    expected_branch,
                    git_status,
                },
            );
        }

        Ok(state)
    }
}

/// Probe without a desired mapping.
pub fn probe(backend: &dyn GitBackend) -> Result<ActualState> {
    Prober::new(backend).probe()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::CliBackend;
    use crate::backend::memory::MemoryBackend;
    use crate::error::ArborError;
    use crate::model::{DesiredEntry, GitStatus};
    use crate::test_support::{create_test_repo, git};

    #[test]
    fn probe_reports_branch_and_status() {
        let dirty = GitStatus {
            dirty: true,
            staged: 2,
            ahead: 1,
            behind: 3,
        };
        let backend = MemoryBackend::new()
            .with_worktree("main", "main")
            .with_worktree_status("dev", "develop", dirty);

        let state = probe(&backend).unwrap();

        assert_eq!(state.len(), 2);
        assert_eq!(state["main"].current_branch, "main");
        assert_eq!(state["dev"].current_branch, "develop");
        assert_eq!(state["dev"].git_status, dirty);
        assert_eq!(state["dev"].expected_branch, None);
    }

    #[test]
    fn probe_fills_expected_branch_from_desired() {
        let backend = MemoryBackend::new()
            .with_worktree("main", "main")
            .with_worktree("stray", "old");
        let desired = DesiredMapping::from([("main".to_string(), DesiredEntry::new("trunk"))]);

        let state = Prober::new(&backend).with_desired(&desired).probe().unwrap();

        assert_eq!(state["main"].expected_branch.as_deref(), Some("trunk"));
        assert!(!state["main"].matches_expected());
        assert_eq!(state["stray"].expected_branch, None);
    }

    #[test]
    fn probe_fails_when_listing_fails() {
        let backend = MemoryBackend::new()
            .with_worktree("main", "main")
            .fail_listing();

        let err = probe(&backend).unwrap_err();
        assert!(matches!(err, ArborError::Backend { .. }));
    }

    #[test]
    fn probe_real_repository_ignores_stray_directories() {
        let temp_dir = create_test_repo();
        let path = temp_dir.path();
        git(path, &["branch", "dev"]);
        let backend = CliBackend::new(path, path.join(".worktrees"), "origin");
        backend.create_worktree("dev", "dev").unwrap();
        std::fs::create_dir_all(path.join(".worktrees/not-a-worktree")).unwrap();

        let state = probe(&backend).unwrap();

        assert_eq!(state.keys().collect::<Vec<_>>(), vec!["dev"]);
        assert_eq!(state["dev"].current_branch, "dev");
        assert!(!state["dev"].git_status.dirty);
    }
}
