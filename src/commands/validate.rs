//! `arbor validate`: config check plus branch existence.

use crate::backend::GitBackend;
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::{ArborError, Result};
use log::debug;

pub fn cmd_validate(ctx: &RepoContext) -> Result<()> {
    let config = ctx.load_config()?;
    let backend = ctx.backend(&config);

    check_branches(&backend, &config)?;
    println!(
        "Config OK: {} worktree(s) in {}",
        config.worktrees.len(),
        ctx.config_path.display()
    );
    Ok(())
}

/// Fail listing every configured branch that exists neither locally nor on
/// the remote.
pub(super) fn check_branches(backend: &dyn GitBackend, config: &Config) -> Result<()> {
    let mut missing = Vec::new();
    for (name, entry) in &config.worktrees {
        if backend.branch_exists(&entry.branch)? {
            debug!("'{}': branch '{}' exists", name, entry.branch);
        } else {
            missing.push(format!("{} -> {}", name, entry.branch));
        }
    }

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ArborError::UserError(format!(
            "{} configured branch(es) not found locally or on '{}':\n  - {}",
            missing.len(),
            config.remote,
            missing.join("\n  - ")
        )))
    }
}
