//! `arbor switch`: print the path of a worktree picked by name fragment.

use crate::cli::SwitchArgs;
use crate::context::RepoContext;
use crate::error::{ArborError, Result};
use crate::probe;
use crate::resolve::resolve;
use std::path::PathBuf;

pub fn cmd_switch(ctx: &RepoContext, args: &SwitchArgs) -> Result<()> {
    let path = switch_target(ctx, &args.name)?;
    println!("{}", path.display());
    Ok(())
}

/// Resolve `fragment` to the path of an existing managed worktree.
pub(super) fn switch_target(ctx: &RepoContext, fragment: &str) -> Result<PathBuf> {
    let config = ctx.load_config()?;
    let backend = ctx.backend(&config);
    let actual = probe::probe(&backend)?;

    let name = resolve(&actual, fragment)?;
    actual
        .get(&name)
        .map(|entry| entry.path.clone())
        .ok_or_else(|| ArborError::NotFound {
            fragment: fragment.to_string(),
            candidates: Vec::new(),
        })
}
