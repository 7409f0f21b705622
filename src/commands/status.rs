//! `arbor status`: table of managed worktrees.

use super::display::{format_status, print_json};
use crate::cli::StatusArgs;
use crate::context::RepoContext;
use crate::error::Result;
use crate::probe::Prober;

pub fn cmd_status(ctx: &RepoContext, args: &StatusArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let backend = ctx.backend(&config);

    let actual = Prober::new(&backend)
        .with_desired(&config.worktrees)
        .probe()?;

    if args.json {
        print_json(&actual)
    } else {
        print!("{}", format_status(&actual));
        Ok(())
    }
}
