//! Command implementations for arbor.
//!
//! This module provides the dispatcher that routes CLI commands to their
//! implementations. Every command resolves the repository context first.

mod display;
mod prompt;
mod status;
mod switch;
mod sync;
mod validate;


use crate::cli::{Cli, Command};
use crate::context::RepoContext;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(cli: Cli) -> Result<()> {
    let ctx = RepoContext::resolve(cli.config.as_deref())?;

    match cli.command {
        Command::Sync(args) => sync::cmd_sync(&ctx, &args),
        Command::Plan(args) => sync::cmd_plan(&ctx, &args),
        Command::Status(args) => status::cmd_status(&ctx, &args),
        Command::Switch(args) => switch::cmd_switch(&ctx, &args),
        Command::Validate => validate::cmd_validate(&ctx),
    }
}
