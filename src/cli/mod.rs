//! CLI argument parsing for arbor.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Arbor: keep a fleet of git worktrees in sync with a declarative mapping.
///
/// The desired worktrees are listed in `arbor.yaml` at the repository root:
/// each name maps to the branch it should have checked out. `arbor sync`
/// creates missing worktrees, switches drifted ones, and (with `--force`)
/// removes worktrees that are no longer listed.
#[derive(Parser, Debug)]
#[command(name = "arbor")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Config file (default: `<repo root>/arbor.yaml`, or $ARBOR_CONFIG).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for arbor.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Reconcile worktrees with the config.
    ///
    /// Creates missing worktrees and switches worktrees whose branch drifted.
    /// Worktrees no longer in the config are only removed with --force.
    Sync(SyncArgs),

    /// Show what `sync` would do without changing anything.
    Plan(PlanArgs),

    /// List managed worktrees with branch and working-tree status.
    Status(StatusArgs),

    /// Print the path of the worktree matching a name fragment.
    ///
    /// Matches exact name, then prefix, then substring (case-insensitive).
    /// Intended for shell integration: `cd "$(arbor switch dev)"`.
    Switch(SwitchArgs),

    /// Check the config and that every configured branch exists.
    Validate,
}

/// Arguments for the `sync` command.
#[derive(Parser, Debug, Default)]
pub struct SyncArgs {
    /// Report the plan without applying it.
    #[arg(long)]
    pub dry_run: bool,

    /// Remove worktrees that are no longer in the config.
    #[arg(long)]
    pub force: bool,

    /// Skip the removal confirmation prompt.
    #[arg(short, long)]
    pub yes: bool,

    /// Fetch from the remote before comparing.
    #[arg(long)]
    pub fetch: bool,

    /// Print machine-readable JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `plan` command.
#[derive(Parser, Debug, Default)]
pub struct PlanArgs {
    /// Fetch from the remote before comparing.
    #[arg(long)]
    pub fetch: bool,

    /// Print machine-readable JSON instead of text.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `status` command.
#[derive(Parser, Debug, Default)]
pub struct StatusArgs {
    /// Print machine-readable JSON instead of a table.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `switch` command.
#[derive(Parser, Debug)]
pub struct SwitchArgs {
    /// Full or partial worktree name.
    pub name: String,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}
