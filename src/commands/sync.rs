//! `arbor sync` and `arbor plan`.

use super::display::{format_plan, format_summary, print_json};
use super::prompt::RemovalPrompt;
use crate::backend::GitBackend;
use crate::cli::{PlanArgs, SyncArgs};
use crate::config::Config;
use crate::context::RepoContext;
use crate::error::Result;
use crate::plan::{SyncPlan, plan};
use crate::probe::Prober;
use crate::sync::{SyncOptions, SyncOutcome, SyncSummary, execute};
use log::info;
use serde::Serialize;

#[derive(Serialize)]
struct SyncReport<'a> {
    dry_run: bool,
    plan: &'a SyncPlan,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<&'a SyncSummary>,
}

pub fn cmd_sync(ctx: &RepoContext, args: &SyncArgs) -> Result<()> {
    let config = ctx.load_config()?;
    let backend = ctx.backend(&config);
    let prompt = RemovalPrompt::new(args.yes);

    run_sync(&backend, &config, args, &mut |message: &str| {
        prompt.confirm(message)
    })
}

pub fn cmd_plan(ctx: &RepoContext, args: &PlanArgs) -> Result<()> {
    let sync_args = SyncArgs {
        dry_run: true,
        fetch: args.fetch,
        json: args.json,
        ..SyncArgs::default()
    };
    cmd_sync(ctx, &sync_args)
}

/// Probe, plan, and execute against `backend`.
pub(super) fn run_sync(
    backend: &dyn GitBackend,
    config: &Config,
    args: &SyncArgs,
    confirm: &mut dyn FnMut(&str) -> bool,
) -> Result<()> {
    if args.fetch || config.fetch {
        info!("fetching from {}", config.remote);
        backend.fetch()?;
    }

    let actual = Prober::new(backend)
        .with_desired(&config.worktrees)
        .probe()?;
    let plan = plan(&config.worktrees, &actual);

    if !args.json {
        print!("{}", format_plan(&plan, args.force));
    }

    let options = SyncOptions {
        dry_run: args.dry_run,
        force: args.force,
    };
    let outcome = execute(backend, &plan, options, confirm)?;

    match &outcome {
        SyncOutcome::DryRun(_) if args.json => print_json(&SyncReport {
            dry_run: true,
            plan: &plan,
            summary: None,
        })?,
        SyncOutcome::DryRun(_) => {
            if !plan.is_converged() {
                println!("Dry run: no changes made.");
            }
        }
        SyncOutcome::Applied(summary) if args.json => print_json(&SyncReport {
            dry_run: false,
            plan: &plan,
            summary: Some(summary),
        })?,
        SyncOutcome::Applied(summary) => {
            if !plan.is_converged() {
                print!("{}", format_summary(summary));
            }
        }
    }

    Ok(())
}
