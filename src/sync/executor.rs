//! Plan execution against a backend.

use super::promotion::{self, PlannedSwitch, SwitchStep};
use super::{ConfirmFn, SyncOptions, SyncOutcome, SyncSummary};
use crate::backend::GitBackend;
use crate::error::{ArborError, Operation, OperationFailure, Result};
use crate::model::WorktreeName;
use crate::plan::SyncPlan;
use log::{info, warn};
use std::collections::BTreeSet;

/// Apply `plan` through `backend`.
///
/// `confirm` is called at most once, and only when `options.force` is set
/// and there are orphans to remove.
///
/// # Returns
///
/// * `Ok(SyncOutcome::DryRun)` - `options.dry_run` was set; nothing changed
/// * `Ok(SyncOutcome::Applied)` - Every operation succeeded
/// * `Err(ArborError::BranchInUse)` - Unresolvable branch conflict; nothing changed
/// * `Err(ArborError::Cancelled)` - Orphan removal declined; nothing changed
/// * `Err(ArborError::PartialExecution)` - Some operations failed, the rest were kept
/// * `Err(ArborError::Backend)` - A pre-flight query failed; nothing changed
pub fn execute(
    backend: &dyn GitBackend,
    plan: &SyncPlan,
    options: SyncOptions,
    confirm: &mut ConfirmFn<'_>,
) -> Result<SyncOutcome> {
    if options.dry_run {
        info!("dry run: {} worktree(s) planned", plan.len());
        return Ok(SyncOutcome::DryRun(plan.clone()));
    }

    let removals: BTreeSet<WorktreeName> = if options.force {
        plan.orphaned.clone()
    } else {
        BTreeSet::new()
    };

    let preflight = promotion::resolve(backend, plan, &removals)?;

    if !removals.is_empty() && !confirm(&removal_message(&removals)) {
        return Err(ArborError::Cancelled(format!(
            "removal of {} orphaned worktree(s) declined; nothing was changed",
            removals.len()
        )));
    }

    let mut summary = SyncSummary {
        in_sync: plan.in_sync.iter().cloned().collect(),
        ..SyncSummary::default()
    };
    let mut failures = preflight.failures;

    if !options.force {
        summary.kept_orphans = plan.orphaned.iter().cloned().collect();
    }

    for name in &removals {
        match backend.remove_worktree(name) {
            Ok(()) => summary.removed.push(name.clone()),
            Err(e) => failures.push(failure(name, Operation::Remove, e)),
        }
    }

    let (direct, deferred): (Vec<PlannedSwitch>, Vec<PlannedSwitch>) = preflight
        .switches
        .into_iter()
        .partition(|switch| switch.step == SwitchStep::Direct);

    for switch in direct.iter().chain(deferred.iter()) {
        let blocked_by = match &switch.step {
            SwitchStep::AfterRemoval(holder) if !summary.removed.contains(holder) => Some(holder),
            _ => None,
        };
        if let Some(holder) = blocked_by {
            failures.push(OperationFailure {
                name: switch.name.clone(),
                operation: Operation::Switch,
                cause: format!(
                    "'{}' is still checked out in '{}', which was not removed",
                    switch.branch, holder
                ),
            });
            continue;
        }

        match backend.switch_branch(&switch.name, &switch.branch) {
            Ok(()) => summary.switched.push(switch.name.clone()),
            Err(e) => failures.push(failure(&switch.name, Operation::Switch, e)),
        }
    }

    for (name, branch) in &preflight.creates {
        match backend.create_worktree(name, branch) {
            Ok(()) => summary.created.push(name.clone()),
            Err(e) => failures.push(failure(name, Operation::Create, e)),
        }
    }

    if failures.is_empty() {
        info!(
            "sync applied: {} removed, {} switched, {} created",
            summary.removed.len(),
            summary.switched.len(),
            summary.created.len()
        );
        Ok(SyncOutcome::Applied(summary))
    } else {
        for f in &failures {
            warn!("{}", f);
        }
        Err(ArborError::PartialExecution {
            failures,
            applied: summary.applied(),
        })
    }
}

fn removal_message(removals: &BTreeSet<WorktreeName>) -> String {
    let names: String = removals.iter().map(|n| format!("\n  - {}", n)).collect();
    format!(
        "{} orphaned worktree(s) will be removed and their contents permanently deleted:{}",
        removals.len(),
        names
    )
}

fn failure(name: &str, operation: Operation, err: ArborError) -> OperationFailure {
    OperationFailure {
        name: name.to_string(),
        operation,
        cause: err.to_string(),
    }
}
