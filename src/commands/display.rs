//! Text and JSON rendering for command output.

use crate::error::{ArborError, Result};
use crate::model::ActualState;
use crate::plan::SyncPlan;
use crate::sync::SyncSummary;
use serde::Serialize;

/// Print any serializable value as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| ArborError::UserError(format!("failed to serialize output: {}", e)))?;
    println!("{}", json);
    Ok(())
}

/// Render a sync plan as indented sections.
pub fn format_plan(plan: &SyncPlan, force: bool) -> String {
    if plan.is_converged() {
        return format!("All {} worktree(s) in sync.\n", plan.in_sync.len());
    }

    let mut out = String::from("Sync plan:\n\n");

    if !plan.missing.is_empty() {
        out.push_str(&format!("Create ({}):\n", plan.missing.len()));
        for (name, branch) in &plan.missing {
            out.push_str(&format!("  + {} [{}]\n", name, branch));
        }
        out.push('\n');
    }

    if !plan.branch_changes.is_empty() {
        out.push_str(&format!("Switch ({}):\n", plan.branch_changes.len()));
        for (name, change) in &plan.branch_changes {
            let from = change
                .promotion_target
                .as_ref()
                .map(|target| format!(" (promoted from {})", target))
                .unwrap_or_default();
            out.push_str(&format!(
                "  ~ {} [{} -> {}]{}\n",
                name, change.old, change.new, from
            ));
        }
        out.push('\n');
    }

    if !plan.orphaned.is_empty() {
        let header = if force { "Remove" } else { "Orphaned, kept without --force" };
        out.push_str(&format!("{} ({}):\n", header, plan.orphaned.len()));
        for name in &plan.orphaned {
            out.push_str(&format!("  - {}\n", name));
        }
        out.push('\n');
    }

    if !plan.in_sync.is_empty() {
        out.push_str(&format!("In sync ({}):\n", plan.in_sync.len()));
        for name in &plan.in_sync {
            out.push_str(&format!("  = {}\n", name));
        }
    }

    out
}

pub fn format_summary(summary: &SyncSummary) -> String {
    let mut out = String::new();

    for name in &summary.removed {
        out.push_str(&format!("Removed {}\n", name));
    }
    for name in &summary.switched {
        out.push_str(&format!("Switched {}\n", name));
    }
    for name in &summary.created {
        out.push_str(&format!("Created {}\n", name));
    }
    if !summary.kept_orphans.is_empty() {
        out.push_str(&format!(
            "Kept {} orphaned worktree(s): {} (use --force to remove)\n",
            summary.kept_orphans.len(),
            summary.kept_orphans.join(", ")
        ));
    }

    out.push_str(&format!(
        "Sync complete: {} change(s) applied, {} already in sync.\n",
        summary.applied(),
        summary.in_sync.len()
    ));
    out
}

/// Render the status table.
pub fn format_status(actual: &ActualState) -> String {
    if actual.is_empty() {
        return "No managed worktrees.\n".to_string();
    }

    let name_width = column_width("NAME", actual.keys().map(String::len));
    let branch_width = column_width(
        "BRANCH",
        actual.values().map(|entry| entry.current_branch.len()),
    );

    let mut out = format!(
        "{:<nw$}  {:<bw$}  {:<5}  {:>6}  {:>5}  {:>6}\n",
        "NAME",
        "BRANCH",
        "DIRTY",
        "STAGED",
        "AHEAD",
        "BEHIND",
        nw = name_width,
        bw = branch_width,
    );

    for (name, entry) in actual {
        let status = entry.git_status;
        let drift = match &entry.expected_branch {
            Some(expected) if !entry.matches_expected() => format!("  (expected {})", expected),
            _ => String::new(),
        };
        out.push_str(&format!(
            "{:<nw$}  {:<bw$}  {:<5}  {:>6}  {:>5}  {:>6}{}\n",
            name,
            entry.current_branch,
            if status.dirty { "yes" } else { "no" },
            status.staged,
            status.ahead,
            status.behind,
            drift,
            nw = name_width,
            bw = branch_width,
        ));
    }

    out
}

fn column_width(header: &str, values: impl Iterator<Item = usize>) -> usize {
    values.fold(header.len(), usize::max)
}
