//! Git command runner for arbor.
//!
//! Provides a safe wrapper around git commands with captured stdout/stderr
//! and structured error handling. The production backend issues every git
//! invocation through this module.

use crate::error::{ArborError, Result};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command with the specified working directory.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On successful execution (exit code 0)
/// * `Err(ArborError::Backend)` - On spawn failure or non-zero exit code
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = spawn_git(cwd.as_ref(), args)?;
    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        Err(failure(args, &output, &git_output))
    }
}

/// Check whether `refname` resolves, via `git rev-parse --verify --quiet`.
///
/// # Returns
///
/// * `Ok(true)` - The ref exists
/// * `Ok(false)` - git answered that the ref does not exist (exit code 1)
/// * `Err(ArborError::Backend)` - Spawn failure or any other exit code
pub fn ref_exists<P: AsRef<Path>>(cwd: P, refname: &str) -> Result<bool> {
    let args = ["rev-parse", "--verify", "--quiet", refname];
    let output = spawn_git(cwd.as_ref(), &args)?;

    match output.status.code() {
        Some(0) => Ok(true),
        Some(1) => Ok(false),
        _ => Err(failure(&args, &output, &GitOutput::from_output(&output))),
    }
}

fn spawn_git(cwd: &Path, args: &[&str]) -> Result<Output> {
    let subcommand = args.first().copied().unwrap_or("");
    debug!("git {} (in {})", args.join(" "), cwd.display());

    Command::new("git")
        .current_dir(cwd)
        .args(args)
        .output()
        .map_err(|e| ArborError::backend(subcommand, format!("failed to execute git: {}", e)))
}

fn failure(args: &[&str], output: &Output, git_output: &GitOutput) -> ArborError {
    let exit_code = output.status.code().unwrap_or(-1);
    let error_msg = if git_output.stderr.is_empty() {
        &git_output.stdout
    } else {
        &git_output.stderr
    };

    ArborError::backend(
        args.first().copied().unwrap_or(""),
        format!("exit code {}: {}", exit_code, error_msg),
    )
}

/// Get the path to the main worktree (the original clone location).
///
/// Works from the main checkout, from any linked worktree, and from any
/// subdirectory of either. Returns a `UserError` outside a repository so the
/// CLI reports it as a usage problem rather than a git failure.
pub fn get_main_worktree<P: AsRef<Path>>(cwd: P) -> Result<PathBuf> {
    let cwd = cwd.as_ref();

    let output = Command::new("git")
        .current_dir(cwd)
        .args(["worktree", "list", "--porcelain"])
        .output()
        .map_err(|e| {
            ArborError::UserError(format!("failed to execute git: {} (is git installed?)", e))
        })?;

    if !output.status.success() {
        return Err(ArborError::UserError(
            "not inside a git repository. Run this command from within a git repository."
                .to_string(),
        ));
    }

    // The main worktree is always listed first.
    let git_output = GitOutput::from_output(&output);
    git_output
        .stdout
        .lines()
        .find_map(|line| line.strip_prefix("worktree "))
        .map(PathBuf::from)
        .ok_or_else(|| {
            ArborError::UserError("git worktree list returned no worktrees".to_string())
        })
}
