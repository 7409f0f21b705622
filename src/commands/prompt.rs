//! Interactive confirmation for destructive sync steps.

use dialoguer::Confirm;
use log::warn;
use std::io::IsTerminal;

/// Confirmation gate handed to the sync executor.
#[derive(Debug, Clone, Copy)]
pub struct RemovalPrompt {
    assume_yes: bool,
    is_tty: bool,
}

impl RemovalPrompt {
    pub fn new(assume_yes: bool) -> Self {
        Self {
            assume_yes,
            is_tty: std::io::stdin().is_terminal(),
        }
    }

    pub fn with_tty(assume_yes: bool, is_tty: bool) -> Self {
        Self { assume_yes, is_tty }
    }

    /// Show `message` and ask whether to proceed.
    ///
    /// `--yes` accepts without asking. Without a terminal there is nobody to
    /// ask, so the removal is declined.
    pub fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        if !self.is_tty {
            warn!("stdin is not a terminal; pass --yes to remove worktrees non-interactively");
            return false;
        }

        eprintln!("{}", message);
        match Confirm::new()
            .with_prompt("Proceed?")
            .default(false)
            .interact()
        {
            Ok(answer) => answer,
            Err(e) => {
                warn!("confirmation prompt failed: {}", e);
                false
            }
        }
    }
}
