//! Exit code constants for the arbor CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid config, unresolvable worktree name)
//! - 2: Branch conflict (target branch checked out in a worktree that stays)
//! - 3: Git operation failure
//! - 4: Cancelled at the confirmation prompt
//! - 5: Partial execution (some operations failed, others were applied)

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, invalid config, or no matching worktree.
pub const USER_ERROR: i32 = 1;

/// A branch change targets a branch held by a worktree that is not being removed.
pub const BRANCH_CONFLICT: i32 = 2;

/// Git operation failure: listing, status, or any backend call.
pub const GIT_FAILURE: i32 = 3;

/// The user declined the destructive-action confirmation.
pub const CANCELLED: i32 = 4;

/// One or more independent operations failed while others succeeded.
pub const PARTIAL_FAILURE: i32 = 5;
