//! Arbor: declarative git worktree fleet manager.
//!
//! A desired mapping of worktree names to branches is compared against the
//! worktrees that actually exist ([`probe`]), classified into a [`plan`],
//! and applied through a [`backend::GitBackend`] by [`sync`].

pub mod backend;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod exit_codes;
pub mod git;
pub mod model;
pub mod plan;
pub mod probe;
pub mod resolve;
pub mod sync;

#[cfg(test)]
mod test_support;
