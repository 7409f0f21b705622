//! Configuration model for arbor.
//!
//! This module defines the Config struct that represents `arbor.yaml`:
//! the desired worktree mapping plus repository layout settings. It supports
//! forward-compatible YAML parsing (unknown fields are ignored), sensible
//! defaults for optional fields, and validation of the mapping.

mod model;
mod operations;


pub use model::{CONFIG_FILE_NAME, Config};
