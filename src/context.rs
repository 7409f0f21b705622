//! Repository context resolution for arbor.
//!
//! Finds the main worktree from any working directory (the primary checkout,
//! a managed worktree, or a subdirectory of either) and resolves where the
//! config file lives. Every command starts here.

use crate::backend::CliBackend;
use crate::config::{CONFIG_FILE_NAME, Config};
use crate::error::{ArborError, Result};
use crate::git;
use log::debug;
use std::env;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the config file location.
pub const CONFIG_ENV_VAR: &str = "ARBOR_CONFIG";

/// Resolved paths for an arbor-managed repository. All paths are absolute.
#[derive(Debug, Clone)]
pub struct RepoContext {
    /// Absolute path to the main git worktree (original clone location).
    pub repo_root: PathBuf,

    /// Config file to load the desired mapping from.
    pub config_path: PathBuf,
}

impl RepoContext {
    /// Resolve the context from the current working directory.
    ///
    /// `config_override` (from `--config`) wins over `ARBOR_CONFIG`, which
    /// wins over `<repo_root>/arbor.yaml`.
    pub fn resolve(config_override: Option<&Path>) -> Result<Self> {
        let cwd = env::current_dir().map_err(|e| {
            ArborError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        let env_override = env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let config_override = config_override.map(Path::to_path_buf).or(env_override);

        Self::resolve_from(&cwd, config_override.as_deref())
    }

    /// Resolve the context from a specific directory.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P, config_override: Option<&Path>) -> Result<Self> {
        let cwd = cwd.as_ref();
        let repo_root = git::get_main_worktree(cwd)?;

        let config_path = match config_override {
            Some(path) if path.is_absolute() => path.to_path_buf(),
            Some(path) => cwd.join(path),
            None => repo_root.join(CONFIG_FILE_NAME),
        };

        debug!(
            "repo root {}, config {}",
            repo_root.display(),
            config_path.display()
        );
        Ok(Self {
            repo_root,
            config_path,
        })
    }

    /// Load and validate the config file.
    pub fn load_config(&self) -> Result<Config> {
        if !self.config_path.exists() {
            return Err(ArborError::UserError(format!(
                "config file not found: {}\n\n\
                 Create it with the worktrees to manage, for example:\n\n\
                 worktrees:\n  main: main\n  dev: develop",
                self.config_path.display()
            )));
        }
        Config::load(&self.config_path)
    }

    /// Production git backend for this repository and config.
    pub fn backend(&self, config: &Config) -> CliBackend {
        CliBackend::new(
            &self.repo_root,
            config.worktrees_path(&self.repo_root),
            &config.remote,
        )
    }
}
