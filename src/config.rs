use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

use tracing::debug;

/// Overrides the git executable.
pub const GIT_PROGRAM_ENV: &str = "GITX_GIT";

/// Tracing filter directive, e.g. `debug` or `gitx=trace`.
pub const LOG_FILTER_ENV: &str = "GITX_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Runtime settings, read from the environment.
#[derive(Debug, Clone)]
pub struct Settings {
    pub git_program: PathBuf,
    pub log_filter: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_vars(env::var_os(GIT_PROGRAM_ENV), env::var(LOG_FILTER_ENV).ok())
    }

    /// Builds settings from already-read values; empty values count as unset.
    ///
    /// Without an explicit git program, `git` is looked up on `PATH`. If the
    /// lookup fails the bare name is kept, so the later spawn reports the
    /// problem.
    pub fn from_vars(git_program: Option<OsString>, log_filter: Option<String>) -> Self {
        let git_program = match git_program.filter(|p| !p.is_empty()) {
            Some(p) => PathBuf::from(p),
            None => match which::which("git") {
                Ok(path) => path,
                Err(e) => {
                    debug!(error = %e, "git not found on PATH");
                    PathBuf::from("git")
                }
            },
        };

        let log_filter = log_filter
            .filter(|f| !f.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

        Self {
            git_program,
            log_filter,
        }
    }
}
