use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use thiserror::Error;
use tracing::debug;

/// Arguments passed to git to list per-author commit counts, busiest first.
pub const SHORTLOG_COMMAND: &str = "shortlog HEAD -n -s";

/// Failure while invoking git.
#[derive(Debug, Error)]
pub enum GitError {
    /// The process could not be started or waited on.
    #[error("failed to run `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// The process ran but exited non-zero. Displays git's own stderr.
    #[error("{stderr}")]
    Failed { status: ExitStatus, stderr: String },
}

/// Everything captured from a finished git process.
#[derive(Debug)]
pub struct GitOutput {
    status: ExitStatus,
    stdout: Vec<u8>,
    stderr: Vec<u8>,
}

impl GitOutput {
    pub fn status(&self) -> ExitStatus {
        self.status
    }

    pub fn stdout(&self) -> &[u8] {
        &self.stdout
    }

    pub fn stderr(&self) -> &[u8] {
        &self.stderr
    }
}

/// A single git invocation.
///
/// The command line is split on whitespace, so arguments cannot contain
/// spaces. That is enough for the fixed subcommands this crate issues.
///
/// # Examples
///
/// ```no_run
/// use gitx::git::Git;
///
/// let git = Git::shortlog("git");
/// if git.is_repo() {
///     let out = git.run().expect("git shortlog failed");
///     println!("{}", String::from_utf8_lossy(out.stdout()));
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Git {
    program: PathBuf,
    args: Vec<String>,
    dir: Option<PathBuf>,
}

impl Git {
    pub fn new(program: impl Into<PathBuf>, command_line: &str) -> Self {
        Self {
            program: program.into(),
            args: command_line.split_whitespace().map(String::from).collect(),
            dir: None,
        }
    }

    /// `git shortlog HEAD -n -s`, run with the given executable.
    pub fn shortlog(program: impl Into<PathBuf>) -> Self {
        Self::new(program, SHORTLOG_COMMAND)
    }

    /// Runs the command in `dir` instead of the process working directory.
    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Reports whether the working directory, or any of its parents, holds
    /// a `.git` entry.
    ///
    /// This is a filesystem check only; git is not spawned. Any failure to
    /// resolve the working directory is treated as "not a repository".
    pub fn is_repo(&self) -> bool {
        let start = match &self.dir {
            Some(dir) => std::path::absolute(dir),
            None => std::env::current_dir(),
        };

        match start {
            Ok(dir) => has_git_metadata(&dir),
            Err(e) => {
                debug!(error = %e, "cannot resolve working directory");
                false
            }
        }
    }

    /// Runs the command to completion and captures both output streams.
    ///
    /// Stdin is closed. The child's pipes are owned by `wait_with_output`,
    /// which drains and drops them before returning on every path.
    ///
    /// # Errors
    ///
    /// * [`GitError::Spawn`] if the process cannot be started or reaped.
    /// * [`GitError::Failed`] if it exits non-zero; carries trimmed stderr.
    pub fn run(&self) -> Result<GitOutput, GitError> {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        if let Some(dir) = &self.dir {
            cmd.current_dir(dir);
        }

        debug!(program = %self.program.display(), args = ?self.args, "spawning git");

        let spawn_error = |source| GitError::Spawn {
            program: self.program.display().to_string(),
            source,
        };
        let child = cmd.spawn().map_err(spawn_error)?;
        let out = child.wait_with_output().map_err(spawn_error)?;

        debug!(
            status = %out.status,
            stdout_bytes = out.stdout.len(),
            stderr_bytes = out.stderr.len(),
            "git exited"
        );

        if out.status.success() {
            Ok(GitOutput {
                status: out.status,
                stdout: out.stdout,
                stderr: out.stderr,
            })
        } else {
            Err(GitError::Failed {
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).trim_end().to_string(),
            })
        }
    }
}

/// True if `start` or one of its ancestors contains `.git`.
///
/// `.git` may be a directory (normal clone) or a file (worktrees and
/// submodules point at the real git dir that way).
pub(crate) fn has_git_metadata(start: &Path) -> bool {
    start.ancestors().any(|dir| dir.join(".git").exists())
}

#[cfg(test)]
mod tests {
    use super::{Git, GitError, SHORTLOG_COMMAND, has_git_metadata};
    use std::fs;

    #[test]
    fn command_line_is_split_on_whitespace() {
        let git = Git::new("git", "  shortlog   HEAD\t-n -s ");
        assert_eq!(git.args(), ["shortlog", "HEAD", "-n", "-s"]);
    }

    #[test]
    fn shortlog_uses_fixed_arguments() {
        let git = Git::shortlog("/usr/bin/git");
        assert_eq!(git.program().to_str(), Some("/usr/bin/git"));
        assert_eq!(git.args().join(" "), SHORTLOG_COMMAND);
    }

    #[test]
    fn metadata_found_in_directory_itself() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(dir.path().join(".git")).expect("failed to create .git");

        assert!(has_git_metadata(dir.path()));
    }

    #[test]
    fn metadata_found_in_ancestor() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::create_dir(dir.path().join(".git")).expect("failed to create .git");
        let nested = dir.path().join("a").join("b");
        fs::create_dir_all(&nested).expect("failed to create nested dirs");

        assert!(has_git_metadata(&nested));
    }

    #[test]
    fn git_file_counts_as_metadata() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        fs::write(dir.path().join(".git"), "gitdir: ../real.git\n").expect("failed to write .git");

        assert!(Git::new("git", "status").current_dir(dir.path()).is_repo());
    }

    #[test]
    fn plain_directory_is_not_a_repo() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");

        assert!(!Git::shortlog("git").current_dir(dir.path()).is_repo());
    }

    #[test]
    fn missing_directory_is_not_a_repo() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let gone = dir.path().join("does-not-exist");

        assert!(!Git::shortlog("git").current_dir(gone).is_repo());
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let git = Git::new("/nonexistent/gitx-test-program", "shortlog");
        match git.run() {
            Err(GitError::Spawn { program, .. }) => {
                assert_eq!(program, "/nonexistent/gitx-test-program")
            }
            other => panic!("expected spawn error, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn successful_run_captures_stdout() {
        let out = Git::new("echo", "5 Alice").run().expect("echo failed");

        assert!(out.status().success());
        assert_eq!(out.stdout(), b"5 Alice\n");
        assert!(out.stderr().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_is_a_failure() {
        match Git::new("false", "").run() {
            Err(GitError::Failed { status, stderr }) => {
                assert!(!status.success());
                assert_eq!(stderr, "");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }

    #[cfg(unix)]
    #[test]
    fn failure_displays_stderr_verbatim() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = Git::new("ls", "definitely-not-here")
            .current_dir(dir.path())
            .run()
            .expect_err("ls of a missing file should fail");

        assert!(err.to_string().contains("definitely-not-here"));
    }
}
