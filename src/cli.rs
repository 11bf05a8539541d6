use std::ffi::OsString;

use clap::{Args, Parser, Subcommand};
use tracing::debug;

use crate::config::Settings;
use crate::count;
use crate::git::Git;
use crate::ui::Ui;

/// Printed when the working directory is outside any repository.
pub const NOT_A_REPOSITORY: &str = "Not a git repository (or any of the parent directories): .git";

#[derive(Parser, Debug)]
#[command(name = "gitx", version, about = "Small helpers on top of git")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

// Every subcommand `gitx` knows about. The variant doc is the synopsis
// shown in `gitx --help`; `long_about` is the per-command help.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Outputs commit counts
    #[command(
        long_about = "Counts commits reachable from HEAD per author using \
        `git shortlog HEAD -n -s` and prints the grand total. With --all, \
        each author's count is printed first, busiest author first."
    )]
    Count(CountArgs),
}

#[derive(Args, Debug, Clone, Default)]
pub struct CountArgs {
    /// Print each author's commit count before the total
    #[arg(long)]
    pub all: bool,

    /// Accepted for compatibility; currently ignored
    pub target: Option<String>,
}

/// Main CLI entry point for `gitx`.
///
/// Parses `args` (including the program name) and dispatches to the chosen
/// subcommand, writing all user-facing output through `ui`.
///
/// # Exit Codes
///
/// * `Ok(0)` – success, including `--help` and `--version`.
/// * `Err(())` – usage error, not a repository, or git failed. The
///   diagnostic has already been sent to `ui`; callers exit with `1`.
pub fn entry<I, T, U>(args: I, settings: &Settings, ui: &mut U) -> Result<i32, ()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
    U: Ui,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => {
            let rendered = e.render().to_string();
            if e.use_stderr() {
                ui.error(rendered.trim_end());
                return Err(());
            }
            ui.info(rendered.trim_end());
            return Ok(0);
        }
    };

    match cli.command {
        Commands::Count(args) => run_count(&args, settings, ui),
    }
}

/// Runs `git shortlog` in the current directory and prints the tally.
fn run_count<U: Ui>(args: &CountArgs, settings: &Settings, ui: &mut U) -> Result<i32, ()> {
    if let Some(target) = &args.target {
        debug!(target = %target, "positional argument is ignored by count");
    }

    let git = Git::shortlog(&settings.git_program);
    if !git.is_repo() {
        ui.error(NOT_A_REPOSITORY);
        return Err(());
    }

    let out = match git.run() {
        Ok(out) => out,
        Err(e) => {
            ui.error(&e.to_string());
            return Err(());
        }
    };

    let summary = count::aggregate(out.stdout(), args.all, ui);
    debug!(?summary, "count finished");

    Ok(0)
}
