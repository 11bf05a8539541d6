//! # gitx
//!
//! Small helpers on top of the `git` command line.
//!
//! Currently provides `gitx count`, which runs `git shortlog HEAD -n -s`
//! and prints the number of commits reachable from `HEAD`, optionally broken
//! down per author.
//!
//! ## Usage
//!
//! ```bash
//! # Grand total only
//! gitx count
//!
//! # One line per author, then the total
//! gitx count --all
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Argument parsing and command dispatch
//! - [`git`] - Running git and capturing its output
//! - [`count`] - Parsing shortlog output into per-author tallies
//! - [`ui`] - Console output abstraction
//! - [`config`] - Settings read from the environment

pub mod cli;
pub mod config;
pub mod count;
pub mod git;
pub mod ui;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs a stderr `tracing` subscriber filtered by `filter`.
///
/// Does nothing if a global subscriber is already set.
pub fn init_tracing(filter: &str) {
    if tracing::dispatcher::has_been_set() {
        return;
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(fmt_layer)
        .init();
}
