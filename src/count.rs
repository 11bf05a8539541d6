use std::fmt;
use std::io::BufRead;
use std::sync::LazyLock;

use regex::Regex;
use tracing::debug;

use crate::ui::Ui;

/// `<count><whitespace><author>` as printed by `git shortlog -n -s`.
static SHORTLOG_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([0-9]+)\s+(\S+.*)").expect("shortlog pattern is valid"));

/// Commit count for one author line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorTally {
    pub name: String,
    pub commits: u64,
}

impl fmt::Display for AuthorTally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.commits)
    }
}

/// Sum of every tally added so far.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunningTotal(u64);

impl RunningTotal {
    /// Adds `tally` to the total. Returns `false` and leaves the total
    /// untouched if the sum would overflow a `u64`.
    #[must_use]
    pub fn add(&mut self, tally: &AuthorTally) -> bool {
        match self.0.checked_add(tally.commits) {
            Some(sum) => {
                self.0 = sum;
                true
            }
            None => false,
        }
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

/// What a pass over shortlog output produced.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountSummary {
    pub total: u64,
    pub authors: usize,
    pub skipped: usize,
}

/// Extracts the count and author from a single shortlog line.
///
/// Returns `None` when the line does not have the expected shape or the
/// count does not fit in a `u64`.
///
/// # Examples
///
/// ```
/// use gitx::count::parse_line;
///
/// let tally = parse_line("    42\tAda Lovelace").unwrap();
/// assert_eq!(tally.commits, 42);
/// assert_eq!(tally.name, "Ada Lovelace");
/// assert!(parse_line("no digits here").is_none());
/// ```
pub fn parse_line(line: &str) -> Option<AuthorTally> {
    let caps = SHORTLOG_LINE.captures(line)?;
    let commits = caps.get(1)?.as_str().parse::<u64>().ok()?;
    let name = caps.get(2)?.as_str().to_string();

    Some(AuthorTally { name, commits })
}

/// Folds shortlog output into a grand total.
///
/// For every line:
/// - a matching line is added to the total and, when `show_all` is set,
///   echoed through [`Ui::info`] as `"<author> (<count>)"`;
/// - a non-matching line is skipped with a [`Ui::warn`].
///
/// Lines are split on raw bytes and decoded lossily, so author names in a
/// legacy encoding are still counted. If the reader itself fails part way
/// the fault goes to [`Ui::error`] and scanning stops. The `"total <sum>"`
/// line is always emitted last, covering whatever was read.
pub fn aggregate<R: BufRead, U: Ui>(reader: R, show_all: bool, ui: &mut U) -> CountSummary {
    let mut total = RunningTotal::default();
    let mut summary = CountSummary::default();

    for chunk in reader.split(b'\n') {
        let bytes = match chunk {
            Ok(b) => b,
            Err(e) => {
                ui.error(&e.to_string());
                break;
            }
        };
        let bytes = bytes.strip_suffix(b"\r").unwrap_or(&bytes[..]);
        let line = String::from_utf8_lossy(bytes);

        match parse_line(&line) {
            Some(tally) => {
                if !total.add(&tally) {
                    summary.skipped += 1;
                    ui.warn(&format!("skipping {:?}: total would overflow", line));
                    continue;
                }
                summary.authors += 1;
                if show_all {
                    ui.info(&tally.to_string());
                }
            }
            None => {
                debug!(line = %line, "unrecognized shortlog line");
                summary.skipped += 1;
                ui.warn(&format!("skipping unrecognized line: {:?}", line));
            }
        }
    }

    summary.total = total.value();
    ui.info(&format!("total {}", summary.total));
    summary
}
