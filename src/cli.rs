//! Command-line definition and display-level plumbing.
//!
//! Three positional paths plus a worker-count override and verbosity
//! switches. Messages go to stderr through [`displaylevel!`]; the results
//! file is the only thing written to the output path.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU32, Ordering};

use clap::Parser;

/// Match part codes against a master-part catalog by longest suffix.
#[derive(Parser, Debug)]
#[command(name = "partmatch", version, about)]
pub struct Cli {
    /// Parts file: one code per line (the queries).
    pub parts_file: PathBuf,

    /// Master parts file: one code per line (the catalog).
    pub master_parts_file: PathBuf,

    /// Results file: one `<part>;<match>` line per part row.
    pub results_file: PathBuf,

    /// Worker threads for index construction (0 = logical cores).
    #[arg(short = 'T', long = "threads", default_value_t = 0)]
    pub threads: usize,

    /// Print errors only.
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Increase verbosity (repeatable).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Display level implied by the verbosity switches.
    /// 0 = silent, 1 = errors, 2 = summary (default), 3+ = progress.
    pub fn display_level(&self) -> u32 {
        if self.quiet {
            1
        } else {
            2 + u32::from(self.verbose)
        }
    }
}

// ── Display level global ──────────────────────────────────────────────────────

static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

/// Prints to stderr when the current display level is at least `$level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
