// partmatch: suffix-index part-code matcher

pub mod arena;
pub mod cli;
pub mod index;
pub mod io;
pub mod matcher;
pub mod store;
pub mod threadpool;

use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// Domain constants
// ─────────────────────────────────────────────────────────────────────────────

/// Shortest code length that participates in matching. Trimmed part codes
/// below this length never match; master rows below it are dropped at ingest.
pub const MIN_LEN: usize = 3;

/// Exclusive upper bound on indexed code lengths. Suffix tables exist for
/// lengths in `[MIN_LEN, MAX_LEN)`; longer records are stored but never
/// indexed or matched.
pub const MAX_LEN: usize = 50;

// ─────────────────────────────────────────────────────────────────────────────
// Top-level re-exports for the most common entry points
// ─────────────────────────────────────────────────────────────────────────────

/// Bump arena backing the canonicalized record strings.
pub use arena::Arena;
/// The part-code → master-part dictionary, built once and queried per row.
pub use matcher::Matcher;
/// Record store produced from the two input files.
pub use store::{MasterPart, MasterPartNh, Part, Store};
/// Bounded worker pool used for ingest and per-length table construction.
pub use threadpool::WorkerPool;

// ─────────────────────────────────────────────────────────────────────────────
// Library error type
// ─────────────────────────────────────────────────────────────────────────────

/// Fatal failure kinds raised by the pipeline. Recovery is never attempted;
/// the binary reports the message and exits non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An input file contains no bytes.
    EmptyInput(&'static str),
    /// The arena's pre-reserved block cannot satisfy an allocation.
    ArenaExhausted,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput(what) => write!(f, "{what} is empty"),
            Error::ArenaExhausted => write!(f, "not enough space in the arena"),
        }
    }
}

impl std::error::Error for Error {}
