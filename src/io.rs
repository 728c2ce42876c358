//! File input and results output.
//!
//! Inputs are memory-mapped read-only; every record string the store hands
//! out is a view into these maps or the arena. The results writer emits one
//! `<original>;<match>` line per part row in input order, with an empty
//! match field on a miss.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use memmap2::Mmap;

use crate::matcher::Matcher;
use crate::store::Store;
use crate::Error;

/// Maps an input file read-only. An unreadable or empty file is fatal.
pub fn map_input(path: &Path, what: &'static str) -> anyhow::Result<Mmap> {
    let file = File::open(path).with_context(|| format!("cannot open {}: {}", what, path.display()))?;
    let len = file
        .metadata()
        .with_context(|| format!("cannot stat {}: {}", what, path.display()))?
        .len();
    if len == 0 {
        return Err(Error::EmptyInput(what).into());
    }
    // SAFETY: the map is read-only; concurrent mutation of an input file
    // during a run is outside the supported contract.
    let map = unsafe { Mmap::map(&file) }
        .with_context(|| format!("cannot map {}: {}", what, path.display()))?;
    Ok(map)
}

/// Writes the per-row results and returns how many rows matched.
pub fn write_results<W: Write>(out: &mut W, store: &Store, matcher: &Matcher) -> io::Result<usize> {
    let mut matched = 0;
    for part in store.parts() {
        out.write_all(part.original)?;
        out.write_all(b";")?;
        if let Some(master) = matcher.find_match(part.original) {
            out.write_all(master)?;
            matched += 1;
        }
        out.write_all(b"\n")?;
    }
    Ok(matched)
}
