//! Record store: ingest of the two input files.
//!
//! Each input is one code per line. Lines are split on `\n` (an optional
//! preceding `\r` is dropped), trimmed of ASCII spaces, and canonicalized to
//! upper case into the arena. Part rows are kept whatever their length;
//! master rows shorter than [`MIN_LEN`](crate::MIN_LEN) are dropped before
//! they are assigned an index. A master whose canonical contains `-` also
//! gets a hyphen-stripped copy in the arena.
//!
//! All record strings are borrowed views: `original` points into the input
//! bytes, `canonical` (and the no-hyphens copy) into the arena. Both must
//! outlive the store.

use crate::arena::Arena;
use crate::index::SuffixRecord;
use crate::threadpool::WorkerPool;
use crate::{Error, MIN_LEN};

// ─────────────────────────────────────────────────────────────────────────────
// Records
// ─────────────────────────────────────────────────────────────────────────────

/// One row of the parts file: the query side of a match.
#[derive(Clone, Copy, Debug)]
pub struct Part<'a> {
    /// Trimmed row in its original case.
    pub original: &'a [u8],
    /// Uppercased copy used for all comparisons.
    pub canonical: &'a [u8],
    /// Position among accepted rows, 0-based.
    pub orig_index: u32,
}

impl<'a> Part<'a> {
    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

/// One accepted row of the master parts file: the catalog side of a match.
#[derive(Clone, Copy, Debug)]
pub struct MasterPart<'a> {
    pub original: &'a [u8],
    pub canonical: &'a [u8],
    /// Canonical with every `-` removed; present only when the canonical
    /// contains at least one `-`. May be shorter than the indexable minimum.
    pub canonical_no_hyphens: Option<&'a [u8]>,
    pub orig_index: u32,
}

impl<'a> MasterPart<'a> {
    pub fn len(&self) -> usize {
        self.canonical.len()
    }
}

/// A master part viewed through its hyphen-stripped canonical, for the
/// no-hyphens index. Shares `orig_index` with the master it came from.
#[derive(Clone, Copy, Debug)]
pub struct MasterPartNh<'a> {
    pub code_nh: &'a [u8],
    pub orig_index: u32,
}

impl<'a> SuffixRecord<'a> for Part<'a> {
    fn suffix_key(&self) -> &'a [u8] {
        self.canonical
    }
    fn value(&self) -> u32 {
        self.orig_index
    }
}

impl<'a> SuffixRecord<'a> for MasterPart<'a> {
    fn suffix_key(&self) -> &'a [u8] {
        self.canonical
    }
    fn value(&self) -> u32 {
        self.orig_index
    }
}

impl<'a> SuffixRecord<'a> for MasterPartNh<'a> {
    fn suffix_key(&self) -> &'a [u8] {
        self.code_nh
    }
    fn value(&self) -> u32 {
        self.orig_index
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Store
// ─────────────────────────────────────────────────────────────────────────────

/// The six record sequences produced from the two inputs.
pub struct Store<'a> {
    parts: Vec<Part<'a>>,
    parts_asc: Vec<Part<'a>>,
    masters: Vec<MasterPart<'a>>,
    masters_asc: Vec<MasterPart<'a>>,
    masters_nh_asc: Vec<MasterPartNh<'a>>,
}

impl<'a> Store<'a> {
    /// Ingests both files concurrently. The canonicalized copies land in
    /// `arena`; failure means the arena was sized too small.
    pub fn build(
        pool: &WorkerPool,
        arena: &'a Arena,
        parts_bytes: &'a [u8],
        master_bytes: &'a [u8],
    ) -> Result<Store<'a>, Error> {
        let (parts_result, masters_result) = pool.join(
            || ingest_parts(arena, parts_bytes),
            || ingest_masters(arena, master_bytes),
        );
        let (parts, parts_asc) = parts_result?;
        let (masters, masters_asc, masters_nh_asc) = masters_result?;

        Ok(Store {
            parts,
            parts_asc,
            masters,
            masters_asc,
            masters_nh_asc,
        })
    }

    /// Parts in original row order.
    pub fn parts(&self) -> &[Part<'a>] {
        &self.parts
    }

    /// Parts sorted ascending by length, ties in original order.
    pub fn parts_asc(&self) -> &[Part<'a>] {
        &self.parts_asc
    }

    /// Accepted masters in original row order.
    pub fn masters(&self) -> &[MasterPart<'a>] {
        &self.masters
    }

    /// Accepted masters sorted ascending by length, ties in original order.
    pub fn masters_asc(&self) -> &[MasterPart<'a>] {
        &self.masters_asc
    }

    /// Hyphen-stripped master views of indexable length, sorted ascending by
    /// the stripped length, ties in original order.
    pub fn masters_nh_asc(&self) -> &[MasterPartNh<'a>] {
        &self.masters_nh_asc
    }

    pub fn part_by_orig_index(&self, index: u32) -> Part<'a> {
        self.parts[index as usize]
    }

    pub fn master_by_orig_index(&self, index: u32) -> MasterPart<'a> {
        self.masters[index as usize]
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Line handling
// ─────────────────────────────────────────────────────────────────────────────

/// Splits on `\n`; a final unterminated line is yielded, a trailing newline
/// does not produce an empty extra line.
fn lines(mut bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    std::iter::from_fn(move || {
        if bytes.is_empty() {
            return None;
        }
        match bytes.iter().position(|&b| b == b'\n') {
            Some(i) => {
                let line = &bytes[..i];
                bytes = &bytes[i + 1..];
                Some(line)
            }
            None => {
                let line = bytes;
                bytes = &[];
                Some(line)
            }
        }
    })
}

/// Drops an optional trailing `\r`, then ASCII spaces from both ends.
/// Only 0x20 counts as trimmable; tabs and other whitespace are data.
fn trim_record(line: &[u8]) -> &[u8] {
    let mut s = line.strip_suffix(b"\r").unwrap_or(line);
    while let [b' ', rest @ ..] = s {
        s = rest;
    }
    while let [rest @ .., b' '] = s {
        s = rest;
    }
    s
}

fn line_count(bytes: &[u8]) -> usize {
    let newlines = bytes.iter().filter(|&&b| b == b'\n').count();
    if bytes.is_empty() || bytes.ends_with(b"\n") {
        newlines
    } else {
        newlines + 1
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Ingest
// ─────────────────────────────────────────────────────────────────────────────

type PartsIngest<'a> = (Vec<Part<'a>>, Vec<Part<'a>>);
type MastersIngest<'a> = (Vec<MasterPart<'a>>, Vec<MasterPart<'a>>, Vec<MasterPartNh<'a>>);

fn ingest_parts<'a>(arena: &'a Arena, bytes: &'a [u8]) -> Result<PartsIngest<'a>, Error> {
    // One block per file: every uppercased copy fits in the input's size.
    let mut upper = arena.alloc(bytes.len()).ok_or(Error::ArenaExhausted)?;

    let mut parts = Vec::with_capacity(line_count(bytes));
    for line in lines(bytes) {
        let original = trim_record(line);

        let (dst, rest) = std::mem::take(&mut upper).split_at_mut(original.len());
        upper = rest;
        for (d, &s) in dst.iter_mut().zip(original) {
            *d = s.to_ascii_uppercase();
        }
        let canonical: &'a [u8] = dst;

        parts.push(Part {
            original,
            canonical,
            orig_index: parts.len() as u32,
        });
    }

    // Vec's sort is stable and the rows are pushed in file order, so equal
    // lengths stay ordered by original index.
    let mut parts_asc = parts.clone();
    parts_asc.sort_by_key(|p| p.len());

    Ok((parts, parts_asc))
}

fn ingest_masters<'a>(arena: &'a Arena, bytes: &'a [u8]) -> Result<MastersIngest<'a>, Error> {
    // Uppercased plus hyphen-stripped copies: at most twice the input.
    let mut extra = arena.alloc(bytes.len() * 2).ok_or(Error::ArenaExhausted)?;

    let mut masters: Vec<MasterPart<'a>> = Vec::with_capacity(line_count(bytes));
    for line in lines(bytes) {
        let original = trim_record(line);
        if original.len() < MIN_LEN {
            // Dropped rows do not consume an index.
            continue;
        }

        let (dst, rest) = std::mem::take(&mut extra).split_at_mut(original.len());
        extra = rest;
        for (d, &s) in dst.iter_mut().zip(original) {
            *d = s.to_ascii_uppercase();
        }
        let canonical: &'a [u8] = dst;

        let canonical_no_hyphens = if canonical.contains(&b'-') {
            let stripped_len = canonical.iter().filter(|&&b| b != b'-').count();
            let (nh, rest) = std::mem::take(&mut extra).split_at_mut(stripped_len);
            extra = rest;
            let mut at = 0;
            for &b in canonical {
                if b != b'-' {
                    nh[at] = b;
                    at += 1;
                }
            }
            let nh: &'a [u8] = nh;
            Some(nh)
        } else {
            None
        };

        masters.push(MasterPart {
            original,
            canonical,
            canonical_no_hyphens,
            orig_index: masters.len() as u32,
        });
    }

    let mut masters_asc = masters.clone();
    masters_asc.sort_by_key(|m| m.len());

    // Stripped copies below the indexable minimum stay on the record but
    // never reach the no-hyphens index.
    let mut masters_nh_asc: Vec<MasterPartNh<'a>> = masters
        .iter()
        .filter_map(|m| {
            m.canonical_no_hyphens
                .filter(|nh| nh.len() >= MIN_LEN)
                .map(|code_nh| MasterPartNh {
                    code_nh,
                    orig_index: m.orig_index,
                })
        })
        .collect();
    masters_nh_asc.sort_by_key(|m| m.code_nh.len());

    Ok((masters, masters_asc, masters_nh_asc))
}
