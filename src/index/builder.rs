//! Parallel construction of the per-length suffix tables.
//!
//! Input is a record slice sorted ascending by key length (ties in original
//! file order). For each length `L` in `[MIN_LEN, MAX_LEN)` with at least one
//! record of length ≥ `L`, one pool job builds the table for `L` over the
//! tail of the slice starting at the first such record. Each job writes only
//! its own slot, so the fan-out needs no synchronization beyond the final
//! join.

use crate::index::table::{ListTable, UniqueTable};
use crate::threadpool::{Job, WorkerPool};
use crate::{MAX_LEN, MIN_LEN};

/// A record that contributes suffixes to an index.
pub trait SuffixRecord<'a> {
    /// The canonical bytes the suffixes are taken from.
    fn suffix_key(&self) -> &'a [u8];
    /// The identifier stored in the table for this record.
    fn value(&self) -> u32;
}

/// First position holding a record of length ≥ `L`, for every `L` below
/// `MAX_LEN`; `None` when no such record exists.
///
/// A first pass records where each exact length starts; the backward pass
/// then lets a length with no records of its own inherit the start of the
/// next longer length. Records of length ≥ `MAX_LEN` are ignored here (they
/// are never indexed).
pub fn start_indexes<'a, R: SuffixRecord<'a>>(records: &[R]) -> [Option<usize>; MAX_LEN] {
    let mut starts = [None; MAX_LEN];
    for (i, record) in records.iter().enumerate() {
        let length = record.suffix_key().len();
        if length < MAX_LEN && starts[length].is_none() {
            starts[length] = Some(i);
        }
    }
    let mut carry = None;
    for length in (0..MAX_LEN).rev() {
        match starts[length] {
            Some(i) => carry = Some(i),
            None => starts[length] = carry,
        }
    }
    starts
}

/// Builds the unique-value table family for `records`. Slot `L` of the
/// result indexes every record of length ≥ `L` by its trailing `L` bytes;
/// the first record inserted for a suffix wins.
pub fn build_suffix_tables<'a, R>(pool: &WorkerPool, records: &[R]) -> Vec<Option<UniqueTable<'a>>>
where
    R: SuffixRecord<'a> + Sync,
{
    let starts = start_indexes(records);
    let mut tables: Vec<Option<UniqueTable<'a>>> = (0..MAX_LEN).map(|_| None).collect();
    let mut jobs: Vec<Job<'_>> = Vec::with_capacity(MAX_LEN - MIN_LEN);
    for (length, slot) in tables.iter_mut().enumerate().skip(MIN_LEN) {
        let Some(start) = starts[length] else { continue };
        jobs.push(Box::new(move || {
            *slot = Some(fill_unique_table(records, start, length));
        }));
    }
    pool.run_scoped(jobs);
    tables
}

/// Builds the multi-value table family for `records`. Every record of
/// length ≥ `L` is prepended, so each suffix's list reads back in
/// most-recent-first order.
pub fn build_suffix_list_tables<'a, R>(pool: &WorkerPool, records: &[R]) -> Vec<Option<ListTable<'a>>>
where
    R: SuffixRecord<'a> + Sync,
{
    let starts = start_indexes(records);
    let mut tables: Vec<Option<ListTable<'a>>> = (0..MAX_LEN).map(|_| None).collect();
    let mut jobs: Vec<Job<'_>> = Vec::with_capacity(MAX_LEN - MIN_LEN);
    for (length, slot) in tables.iter_mut().enumerate().skip(MIN_LEN) {
        let Some(start) = starts[length] else { continue };
        jobs.push(Box::new(move || {
            *slot = Some(fill_list_table(records, start, length));
        }));
    }
    pool.run_scoped(jobs);
    tables
}

fn fill_unique_table<'a, R: SuffixRecord<'a>>(
    records: &[R],
    start: usize,
    suffix_length: usize,
) -> UniqueTable<'a> {
    let mut table = UniqueTable::with_capacity(records.len() - start);
    for record in &records[start..] {
        let key = record.suffix_key();
        if key.len() >= MAX_LEN {
            continue;
        }
        table.insert_if_absent(&key[key.len() - suffix_length..], record.value());
    }
    table
}

fn fill_list_table<'a, R: SuffixRecord<'a>>(
    records: &[R],
    start: usize,
    suffix_length: usize,
) -> ListTable<'a> {
    let mut table = ListTable::with_capacity(records.len() - start);
    for record in &records[start..] {
        let key = record.suffix_key();
        if key.len() >= MAX_LEN {
            continue;
        }
        table.prepend(&key[key.len() - suffix_length..], record.value());
    }
    table
}
