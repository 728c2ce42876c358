//! Per-length suffix indexes.
//!
//! A family of fixed-capacity hash tables, one table per code length in
//! `[MIN_LEN, MAX_LEN)`, keyed by the trailing bytes of a record's canonical
//! code. Two flavors: [`UniqueTable`] keeps the first insertion for a key;
//! [`ListTable`] keeps them all, newest first.

pub mod builder;
pub mod table;

pub use builder::{build_suffix_list_tables, build_suffix_tables, start_indexes, SuffixRecord};
pub use table::{ListTable, ListValues, UniqueTable};
