//! Dictionary construction and query.
//!
//! The dictionary maps a part's canonical code to the index of its matched
//! master. It is filled in two single-threaded passes whose visiting order
//! carries the tie-breaking rules, so neither pass may be parallelized:
//!
//! 1. Forward over the parts (ascending length): a part that equals the
//!    trailing bytes of some master (first against the master codes, then
//!    against their hyphen-stripped forms) is matched at its own length.
//!    The per-length tables keep the earliest master for a suffix, so ties
//!    go to the lowest original row.
//! 2. Backward over the masters (descending length, descending row within a
//!    length): a master that equals the trailing bytes of some part claims
//!    every such part. First insertion wins, so a part already matched in
//!    pass 1 keeps that match, and among suffix masters the longest one is
//!    recorded.
//!
//! Queries uppercase into a stack buffer and consult the dictionary; the
//! per-length tables are dropped once the passes finish.

use crate::index::{build_suffix_list_tables, build_suffix_tables, UniqueTable};
use crate::store::Store;
use crate::threadpool::WorkerPool;
use crate::{MAX_LEN, MIN_LEN};

/// The final part-code → master mapping, plus the store it resolves into.
pub struct Matcher<'a> {
    store: &'a Store<'a>,
    dictionary: UniqueTable<'a>,
}

impl<'a> Matcher<'a> {
    /// Builds the three per-length table families, runs both passes, and
    /// keeps only the resulting dictionary.
    pub fn build(pool: &WorkerPool, store: &'a Store<'a>) -> Matcher<'a> {
        let mp_tables = build_suffix_tables(pool, store.masters_asc());
        let mp_nh_tables = build_suffix_tables(pool, store.masters_nh_asc());
        let part_tables = build_suffix_list_tables(pool, store.parts_asc());

        let mut dictionary = UniqueTable::with_capacity(store.parts().len());

        // Pass 1: parts that are themselves a master suffix, at the part's
        // own length. A hit on the master codes short-circuits the
        // hyphen-stripped fallback.
        for part in store.parts_asc() {
            let Some(slot) = mp_tables.get(part.len()) else { continue };
            if let Some(table) = slot {
                if let Some(master) = table.lookup(part.canonical) {
                    dictionary.insert_if_absent(part.canonical, master);
                    continue;
                }
            }
            if let Some(Some(table)) = mp_nh_tables.get(part.len()) {
                if let Some(master) = table.lookup(part.canonical) {
                    dictionary.insert_if_absent(part.canonical, master);
                }
            }
        }

        // Pass 2: masters that are a suffix of some part, at the master's
        // own length. The per-suffix lists read newest-first; visiting
        // masters backward keeps the longest suffix for already-seen parts.
        for master in store.masters_asc().iter().rev() {
            let Some(Some(table)) = part_tables.get(master.len()) else { continue };
            for part_index in table.lookup(master.canonical) {
                let part = store.part_by_orig_index(part_index);
                dictionary.insert_if_absent(part.canonical, master.orig_index);
            }
        }

        Matcher { store, dictionary }
    }

    /// Resolves one code to its matched master's original bytes.
    ///
    /// The code must already be trimmed. Codes shorter than the matchable
    /// minimum or too long to have been indexed resolve to `None`.
    pub fn find_match(&self, code: &[u8]) -> Option<&'a [u8]> {
        self.find_master_index(code)
            .map(|index| self.store.master_by_orig_index(index).original)
    }

    /// As [`find_match`](Matcher::find_match), but yields the master's
    /// original row index.
    pub fn find_master_index(&self, code: &[u8]) -> Option<u32> {
        if code.len() < MIN_LEN || code.len() >= MAX_LEN {
            return None;
        }
        let mut buf = [0u8; MAX_LEN];
        let key = &mut buf[..code.len()];
        for (d, &s) in key.iter_mut().zip(code) {
            *d = s.to_ascii_uppercase();
        }
        self.dictionary.lookup(key)
    }

    /// Number of distinct part codes with a match.
    pub fn dictionary_len(&self) -> usize {
        self.dictionary.len()
    }
}
