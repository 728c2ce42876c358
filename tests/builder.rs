// Unit tests for per-length table construction (index/builder.rs).
//
// Records are handed in sorted ascending by length with ties in original
// order, exactly as the store produces them.

use partmatch::index::{build_suffix_list_tables, build_suffix_tables, start_indexes};
use partmatch::store::Part;
use partmatch::{WorkerPool, MAX_LEN, MIN_LEN};

fn pool() -> WorkerPool {
    WorkerPool::new(4, 8).expect("valid pool")
}

fn part(code: &'static str, orig_index: u32) -> Part<'static> {
    Part {
        original: code.as_bytes(),
        canonical: code.as_bytes(),
        orig_index,
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// start_indexes
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn start_indexes_records_first_position_per_length() {
    let records = [part("AAA", 0), part("BBB", 1), part("CCCCC", 2)];
    let starts = start_indexes(&records);
    assert_eq!(starts[3], Some(0));
    assert_eq!(starts[5], Some(2));
}

#[test]
fn start_indexes_backfills_gaps_from_longer_lengths() {
    let records = [part("AAA", 0), part("CCCCC", 1)];
    let starts = start_indexes(&records);
    // No length-4 record: the first record of length >= 4 is the length-5 one.
    assert_eq!(starts[4], Some(1));
    // Lengths above the longest record have no start at all.
    assert_eq!(starts[6], None);
    assert_eq!(starts[MAX_LEN - 1], None);
    // Lengths below the shortest record inherit the first record.
    assert_eq!(starts[0], Some(0));
}

#[test]
fn start_indexes_ignores_over_long_records() {
    let long = "X".repeat(MAX_LEN);
    let records = [part("AAA", 0), Part {
        original: long.as_bytes(),
        canonical: long.as_bytes(),
        orig_index: 1,
    }];
    let starts = start_indexes(&records);
    assert_eq!(starts[3], Some(0));
    // The over-long record must not open any length slot.
    assert_eq!(starts[4], None);
}

#[test]
fn start_indexes_empty_input() {
    let records: [Part<'static>; 0] = [];
    let starts = start_indexes(&records);
    assert!(starts.iter().all(Option::is_none));
}

// ─────────────────────────────────────────────────────────────────────────────
// build_suffix_tables
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn tables_exist_only_for_populated_lengths() {
    let records = [part("AAA", 0), part("XXABC", 1)];
    let tables = build_suffix_tables(&pool(), &records);
    assert_eq!(tables.len(), MAX_LEN);
    assert!(tables[3].is_some());
    assert!(tables[4].is_some()); // backfilled from the length-5 record
    assert!(tables[5].is_some());
    assert!(tables[6].is_none());
    // Lengths below the indexable minimum never get a table.
    assert!(tables[0].is_none());
    assert!(tables[MIN_LEN - 1].is_none());
}

#[test]
fn tables_key_on_trailing_bytes() {
    let records = [part("ABC", 0), part("XABC", 1)];
    let tables = build_suffix_tables(&pool(), &records);

    let t3 = tables[3].as_ref().unwrap();
    // Both records end in ABC at length 3; the earliest row wins.
    assert_eq!(t3.lookup(b"ABC"), Some(0));
    assert_eq!(t3.lookup(b"XAB"), None);

    let t4 = tables[4].as_ref().unwrap();
    assert_eq!(t4.lookup(b"XABC"), Some(1));
    assert_eq!(t4.lookup(b"ABC"), None);
}

#[test]
fn first_wins_follows_original_row_order() {
    let records = [part("XAAA", 0), part("YAAA", 1)];
    let tables = build_suffix_tables(&pool(), &records);
    let t3 = tables[3].as_ref().unwrap();
    assert_eq!(t3.lookup(b"AAA"), Some(0));
}

#[test]
fn over_long_records_are_not_indexed() {
    let long = format!("{}WIDGET", "X".repeat(MAX_LEN));
    let records = [part("WIDGET", 0), Part {
        original: long.as_bytes(),
        canonical: long.as_bytes(),
        orig_index: 1,
    }];
    let tables = build_suffix_tables(&pool(), &records);
    let t6 = tables[6].as_ref().unwrap();
    assert_eq!(t6.lookup(b"WIDGET"), Some(0));
    assert_eq!(t6.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// build_suffix_list_tables
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn list_tables_traverse_newest_first() {
    let records = [part("AAA", 0), part("BAAA", 1), part("CAAA", 2)];
    let tables = build_suffix_list_tables(&pool(), &records);
    let t3 = tables[3].as_ref().unwrap();
    let values: Vec<u32> = t3.lookup(b"AAA").collect();
    assert_eq!(values, vec![2, 1, 0]);

    let t4 = tables[4].as_ref().unwrap();
    assert_eq!(t4.lookup(b"BAAA").collect::<Vec<_>>(), vec![1]);
    assert_eq!(t4.lookup(b"CAAA").collect::<Vec<_>>(), vec![2]);
}

#[test]
fn parallel_build_matches_across_pool_sizes() {
    let codes: Vec<String> = (0..200)
        .map(|i| format!("{:0width$}", i, width = 3 + (i % 20)))
        .collect();
    let mut records: Vec<Part> = codes
        .iter()
        .enumerate()
        .map(|(i, c)| part_from(c, i as u32))
        .collect();
    records.sort_by_key(|p| p.canonical.len());

    let single = WorkerPool::new(1, 1).unwrap();
    let many = WorkerPool::new(8, 16).unwrap();
    let a = build_suffix_tables(&single, &records);
    let b = build_suffix_tables(&many, &records);

    for length in 0..MAX_LEN {
        match (&a[length], &b[length]) {
            (None, None) => {}
            (Some(x), Some(y)) => {
                assert_eq!(x.len(), y.len(), "length {}", length);
                for record in &records {
                    let key = record.canonical;
                    if key.len() >= length && key.len() >= 3 && key.len() < MAX_LEN && length >= 3 {
                        let suffix = &key[key.len() - length..];
                        assert_eq!(x.lookup(suffix), y.lookup(suffix));
                    }
                }
            }
            _ => panic!("table presence differs at length {}", length),
        }
    }
}

fn part_from<'a>(code: &'a str, orig_index: u32) -> Part<'a> {
    Part {
        original: code.as_bytes(),
        canonical: code.as_bytes(),
        orig_index,
    }
}
