// Unit tests for the bounded worker pool (threadpool.rs).

use partmatch::WorkerPool;
use std::sync::atomic::{AtomicUsize, Ordering};

// ─────────────────────────────────────────────────────────────────────────────
// Construction
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn new_rejects_zero_threads() {
    assert!(WorkerPool::new(0, 1).is_none());
}

#[test]
fn new_rejects_zero_queue_size() {
    assert!(WorkerPool::new(1, 0).is_none());
}

#[test]
fn new_accepts_minimal_configuration() {
    let pool = WorkerPool::new(1, 1).unwrap();
    assert_eq!(pool.threads(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// run_scoped
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn run_scoped_executes_every_job() {
    let pool = WorkerPool::new(4, 4).unwrap();
    let counter = AtomicUsize::new(0);
    let jobs: Vec<_> = (0..32)
        .map(|_| {
            let counter = &counter;
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send + '_>
        })
        .collect();
    pool.run_scoped(jobs);
    assert_eq!(counter.load(Ordering::SeqCst), 32);
}

#[test]
fn run_scoped_jobs_may_borrow_and_write_disjoint_slots() {
    let pool = WorkerPool::new(4, 8).unwrap();
    let mut slots = vec![0usize; 16];
    {
        let jobs: Vec<_> = slots
            .iter_mut()
            .enumerate()
            .map(|(i, slot)| {
                Box::new(move || {
                    *slot = i * i;
                }) as Box<dyn FnOnce() + Send + '_>
            })
            .collect();
        pool.run_scoped(jobs);
    }
    for (i, &value) in slots.iter().enumerate() {
        assert_eq!(value, i * i);
    }
}

#[test]
fn run_scoped_handles_more_jobs_than_slots() {
    // 1 worker + 1 queue slot, 64 jobs: submission must throttle, not drop.
    let pool = WorkerPool::new(1, 1).unwrap();
    let counter = AtomicUsize::new(0);
    let jobs: Vec<_> = (0..64)
        .map(|_| {
            let counter = &counter;
            Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }) as Box<dyn FnOnce() + Send + '_>
        })
        .collect();
    pool.run_scoped(jobs);
    assert_eq!(counter.load(Ordering::SeqCst), 64);
}

#[test]
fn run_scoped_with_no_jobs_returns_immediately() {
    let pool = WorkerPool::new(2, 2).unwrap();
    pool.run_scoped(Vec::new());
}

#[test]
fn pool_is_reusable_after_a_batch() {
    let pool = WorkerPool::new(2, 2).unwrap();
    let counter = AtomicUsize::new(0);
    for _ in 0..3 {
        let jobs: Vec<_> = (0..8)
            .map(|_| {
                let counter = &counter;
                Box::new(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                }) as Box<dyn FnOnce() + Send + '_>
            })
            .collect();
        pool.run_scoped(jobs);
    }
    assert_eq!(counter.load(Ordering::SeqCst), 24);
}

// ─────────────────────────────────────────────────────────────────────────────
// join
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn join_returns_both_results() {
    let pool = WorkerPool::new(2, 2).unwrap();
    let (a, b) = pool.join(|| 6 * 7, || "done");
    assert_eq!(a, 42);
    assert_eq!(b, "done");
}

#[test]
fn join_may_borrow_from_the_caller() {
    let pool = WorkerPool::new(2, 2).unwrap();
    let data = vec![1u32, 2, 3, 4];
    let (sum, max) = pool.join(
        || data.iter().sum::<u32>(),
        || data.iter().copied().max().unwrap(),
    );
    assert_eq!(sum, 10);
    assert_eq!(max, 4);
}
