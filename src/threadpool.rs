//! Bounded worker pool for ingest and per-length table construction.
//!
//! Backed by `rayon::ThreadPool`, with a bounded `crossbeam_channel` acting
//! as a slot semaphore so a batch submission never floods the queue. Jobs may
//! borrow from the caller's stack: [`WorkerPool::run_scoped`] joins every job
//! before returning, and [`WorkerPool::join`] runs a pair of closures to
//! completion on the pool.

use crossbeam_channel::{bounded, Receiver, Sender};
use rayon::ThreadPool as RayonPool;

/// A unit of work submitted to the pool. Captures its arguments, replacing
/// the usual function-pointer-plus-context pairing.
pub type Job<'env> = Box<dyn FnOnce() + Send + 'env>;

/// Fixed-size worker pool with bounded in-flight submissions.
pub struct WorkerPool {
    pool: RayonPool,
    /// Token channel: one token per free slot. Submitters take a token
    /// before spawning; workers return it when the job finishes.
    slot_tx: Sender<()>,
    slot_rx: Receiver<()>,
    nb_threads: usize,
}

impl WorkerPool {
    /// Creates a pool of `nb_threads` workers with `queue_size` extra
    /// submission slots. Returns `None` when either is zero or the worker
    /// threads cannot be spawned.
    pub fn new(nb_threads: usize, queue_size: usize) -> Option<Self> {
        if nb_threads < 1 || queue_size < 1 {
            return None;
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(nb_threads)
            .build()
            .ok()?;

        let capacity = queue_size + nb_threads;
        let (slot_tx, slot_rx) = bounded(capacity);
        for _ in 0..capacity {
            slot_tx.send(()).ok()?;
        }

        Some(WorkerPool {
            pool,
            slot_tx,
            slot_rx,
            nb_threads,
        })
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.nb_threads
    }

    /// Runs every job on the pool and returns once all of them have
    /// finished. Submission happens on the calling thread and blocks while
    /// all slots are taken, bounding the number of in-flight jobs.
    pub fn run_scoped<'env>(&self, jobs: Vec<Job<'env>>) {
        self.pool.in_place_scope(|scope| {
            for job in jobs {
                self.slot_rx.recv().expect("worker pool slot channel closed");
                let slot_tx = self.slot_tx.clone();
                scope.spawn(move |_| {
                    job();
                    let _ = slot_tx.send(());
                });
            }
        });
    }

    /// Runs `a` and `b` concurrently on the pool and returns both results.
    pub fn join<A, B, RA, RB>(&self, a: A, b: B) -> (RA, RB)
    where
        A: FnOnce() -> RA + Send,
        B: FnOnce() -> RB + Send,
        RA: Send,
        RB: Send,
    {
        self.pool.install(|| rayon::join(a, b))
    }
}
