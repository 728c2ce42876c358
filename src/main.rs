//! Binary entry point for the `partmatch` command-line tool.
//!
//! Pipeline: map both inputs, reserve the arena, ingest records, build the
//! per-length suffix indexes and the dictionary, then stream the per-row
//! results to the output file. Every failure aborts with a message and a
//! non-zero exit code; there is no partial output on error.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use anyhow::Context;
use clap::Parser;

use partmatch::cli::{set_display_level, Cli};
use partmatch::displaylevel;
use partmatch::{io, Arena, Matcher, Store, WorkerPool, MAX_LEN, MIN_LEN};

fn run(args: &Cli) -> anyhow::Result<()> {
    let start = Instant::now();

    let parts_map = io::map_input(&args.parts_file, "parts file")?;
    let master_map = io::map_input(&args.master_parts_file, "master parts file")?;

    // Uppercased copies of the parts plus uppercased and hyphen-stripped
    // copies of the masters, padded for alignment.
    let arena_size = parts_map.len() + 2 * master_map.len() + 4 * partmatch::arena::ALIGNMENT;
    let arena = Arena::with_capacity(arena_size)
        .with_context(|| format!("cannot reserve {} bytes for the arena", arena_size))?;

    // More workers than distinct indexable lengths never helps.
    let workers = match args.threads {
        0 => num_cpus::get(),
        n => n,
    }
    .min(MAX_LEN - MIN_LEN);
    let pool = WorkerPool::new(workers, workers * 2).context("cannot start the worker pool")?;
    displaylevel!(3, "using {} worker threads\n", pool.threads());

    let store = Store::build(&pool, &arena, &parts_map, &master_map)?;
    displaylevel!(
        3,
        "loaded {} parts, {} master parts ({} hyphenated)\n",
        store.parts().len(),
        store.masters().len(),
        store.masters_nh_asc().len()
    );

    let matcher = Matcher::build(&pool, &store);
    displaylevel!(3, "dictionary holds {} part codes\n", matcher.dictionary_len());

    let results = File::create(&args.results_file)
        .with_context(|| format!("cannot create results file: {}", args.results_file.display()))?;
    let mut out = BufWriter::with_capacity(1 << 20, results);
    let matched = io::write_results(&mut out, &store, &matcher)
        .with_context(|| format!("cannot write results file: {}", args.results_file.display()))?;
    out.flush()
        .with_context(|| format!("cannot write results file: {}", args.results_file.display()))?;

    displaylevel!(
        2,
        "{} of {} parts matched in {} ms\n",
        matched,
        store.parts().len(),
        start.elapsed().as_millis()
    );
    Ok(())
}

fn main() {
    let args = Cli::parse();
    set_display_level(args.display_level());

    if let Err(e) = run(&args) {
        eprintln!("partmatch: {e:#}");
        std::process::exit(1);
    }
}
