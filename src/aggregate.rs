use std::thread;

use rayon::prelude::*;
use rayon::ThreadPoolBuilder;
use tracing::{debug, warn};

use crate::chunk::split;
use crate::config::{Executor, Options};
use crate::error::Error;
use crate::parse::records;
use crate::table::StationTable;

/// Aggregates one newline-aligned chunk into a fresh table.
pub fn aggregate_chunk(chunk: &[u8], slots: usize) -> StationTable<'_> {
    let mut table = StationTable::with_slots(slots);
    for rec in records(chunk) {
        table.record(rec.key, rec.hash, rec.value);
    }
    table
}

/// Aggregates the whole buffer. The buffer must be well formed, see
/// [`crate::parse::parse_record`].
pub fn aggregate<'a>(buf: &'a [u8], options: &Options) -> Result<StationTable<'a>, Error> {
    let table = match options.executor {
        Executor::Serial => aggregate_chunk(buf, options.initial_slots),
        Executor::Rayon => aggregate_rayon(buf, options)?,
        Executor::Threads => aggregate_threads(buf, options),
    };
    debug!(
        executor = ?options.executor,
        stations = table.len(),
        growths = table.growths(),
        "aggregation finished"
    );
    Ok(table)
}

fn non_empty_chunks<'a>(buf: &'a [u8], options: &Options) -> Vec<&'a [u8]> {
    let chunks: Vec<&[u8]> = split(buf, options.workers)
        .into_iter()
        .filter(|chunk| !chunk.is_empty())
        .collect();
    debug!(
        requested = options.workers,
        chunks = chunks.len(),
        bytes = buf.len(),
        "input split"
    );
    chunks
}

fn aggregate_rayon<'a>(buf: &'a [u8], options: &Options) -> Result<StationTable<'a>, Error> {
    let chunks = non_empty_chunks(buf, options);
    let slots = options.initial_slots;
    let pool = ThreadPoolBuilder::new()
        .num_threads(options.workers.max(1))
        .build()?;

    let tables: Vec<StationTable<'a>> = pool.install(|| {
        chunks
            .into_par_iter()
            .map(|chunk| aggregate_chunk(chunk, slots))
            .collect()
    });
    Ok(reduce(tables, slots))
}

fn aggregate_threads<'a>(buf: &'a [u8], options: &Options) -> StationTable<'a> {
    let chunks = non_empty_chunks(buf, options);
    let slots = options.initial_slots;
    let (tx, rx) = crossbeam_channel::bounded(chunks.len());

    thread::scope(|scope| {
        for (i, chunk) in chunks.into_iter().enumerate() {
            let tx = tx.clone();
            scope.spawn(move || {
                let table = aggregate_chunk(chunk, slots);
                debug!(chunk = i, stations = table.len(), "chunk aggregated");
                if tx.send(table).is_err() {
                    warn!(chunk = i, "merge side hung up, chunk dropped");
                }
            });
        }
        drop(tx);
        reduce(rx.iter(), slots)
    })
}

/// Folds chunk tables into the first one, in iteration order.
fn reduce<'a, I>(tables: I, slots: usize) -> StationTable<'a>
where
    I: IntoIterator<Item = StationTable<'a>>,
{
    let mut tables = tables.into_iter();
    let mut total = match tables.next() {
        Some(first) => first,
        None => return StationTable::with_slots(slots),
    };
    let mut merged = 1;
    for table in tables {
        total.merge(table);
        merged += 1;
    }
    debug!(tables = merged, stations = total.len(), "chunk tables merged");
    total
}
