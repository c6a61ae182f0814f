use std::num::NonZeroUsize;
use std::thread;

use crate::table::DEFAULT_SLOTS;

/// How chunk tables are produced and reduced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Executor {
    /// One table over the whole buffer, no splitting.
    Serial,
    /// Chunks aggregated on a rayon pool, merged in chunk order.
    #[default]
    Rayon,
    /// One scoped thread per chunk, tables merged as they arrive on a channel.
    Threads,
}

#[derive(Debug, Clone)]
pub struct Options {
    pub workers: usize,
    pub executor: Executor,
    /// Starting slot count for every table.
    pub initial_slots: usize,
}

impl Options {
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers.max(1);
        self
    }

    pub fn with_executor(mut self, executor: Executor) -> Self {
        self.executor = executor;
        self
    }

    pub fn with_initial_slots(mut self, slots: usize) -> Self {
        self.initial_slots = slots;
        self
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            workers: thread::available_parallelism().map_or(1, NonZeroUsize::get),
            executor: Executor::default(),
            initial_slots: DEFAULT_SLOTS,
        }
    }
}
