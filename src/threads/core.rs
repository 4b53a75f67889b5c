use std::num::NonZeroUsize;

use crate::error::{BitcountError, Result};

/// Fallback when the platform reports nothing usable: run serially.
pub const FALLBACK_PARALLELISM: usize = 1;

/// Number of execution units available for partitioning. Always >= 1.
///
/// Reports the size of the current rayon pool (the global pool, or the pool
/// whose `install` we are running in), then the OS figure, then 1.
pub fn available_parallelism() -> usize {
    let pool = rayon::current_num_threads();
    if pool > 0 {
        return pool;
    }
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(FALLBACK_PARALLELISM)
}

/// Resolve a requested worker count. `None` uses the probe; `Some(0)` is
/// degenerate and collapses to a single serial worker.
#[inline]
pub fn normalize_workers(requested: Option<usize>) -> usize {
    match requested {
        None => available_parallelism(),
        Some(n) => n.max(1),
    }
}

/// Size the global rayon pool. Only the first call in a process takes effect;
/// later calls leave the existing pool alone and return an error.
pub fn configure_global_pool(threads: usize) -> Result<()> {
    let threads = threads.max(1);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
        .map_err(|e| BitcountError::InvalidThreads(e.to_string()))?;
    log::debug!("global rayon pool sized to {} threads", threads);
    Ok(())
}

/// Build a dedicated pool with exactly `threads` workers (at least 1).
pub fn build_pool(threads: usize) -> Result<rayon::ThreadPool> {
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads.max(1))
        .build()
        .map_err(|e| BitcountError::InvalidThreads(e.to_string()))
}
