use std::time::{Duration, Instant};

use crate::error::{BitcountError, Result};
use crate::strategy::Strategy;

/// One mebibyte.
pub const MIB: usize = 1024 * 1024;

/// Default amount of random data, in MiB.
pub const DEFAULT_MEGS: usize = 100;

/// Default shift of the buffer start, to force unaligned chunk reads.
pub const DEFAULT_OFFSET: usize = 1;

/// Iterations for the bit loop, which is an order of magnitude slower.
pub const NAIVE_ITERS: usize = 10;
/// Iterations for the table and Kernighan strategies.
pub const KERNEL_ITERS: usize = 25;
/// Iterations for the hardware strategy.
pub const FAST_ITERS: usize = 100;

/// Validated parameters of a benchmark session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    /// Size of the random input in MiB.
    pub megs: usize,
    /// Worker count for parallel runs. `None` uses the thread probe.
    pub threads: Option<usize>,
    /// Bytes skipped at the start of the buffer (the length shrinks to match).
    pub offset: usize,
    /// Strategies to run, in order.
    pub strategies: Vec<Strategy>,
    /// Overrides the per-strategy iteration counts.
    pub iterations: Option<usize>,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            megs: DEFAULT_MEGS,
            threads: None,
            offset: DEFAULT_OFFSET,
            strategies: Strategy::ALL.to_vec(),
            iterations: None,
        }
    }
}

impl BenchConfig {
    /// Reject configurations the counting core must never see.
    pub fn validate(&self) -> Result<()> {
        let len = self.buffer_len()?;
        if self.offset >= len {
            return Err(BitcountError::InvalidSize(format!(
                "offset {} leaves no data in a {} byte buffer",
                self.offset, len
            )));
        }
        if self.threads == Some(0) {
            return Err(BitcountError::InvalidThreads(
                "thread count must be at least 1".to_string(),
            ));
        }
        if self.iterations == Some(0) {
            return Err(BitcountError::InvalidIterations(
                "iteration count must be at least 1".to_string(),
            ));
        }
        if self.strategies.is_empty() {
            return Err(BitcountError::UnknownStrategy("(none selected)".to_string()));
        }
        Ok(())
    }

    /// Total bytes to source, before the offset is applied.
    pub fn buffer_len(&self) -> Result<usize> {
        if self.megs == 0 {
            return Err(BitcountError::InvalidSize(
                "data size must be at least 1 MiB".to_string(),
            ));
        }
        self.megs.checked_mul(MIB).ok_or_else(|| {
            BitcountError::InvalidSize(format!("{} MiB overflows the address space", self.megs))
        })
    }

    /// Iterations to time `strategy` for.
    pub fn iterations_for(&self, strategy: Strategy) -> usize {
        if let Some(n) = self.iterations {
            return n;
        }
        match strategy {
            Strategy::Naive => NAIVE_ITERS,
            Strategy::Table | Strategy::Kernighan => KERNEL_ITERS,
            Strategy::Hardware => FAST_ITERS,
        }
    }

    /// The ordered list of runs for a machine with `parallelism` execution units.
    ///
    /// The bit loop runs once. Each chunked strategy runs serially, then again
    /// partitioned across workers when more than one unit is available.
    pub fn runs(&self, parallelism: usize) -> Vec<Run> {
        let workers = self.threads.unwrap_or(parallelism).max(1);
        let mut runs = Vec::new();

        if self.strategies.contains(&Strategy::Naive) {
            runs.push(Run {
                strategy: Strategy::Naive,
                mode: Mode::Serial,
                iterations: self.iterations_for(Strategy::Naive),
            });
        }

        let chunked: Vec<Strategy> = self
            .strategies
            .iter()
            .copied()
            .filter(|s| *s != Strategy::Naive)
            .collect();

        for &strategy in &chunked {
            runs.push(Run {
                strategy,
                mode: Mode::Serial,
                iterations: self.iterations_for(strategy),
            });
        }
        if workers > 1 {
            for &strategy in &chunked {
                runs.push(Run {
                    strategy,
                    mode: Mode::Parallel(workers),
                    iterations: self.iterations_for(strategy),
                });
            }
        }
        runs
    }
}

/// How a run drives the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Serial,
    Parallel(usize),
}

/// One timed benchmark entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub strategy: Strategy,
    pub mode: Mode,
    pub iterations: usize,
}

impl Run {
    /// Report heading, e.g. "Brian Kernighan's method (serial)".
    pub fn description(&self) -> String {
        match (self.strategy, self.mode) {
            (Strategy::Naive, _) => self.strategy.label().to_string(),
            (s, Mode::Serial) => format!("{} (serial)", s.label()),
            (s, Mode::Parallel(n)) => format!("{} (parallel, {} workers)", s.label(), n),
        }
    }

    /// Count `data` once the way this run does.
    pub fn count(&self, data: &[u8]) -> u64 {
        match self.mode {
            Mode::Serial => self.strategy.count(data),
            Mode::Parallel(workers) => self.strategy.count_parallel(data, Some(workers)),
        }
    }
}

/// Progress events emitted while timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The first iteration finished with this many set bits.
    FirstCount(u64),
    /// Another progress interval has elapsed.
    Tick,
}

/// Iterations between progress ticks: a tenth of the total, or every
/// iteration for short runs.
pub fn progress_interval(iterations: usize) -> usize {
    let tenth = iterations / 10;
    if tenth < 10 { 1 } else { tenth }
}

/// Result of timing a run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    /// Set bits reported by the first iteration.
    pub bits: u64,
    /// False if any later iteration disagreed with the first.
    pub consistent: bool,
    pub iterations: usize,
    pub elapsed: Duration,
}

impl Timing {
    pub fn seconds_per_iteration(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.elapsed.as_secs_f64() / self.iterations as f64
    }
}

/// Time `run` over `data`, reporting progress through `on_progress`.
pub fn time_run(run: &Run, data: &[u8], mut on_progress: impl FnMut(Progress)) -> Timing {
    let interval = progress_interval(run.iterations);
    let mut bits = 0u64;
    let mut consistent = true;

    let start = Instant::now();
    for i in 0..run.iterations {
        let n = run.count(data);
        if i == 0 {
            bits = n;
            on_progress(Progress::FirstCount(n));
        } else {
            consistent &= n == bits;
            if i % interval == 0 {
                on_progress(Progress::Tick);
            }
        }
    }
    let elapsed = start.elapsed();

    Timing {
        bits,
        consistent,
        iterations: run.iterations,
        elapsed,
    }
}
