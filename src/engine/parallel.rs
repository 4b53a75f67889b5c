use std::ops::Range;

use rayon::prelude::*;

use super::core::reduce;
use crate::kernel::{CHUNK_SIZE, WordKernel, count_bits_naive};

/// A contiguous byte range of whole chunks assigned to one worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub len: usize,
}

impl Span {
    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Static split of a buffer into equal worker spans plus a leftover tail.
///
/// Span `k` is `[k * span_len, (k + 1) * span_len)`. Spans are disjoint and
/// cover `[0, covered)` exactly; `[covered, len)` is the leftover, which holds
/// both the chunks left by uneven division and the sub-word tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub len: usize,
    pub worker_count: usize,
    pub chunks_per_worker: usize,
    pub span_len: usize,
    pub covered: usize,
}

impl Partition {
    /// Plan the split of `len` bytes over `worker_count` workers.
    /// A worker count of 0 is treated as 1: a single span over the whole buffer.
    pub fn plan(len: usize, worker_count: usize) -> Self {
        let worker_count = worker_count.max(1);
        let total_chunks = len / CHUNK_SIZE;
        let chunks_per_worker = total_chunks / worker_count;
        let span_len = chunks_per_worker * CHUNK_SIZE;
        Partition {
            len,
            worker_count,
            chunks_per_worker,
            span_len,
            covered: worker_count * span_len,
        }
    }

    /// Span assigned to worker `k`.
    #[inline]
    pub fn span(&self, k: usize) -> Span {
        Span {
            start: k * self.span_len,
            len: self.span_len,
        }
    }

    pub fn spans(&self) -> impl Iterator<Item = Span> + '_ {
        (0..self.worker_count).map(move |k| self.span(k))
    }

    /// Bytes excluded from every span.
    #[inline]
    pub fn leftover(&self) -> Span {
        Span {
            start: self.covered,
            len: self.len - self.covered,
        }
    }
}

/// Count set bits with `worker_count` fork-join workers over disjoint spans.
///
/// Each span is reduced independently with a private accumulator; the
/// partial sums are folded after the join and the leftover bytes are counted
/// once by the bit loop. A worker count of 0 degrades to the serial engine.
/// Counts are identical to [`reduce`] for every worker count.
pub fn parallel_reduce<K: WordKernel + ?Sized>(kernel: &K, data: &[u8], worker_count: usize) -> u64 {
    if worker_count == 0 {
        log::debug!("worker count is 0, counting {} bytes serially", data.len());
        return reduce(kernel, data);
    }
    if worker_count == 1 {
        return reduce(kernel, data);
    }

    let plan = Partition::plan(data.len(), worker_count);

    // Oversubscribed: every span is empty, the whole buffer is leftover.
    let spans_total: u64 = if plan.span_len == 0 {
        0
    } else {
        data[..plan.covered]
            .par_chunks(plan.span_len)
            .map(|span| reduce(kernel, span))
            .sum()
    };

    spans_total + count_bits_naive(&data[plan.leftover().range()])
}

/// [`parallel_reduce`] run inside `pool` instead of the global rayon pool.
pub fn parallel_reduce_in<K: WordKernel + ?Sized>(
    pool: &rayon::ThreadPool,
    kernel: &K,
    data: &[u8],
    worker_count: usize,
) -> u64 {
    pool.install(|| parallel_reduce(kernel, data, worker_count))
}
