//! Chunked reduction engine and fork-join partitioner.

mod core;
mod parallel;

#[cfg(test)]
mod tests;

pub use self::core::reduce;
pub use self::parallel::{Partition, Span, parallel_reduce, parallel_reduce_in};
