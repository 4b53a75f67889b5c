//! Population count strategies over large, arbitrarily aligned byte buffers.
//!
//! The engine splits a buffer into machine-word chunks, counts each chunk with
//! a pluggable [`kernel::WordKernel`], folds in the unaligned tail with the bit
//! loop, and can partition the chunks across fork-join workers.
//!
//! ```
//! use bitcount_rs::strategy::Strategy;
//!
//! let data = [0xFFu8, 0x01, 0x00, 0x80, 0x0F];
//! assert_eq!(Strategy::Kernighan.count(&data), 14);
//! assert_eq!(Strategy::Table.count_parallel(&data, Some(4)), 14);
//! ```

/// Use mimalloc as the global allocator for the library and binary.
/// Input buffers are allocated once per run; worker threads benefit from
/// mimalloc's thread-local caches for their small allocations.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod bench;
pub mod common;
pub mod engine;
pub mod error;
pub mod kernel;
pub mod strategy;
pub mod table;
pub mod threads;

pub use error::{BitcountError, Result};

/// Crate version, as reported by the binary.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
