//! Error type for configuration and input handling.
//!
//! The counting core never fails: every strategy is total over `&[u8]`.
//! Errors only arise while normalizing harness configuration or sourcing
//! input data.

use thiserror::Error;

/// Main error type for the fbitcount library.
#[derive(Error, Debug)]
pub enum BitcountError {
    /// A strategy name that does not match any known strategy.
    #[error("unknown strategy '{0}' (expected one of: naive, table, kernighan, hardware)")]
    UnknownStrategy(String),

    /// A requested data size that is zero or does not fit in memory arithmetic.
    #[error("invalid data size: {0}")]
    InvalidSize(String),

    /// A benchmark iteration count of zero.
    #[error("invalid iteration count: {0}")]
    InvalidIterations(String),

    /// Thread pool construction or thread count errors.
    #[error("invalid thread configuration: {0}")]
    InvalidThreads(String),

    /// I/O errors while sourcing input.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, BitcountError>;
