use std::fmt;
use std::str::FromStr;

use crate::engine::{parallel_reduce, reduce};
use crate::error::BitcountError;
use crate::kernel::{
    BitLoop, Hardware, Kernighan, SelectedPopcount, TableKernel, WordKernel, count_bits_naive,
};
use crate::threads::normalize_workers;

/// The interchangeable bit counting strategies. All agree bit-exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Every bit of every byte, one at a time.
    Naive,
    /// Byte lookup table per chunk.
    Table,
    /// Brian Kernighan's lowest-set-bit clearing per chunk.
    Kernighan,
    /// Hardware population count per chunk.
    ///
    /// With the `native-popcnt` feature the executing CPU must support the
    /// `POPCNT` instruction; this is not checked.
    Hardware,
}

impl Strategy {
    pub const ALL: [Strategy; 4] = [
        Strategy::Naive,
        Strategy::Table,
        Strategy::Kernighan,
        Strategy::Hardware,
    ];

    /// The strategies that run through the chunked engine.
    pub const CHUNKED: [Strategy; 3] = [Strategy::Kernighan, Strategy::Table, Strategy::Hardware];

    pub fn name(self) -> &'static str {
        match self {
            Strategy::Naive => "naive",
            Strategy::Table => "table",
            Strategy::Kernighan => "kernighan",
            Strategy::Hardware => "hardware",
        }
    }

    /// Human readable description used in benchmark reports.
    pub fn label(self) -> &'static str {
        match self {
            Strategy::Naive => "Naive implementation",
            Strategy::Table => "Lookup table implementation",
            Strategy::Kernighan => "Brian Kernighan's method",
            Strategy::Hardware => "Hardware popcount implementation",
        }
    }

    /// Hand this strategy's word kernel to `f`.
    ///
    /// The table kernel is constructed here, so the shared table is built
    /// before `f` can observe it.
    pub fn with_kernel<R>(self, f: impl FnOnce(&dyn WordKernel) -> R) -> R {
        match self {
            Strategy::Naive => f(&BitLoop),
            Strategy::Table => f(&TableKernel::new()),
            Strategy::Kernighan => f(&Kernighan),
            Strategy::Hardware => f(&Hardware::<SelectedPopcount>::new()),
        }
    }

    /// Serial count over `data`.
    pub fn count(self, data: &[u8]) -> u64 {
        match self {
            Strategy::Naive => count_bits_naive(data),
            _ => self.with_kernel(|k| reduce(k, data)),
        }
    }

    /// Partitioned count over `data`. `None` workers use the probe; `Some(0)`
    /// counts serially.
    pub fn count_parallel(self, data: &[u8], workers: Option<usize>) -> u64 {
        let workers = normalize_workers(workers);
        self.with_kernel(|k| parallel_reduce(k, data, workers))
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Strategy {
    type Err = BitcountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "naive" | "bit-loop" | "bitloop" => Ok(Strategy::Naive),
            "table" | "lookup" => Ok(Strategy::Table),
            "kernighan" => Ok(Strategy::Kernighan),
            "hardware" | "popcnt" | "intrinsic" => Ok(Strategy::Hardware),
            _ => Err(BitcountError::UnknownStrategy(s.to_string())),
        }
    }
}

/// Bit loop over the whole buffer.
#[inline]
pub fn count_bits_bit_loop(data: &[u8]) -> u64 {
    count_bits_naive(data)
}

/// Lookup table strategy, serial.
pub fn count_bits_table(data: &[u8]) -> u64 {
    reduce(&TableKernel::new(), data)
}

/// Kernighan strategy, serial.
pub fn count_bits_kernighan(data: &[u8]) -> u64 {
    reduce(&Kernighan, data)
}

/// Hardware strategy, serial.
pub fn count_bits_hardware(data: &[u8]) -> u64 {
    reduce(&Hardware::<SelectedPopcount>::new(), data)
}

/// Hardware strategy split into one equal span per available execution unit.
pub fn count_bits_partitioned(data: &[u8]) -> u64 {
    parallel_reduce(
        &Hardware::<SelectedPopcount>::new(),
        data,
        normalize_workers(None),
    )
}
