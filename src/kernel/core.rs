use std::marker::PhantomData;

use super::native::{HardwarePopcount, SelectedPopcount};
use crate::table::{self, LookupTable};

/// Machine word the engine reads chunks as.
pub type Chunk = usize;

/// Width of a chunk in bytes.
pub const CHUNK_SIZE: usize = std::mem::size_of::<Chunk>();

/// Read the chunk stored in the first `CHUNK_SIZE` bytes of `bytes`.
///
/// No alignment requirement: the word is assembled by value.
#[inline(always)]
pub fn load_chunk(bytes: &[u8]) -> Chunk {
    let mut raw = [0u8; CHUNK_SIZE];
    raw.copy_from_slice(&bytes[..CHUNK_SIZE]);
    Chunk::from_ne_bytes(raw)
}

/// Count set bits one bit at a time.
///
/// The reference definition every other strategy is checked against.
/// The only kernel that is valid on a partial word, so the engine uses it
/// for unaligned tails.
pub fn count_bits_naive(data: &[u8]) -> u64 {
    let mut bitcount = 0u64;
    for &byte in data {
        for bit in 0..8 {
            if byte & (1u8 << bit) != 0 {
                bitcount += 1;
            }
        }
    }
    bitcount
}

/// A per-word counting kernel.
///
/// Implementations must return exactly `word.count_ones()`; they differ
/// only in how they get there.
pub trait WordKernel: Sync {
    /// Short identifier used in reports and benchmark ids.
    fn name(&self) -> &'static str;

    /// Number of set bits in `word`.
    fn count_word(&self, word: Chunk) -> u64;
}

/// Bit loop over the word's bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct BitLoop;

impl WordKernel for BitLoop {
    fn name(&self) -> &'static str {
        "naive"
    }

    #[inline]
    fn count_word(&self, word: Chunk) -> u64 {
        count_bits_naive(&word.to_ne_bytes())
    }
}

/// Byte lookup table, one read per byte of the word.
///
/// Holding the handle is proof the shared table is fully built.
#[derive(Debug, Clone, Copy)]
pub struct TableKernel {
    table: &'static LookupTable,
}

impl TableKernel {
    /// Kernel over the shared table, building it on first use.
    pub fn new() -> Self {
        TableKernel {
            table: table::initialize(),
        }
    }

    /// The process-wide table this kernel reads from.
    pub fn table(&self) -> &'static LookupTable {
        self.table
    }
}

impl Default for TableKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl WordKernel for TableKernel {
    fn name(&self) -> &'static str {
        "table"
    }

    #[inline]
    fn count_word(&self, word: Chunk) -> u64 {
        self.table.count_bytes(&word.to_ne_bytes())
    }
}

/// Brian Kernighan's method: clear the lowest set bit until none remain.
/// Runs in O(set bits) per word.
#[derive(Debug, Clone, Copy, Default)]
pub struct Kernighan;

impl WordKernel for Kernighan {
    fn name(&self) -> &'static str {
        "kernighan"
    }

    #[inline]
    fn count_word(&self, word: Chunk) -> u64 {
        let mut word = word;
        let mut total = 0u64;
        while word != 0 {
            total += 1;
            word &= word - 1;
        }
        total
    }
}

/// Hardware population count through a `HardwarePopcount` capability.
///
/// `Hardware::default()` uses the variant selected at build time; see
/// [`crate::kernel::native`] for the platform precondition of the native one.
#[derive(Debug, Clone, Copy)]
pub struct Hardware<P: HardwarePopcount = SelectedPopcount> {
    _capability: PhantomData<fn() -> P>,
}

impl<P: HardwarePopcount> Hardware<P> {
    pub fn new() -> Self {
        Hardware {
            _capability: PhantomData,
        }
    }
}

impl<P: HardwarePopcount> Default for Hardware<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: HardwarePopcount> WordKernel for Hardware<P> {
    fn name(&self) -> &'static str {
        "hardware"
    }

    #[inline(always)]
    fn count_word(&self, word: Chunk) -> u64 {
        P::popcount(word) as u64
    }
}
