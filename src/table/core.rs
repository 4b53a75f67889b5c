use std::sync::OnceLock;

use crate::kernel::count_bits_naive;

/// Precomputed set-bit counts for every byte value.
/// `table.lookup(b)` is the number of `1` bits in `b` (0..=8).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTable {
    counts: [u8; 256],
}

impl LookupTable {
    /// Build a fresh table by running the bit loop over all 256 byte values.
    pub fn build() -> Self {
        let mut counts = [0u8; 256];
        for (value, slot) in counts.iter_mut().enumerate() {
            *slot = count_bits_naive(&[value as u8]) as u8;
        }
        LookupTable { counts }
    }

    /// Set-bit count of a single byte.
    #[inline(always)]
    pub fn lookup(&self, byte: u8) -> u8 {
        self.counts[byte as usize]
    }

    /// Sum of set bits over a byte slice, one table read per byte.
    #[inline]
    pub fn count_bytes(&self, data: &[u8]) -> u64 {
        let mut total = 0u64;
        for &b in data {
            total += self.counts[b as usize] as u64;
        }
        total
    }

    /// Raw view of the 256 entries.
    pub fn as_array(&self) -> &[u8; 256] {
        &self.counts
    }
}

/// Process-wide table. Written once inside `get_or_init`, read-only afterwards.
static LOOKUP_TABLE: OnceLock<LookupTable> = OnceLock::new();

/// Build the shared lookup table if needed and return a handle to it.
///
/// Idempotent. Concurrent first callers block until the single build
/// completes, so no caller ever observes a partially filled table.
pub fn initialize() -> &'static LookupTable {
    LOOKUP_TABLE.get_or_init(|| {
        log::debug!("building byte popcount lookup table");
        LookupTable::build()
    })
}

/// True once the shared table has been built.
pub fn is_initialized() -> bool {
    LOOKUP_TABLE.get().is_some()
}

/// Set-bit count of `byte` via the shared table, initializing it on first use.
#[inline]
pub fn lookup(byte: u8) -> u8 {
    initialize().lookup(byte)
}
