//! Hardware population count capability.
//!
//! `SelectedPopcount` is fixed at compile time:
//! - with the `native-popcnt` feature on x86_64, it executes the `POPCNT`
//!   instruction directly. The executing CPU MUST support `POPCNT`
//!   (any x86_64 CPU since Nehalem / Barcelona). This is a platform
//!   precondition and is NOT checked at runtime; running on a CPU without
//!   the instruction faults with an illegal-instruction signal.
//! - otherwise it is `usize::count_ones`, which LLVM lowers to the native
//!   instruction only when the target features allow it.

/// Counts set bits of one machine word using a platform capability.
pub trait HardwarePopcount {
    /// Short identifier for reports.
    const NAME: &'static str;

    fn popcount(word: usize) -> u32;
}

/// Portable variant: Rust's `count_ones`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PortablePopcnt;

impl HardwarePopcount for PortablePopcnt {
    const NAME: &'static str = "count_ones";

    #[inline(always)]
    fn popcount(word: usize) -> u32 {
        word.count_ones()
    }
}

/// x86_64 `POPCNT` instruction.
#[cfg(bitcount_native_popcnt)]
#[derive(Debug, Clone, Copy, Default)]
pub struct NativePopcnt;

#[cfg(bitcount_native_popcnt)]
impl HardwarePopcount for NativePopcnt {
    const NAME: &'static str = "popcnt";

    #[inline(always)]
    fn popcount(word: usize) -> u32 {
        // SAFETY: the native-popcnt build is only valid on CPUs with POPCNT.
        // See the module docs; the requirement is the caller's, not probed here.
        unsafe { popcnt64(word as u64) }
    }
}

#[cfg(bitcount_native_popcnt)]
#[target_feature(enable = "popcnt")]
#[inline]
unsafe fn popcnt64(word: u64) -> u32 {
    use std::arch::x86_64::_popcnt64;
    #[allow(unused_unsafe)]
    unsafe {
        _popcnt64(word as i64) as u32
    }
}

/// The variant used by the hardware kernel in this build.
#[cfg(bitcount_native_popcnt)]
pub type SelectedPopcount = NativePopcnt;

/// The variant used by the hardware kernel in this build.
#[cfg(not(bitcount_native_popcnt))]
pub type SelectedPopcount = PortablePopcnt;

/// Name of the capability compiled into this build.
pub fn selected_name() -> &'static str {
    <SelectedPopcount as HardwarePopcount>::NAME
}
