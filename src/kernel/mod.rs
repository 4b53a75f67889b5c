//! Bit counting kernels.
//!
//! `count_bits_naive` is the bit-loop strategy over a whole byte slice.
//! The `WordKernel` implementations count one machine word at a time and are
//! driven over a buffer by [`crate::engine`].

mod core;
pub mod native;


pub use self::core::{
    BitLoop, CHUNK_SIZE, Chunk, Hardware, Kernighan, TableKernel, WordKernel, count_bits_naive,
    load_chunk,
};
pub use self::native::{HardwarePopcount, PortablePopcnt, SelectedPopcount};

#[cfg(bitcount_native_popcnt)]
pub use self::native::NativePopcnt;
