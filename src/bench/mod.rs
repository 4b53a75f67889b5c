//! Benchmark session support: configuration, run planning, timing.

mod core;


pub use self::core::*;
