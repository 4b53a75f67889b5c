mod core;

#[cfg(test)]
mod tests;

pub use self::core::{LookupTable, initialize, is_initialized, lookup};
