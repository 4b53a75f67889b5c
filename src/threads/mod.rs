mod core;


pub use self::core::{
    FALLBACK_PARALLELISM, available_parallelism, build_pool, configure_global_pool,
    normalize_workers,
};
