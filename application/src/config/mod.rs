//! Application-level configuration.
//!
//! - [`PoolParams`]: worker pool control (concurrency, history depth, timeouts)

pub mod pool_params;

pub use pool_params::{
    DEFAULT_HISTORY_DEPTH, DEFAULT_MAX_CONCURRENCY, DEFAULT_REQUEST_TIMEOUT, PoolParams,
};
