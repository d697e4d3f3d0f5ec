//! Quotient hash table filters
pub mod addressing;
pub mod config;
pub mod filter;
pub mod queue;
pub mod storage;
pub mod traits;

pub use config::{
    FINGERPRINT_STORAGE_BITS, FilterConfig, FilterConfigBuilder,
    FilterConfigBuilderError, FilterParams,
};
pub use filter::QuotientFilter;
pub use queue::QueueFilter;
pub use traits::{BulkFilterOps, FilterOps, FilterStats, StreamFilterOps};
