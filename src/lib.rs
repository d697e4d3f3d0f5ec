//! Quotient hash table (QHT) filters for duplicate detection in streams.
//!
//! A QHT answers "have I seen this element before?" using a fixed amount of
//! memory, with support for deletion and a bounded count of duplicates.
//!
//! Layout:
//!    * Table: one flat bit array split into `n_cells` cells.
//!    * Cell: `n_buckets` buckets of `fingerprint_size` bits each.
//!    * Fingerprint: a non-zero hash-derived value. Zero marks an empty bucket.
//!
//! Addressing:
//!     * The primary hash of an element, modulo `n_cells`, picks its cell.
//!     * An independent secondary hash, masked to `fingerprint_size` bits,
//!       gives its fingerprint. A zero result is rehashed.
//!
//! Variants:
//!     * `QuotientFilter`: fingerprints are packed at the front of a cell.
//!       A full cell overwrites a random bucket on insert.
//!     * `QueueFilter`: each cell is a FIFO of its last `n_buckets`
//!       insertions, duplicates included.
//!
//! Obvious problems:
//!     * False positives: an absent element may share its cell and
//!       fingerprint with a stored one.
//!     * False negatives: evicted or aged-out fingerprints are forgotten.
//!     * Delete cannot tell an element from another one with the same cell
//!       and fingerprint, and may remove the wrong one.
//!     * Filters are not synchronized. Wrap them in a lock to share them.
//!
//! ```
//! use qht_rs::{FilterConfigBuilder, FilterOps, QuotientFilter, StreamFilterOps};
//!
//! let config = FilterConfigBuilder::default()
//!     .memory_size_bits(1 << 16)
//!     .n_buckets(3)
//!     .fingerprint_size(8)
//!     .seed(42)
//!     .build()
//!     .unwrap();
//! let mut filter = QuotientFilter::new(config).unwrap();
//!
//! assert!(!filter.stream("first"));
//! assert!(filter.stream("first"));
//! assert!(filter.delete("first"));
//! assert!(!filter.lookup("first"));
//! ```

pub mod common;
mod error;
mod hash;
pub mod qht;

pub use error::{FilterError, Result};
pub use hash::{HashFunction, default_primary_hash, default_secondary_hash};
pub use qht::{
    BulkFilterOps, FINGERPRINT_STORAGE_BITS, FilterConfig, FilterConfigBuilder,
    FilterConfigBuilderError, FilterOps, FilterParams, FilterStats,
    QueueFilter, QuotientFilter, StreamFilterOps,
};
