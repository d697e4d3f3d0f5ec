use crate::error::{FilterError, Result};
use crate::hash::{HashFunction, default_primary_hash, default_secondary_hash};
use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Bit width of the integer fingerprints are handled in.
pub const FINGERPRINT_STORAGE_BITS: u32 = u64::BITS;

/// Configuration shared by both filter variants
#[derive(Clone, Debug, Builder)]
#[builder(pattern = "owned")]
pub struct FilterConfig {
    /// Total bit budget for the table
    #[builder(default = "1 << 20")]
    pub memory_size_bits: u64,

    /// Buckets per cell
    #[builder(default = "3")]
    pub n_buckets: usize,

    /// Bits per fingerprint
    #[builder(default = "8")]
    pub fingerprint_size: usize,

    /// Seed for the eviction RNG. Drawn from the OS when absent.
    #[builder(default, setter(strip_option))]
    pub seed: Option<u64>,

    /// Hash picking the cell of an element
    #[builder(default = "default_primary_hash")]
    pub primary_hash: HashFunction,

    /// Hash deriving the fingerprint, independent of `primary_hash`
    #[builder(default = "default_secondary_hash")]
    pub secondary_hash: HashFunction,
}

impl FilterConfig {
    pub fn validate(&self) -> Result<()> {
        if self.n_buckets == 0 {
            return Err(FilterError::ZeroBuckets);
        }
        if self.fingerprint_size == 0
            || self.fingerprint_size >= FINGERPRINT_STORAGE_BITS as usize
        {
            return Err(FilterError::InvalidFingerprintSize {
                size: self.fingerprint_size,
                max: FINGERPRINT_STORAGE_BITS,
            });
        }

        let cell_bits = (self.n_buckets as u64)
            .checked_mul(self.fingerprint_size as u64)
            .ok_or_else(|| {
                FilterError::InvalidConfig("Cell size overflows u64".into())
            })?;
        let n_cells = self.memory_size_bits / cell_bits;
        if n_cells == 0 {
            return Err(FilterError::ZeroCells {
                memory_size_bits: self.memory_size_bits,
                cell_bits,
            });
        }

        // The table is addressed with usize offsets.
        n_cells
            .checked_mul(cell_bits)
            .and_then(|bits| usize::try_from(bits).ok())
            .ok_or_else(|| {
                FilterError::InvalidConfig(format!(
                    "Table of {n_cells} cells x {cell_bits} bits is not addressable"
                ))
            })?;

        Ok(())
    }
}

/// Table layout derived from a FilterConfig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    pub n_cells: usize,
    pub n_buckets: usize,
    pub fingerprint_size: usize,
    pub table_bits: usize,
}

impl FilterParams {
    pub fn cell_bits(&self) -> usize {
        self.n_buckets * self.fingerprint_size
    }

    pub fn total_buckets(&self) -> usize {
        self.n_cells * self.n_buckets
    }

    /// Chance that an absent element matches one of the fingerprints in its
    /// cell when `load_factor` of all buckets are occupied.
    pub fn estimated_false_positive_rate(&self, load_factor: f64) -> f64 {
        let fingerprints = ((1u64 << self.fingerprint_size) - 1) as f64;
        let occupied = self.n_buckets as f64 * load_factor.clamp(0.0, 1.0);
        1.0 - (1.0 - 1.0 / fingerprints).powf(occupied)
    }
}

impl TryFrom<&FilterConfig> for FilterParams {
    type Error = FilterError;

    fn try_from(config: &FilterConfig) -> Result<Self> {
        config.validate()?;

        let cell_bits = config.n_buckets * config.fingerprint_size;
        let n_cells = (config.memory_size_bits / cell_bits as u64) as usize;

        Ok(Self {
            n_cells,
            n_buckets: config.n_buckets,
            fingerprint_size: config.fingerprint_size,
            table_bits: n_cells * cell_bits,
        })
    }
}
