use thiserror::Error;

pub type Result<T> = std::result::Result<T, FilterError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FilterError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Bucket count must be greater than 0")]
    ZeroBuckets,

    #[error("Fingerprint size must be in [1, {max}), got {size}")]
    InvalidFingerprintSize { size: usize, max: u32 },

    #[error(
        "Memory budget of {memory_size_bits} bits cannot hold a single cell of {cell_bits} bits"
    )]
    ZeroCells { memory_size_bits: u64, cell_bits: u64 },
}
