use qht_rs::{FilterConfig, FilterConfigBuilder};

/// Config with a fixed eviction seed so runs are reproducible
pub fn seeded_config(
    memory_size_bits: u64,
    n_buckets: usize,
    fingerprint_size: usize,
) -> FilterConfig {
    FilterConfigBuilder::default()
        .memory_size_bits(memory_size_bits)
        .n_buckets(n_buckets)
        .fingerprint_size(fingerprint_size)
        .seed(0xdead_beef)
        .build()
        .expect("Failed to build test config")
}

/// Config whose table is exactly one cell
#[allow(dead_code)]
pub fn single_cell_config(n_buckets: usize, fingerprint_size: usize) -> FilterConfig {
    seeded_config(
        (n_buckets * fingerprint_size) as u64,
        n_buckets,
        fingerprint_size,
    )
}

pub fn generate_test_items(prefix: &str, count: usize) -> Vec<String> {
    (0..count).map(|i| format!("{prefix}_{i:06}")).collect()
}

/// Non-empty buckets form a prefix of the cell
#[allow(dead_code)]
pub fn is_compacted(cell: &[u64]) -> bool {
    cell.iter().skip_while(|&&fp| fp != 0).all(|&fp| fp == 0)
}
