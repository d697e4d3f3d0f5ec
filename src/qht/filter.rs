use super::addressing::Addressing;
use super::storage::{BucketTable, EMPTY};
use super::{FilterConfig, FilterOps, FilterParams, FilterStats, StreamFilterOps};
use crate::error::Result;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::hash::Hash;
use tracing::{debug, trace};

/// Quotient hash table filter.
///
/// Each cell keeps its fingerprints packed at the front. A new fingerprint
/// goes into the first empty bucket of its cell; when the cell is full a
/// uniformly drawn bucket is overwritten, which is where false negatives
/// come from.
pub struct QuotientFilter<R = StdRng> {
    config: FilterConfig,
    params: FilterParams,
    addressing: Addressing,
    table: BucketTable,
    rng: R,
}

impl QuotientFilter<StdRng> {
    /// Eviction RNG is seeded from `config.seed`, or from the OS without one.
    pub fn new(config: FilterConfig) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: Rng> QuotientFilter<R> {
    pub fn with_rng(config: FilterConfig, rng: R) -> Result<Self> {
        let params = FilterParams::try_from(&config)?;
        let addressing = Addressing::new(&config, &params);
        let table = BucketTable::new(&params);

        debug!(
            n_cells = params.n_cells,
            n_buckets = params.n_buckets,
            fingerprint_size = params.fingerprint_size,
            "created quotient filter"
        );

        Ok(Self {
            config,
            params,
            addressing,
            table,
            rng,
        })
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    pub fn params(&self) -> &FilterParams {
        &self.params
    }

    pub fn address_of<T: Hash + ?Sized>(&self, item: &T) -> usize {
        self.addressing.address(item)
    }

    pub fn fingerprint_of<T: Hash + ?Sized>(&self, item: &T) -> u64 {
        self.addressing.fingerprint(item)
    }

    /// Bucket contents of one cell, bucket 0 first.
    pub fn cell_fingerprints(&self, address: usize) -> Vec<u64> {
        self.table.cell(address)
    }

    fn evict(&mut self, address: usize) -> usize {
        let bucket = self.rng.random_range(0..self.params.n_buckets);
        trace!(address, bucket, "cell full, evicting");
        bucket
    }
}

impl<R: Rng> FilterOps for QuotientFilter<R> {
    fn lookup<T: Hash + ?Sized>(&self, item: &T) -> bool {
        let (address, fingerprint) = self.addressing.locate(item);
        self.table.in_cell(address, fingerprint)
    }

    fn insert<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        let (address, fingerprint) = self.addressing.locate(item);

        if self.table.in_cell(address, fingerprint) {
            return true;
        }

        let bucket = match self.table.position(address, EMPTY) {
            Some(bucket) => bucket,
            None => self.evict(address),
        };
        self.table.set(address, bucket, fingerprint);
        false
    }

    fn delete<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        let (address, fingerprint) = self.addressing.locate(item);

        match self.table.position(address, fingerprint) {
            Some(bucket) => {
                self.table.remove_at(address, bucket);
                true
            }
            None => false,
        }
    }

    fn reset(&mut self) {
        self.table.reset();
        debug!(table_bits = self.params.table_bits, "reset quotient filter");
    }
}

impl<R: Rng> StreamFilterOps for QuotientFilter<R> {
    fn stream<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        let (address, fingerprint) = self.addressing.locate(item);

        // Fingerprints are packed at the front, so the first empty bucket
        // ends the scan.
        let mut empty = None;
        for bucket in 0..self.params.n_buckets {
            match self.table.get(address, bucket) {
                stored if stored == fingerprint => return true,
                EMPTY => {
                    empty = Some(bucket);
                    break;
                }
                _ => {}
            }
        }

        let bucket = match empty {
            Some(bucket) => bucket,
            None => self.evict(address),
        };
        self.table.set(address, bucket, fingerprint);
        false
    }
}

impl<R> FilterStats for QuotientFilter<R> {
    fn n_cells(&self) -> usize {
        self.table.n_cells()
    }

    fn n_buckets(&self) -> usize {
        self.table.n_buckets()
    }

    fn fingerprint_size(&self) -> usize {
        self.table.fingerprint_size()
    }

    fn memory_bits(&self) -> usize {
        self.table.len_bits()
    }

    fn occupied_buckets(&self) -> usize {
        self.table.occupied()
    }
}

impl<R> std::fmt::Debug for QuotientFilter<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QuotientFilter {{ n_cells: {}, n_buckets: {}, fingerprint_size: {}, memory_bits: {} }}",
            self.params.n_cells,
            self.params.n_buckets,
            self.params.fingerprint_size,
            self.params.table_bits
        )
    }
}
