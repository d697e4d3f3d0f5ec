use super::addressing::Addressing;
use super::storage::{BucketTable, EMPTY};
use super::{FilterConfig, FilterOps, FilterParams, FilterStats};
use crate::error::Result;
use std::hash::Hash;
use tracing::{debug, trace};

/// Queue variant of the quotient hash table.
///
/// Every cell is a FIFO of its last `n_buckets` insertions: bucket 0 holds
/// the oldest, the last bucket the newest. Inserting always drops the head,
/// even for an element already present, so repeated elements take several
/// buckets and `count` gives a multiplicity bounded by `n_buckets`.
pub struct QueueFilter {
    config: FilterConfig,
    params: FilterParams,
    addressing: Addressing,
    table: BucketTable,
}

impl QueueFilter {
    pub fn new(config: FilterConfig) -> Result<Self> {
        let params = FilterParams::try_from(&config)?;
        let addressing = Addressing::new(&config, &params);
        let table = BucketTable::new(&params);

        debug!(
            n_cells = params.n_cells,
            n_buckets = params.n_buckets,
            fingerprint_size = params.fingerprint_size,
            "created queue filter"
        );

        Ok(Self {
            config,
            params,
            addressing,
            table,
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

    /// Bucket contents of one cell, oldest first.
    pub fn cell_fingerprints(&self, address: usize) -> Vec<u64> {
        self.table.cell(address)
    }

    /// How many of the item's cell buckets hold its fingerprint.
    pub fn count<T: Hash + ?Sized>(&self, item: &T) -> usize {
        let (address, fingerprint) = self.addressing.locate(item);
        self.table.count(address, fingerprint)
    }
}

impl FilterOps for QueueFilter {
    fn lookup<T: Hash + ?Sized>(&self, item: &T) -> bool {
        let (address, fingerprint) = self.addressing.locate(item);
        self.table.in_cell(address, fingerprint)
    }

    fn insert<T: Hash + ?Sized>(&mut self, item: &T) -> bool {
        let (address, fingerprint) = self.addressing.locate(item);

        let detected = self.table.in_cell(address, fingerprint);
        let dropped = self.table.push_back(address, fingerprint);
        if dropped != EMPTY {
            trace!(address, dropped, "oldest fingerprint aged out");
        }

        detected
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
        debug!(table_bits = self.params.table_bits, "reset queue filter");
    }
}

impl FilterStats for QueueFilter {
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

impl std::fmt::Debug for QueueFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "QueueFilter {{ n_cells: {}, n_buckets: {}, fingerprint_size: {}, memory_bits: {} }}",
            self.params.n_cells,
            self.params.n_buckets,
            self.params.fingerprint_size,
            self.params.table_bits
        )
    }
}
