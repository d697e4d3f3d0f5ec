use super::{FilterConfig, FilterParams};
use crate::hash::{ByteCollector, HashFunction, hash_combine};
use std::hash::Hash;

/// Maps elements to a cell and a non-zero fingerprint.
#[derive(Clone, Debug)]
pub struct Addressing {
    n_cells: u64,
    fingerprint_mask: u64,
    primary_hash: HashFunction,
    secondary_hash: HashFunction,
}

impl Addressing {
    pub fn new(config: &FilterConfig, params: &FilterParams) -> Self {
        Self {
            n_cells: params.n_cells as u64,
            fingerprint_mask: (1u64 << params.fingerprint_size) - 1,
            primary_hash: config.primary_hash,
            secondary_hash: config.secondary_hash,
        }
    }

    /// Cell index and fingerprint of `item`, hashing its bytes once.
    pub fn locate<T: Hash + ?Sized>(&self, item: &T) -> (usize, u64) {
        let bytes = ByteCollector::collect(item);
        (
            self.address_from((self.primary_hash)(&bytes)),
            self.fingerprint_from((self.secondary_hash)(&bytes)),
        )
    }

    pub fn address<T: Hash + ?Sized>(&self, item: &T) -> usize {
        let bytes = ByteCollector::collect(item);
        self.address_from((self.primary_hash)(&bytes))
    }

    pub fn fingerprint<T: Hash + ?Sized>(&self, item: &T) -> u64 {
        let bytes = ByteCollector::collect(item);
        self.fingerprint_from((self.secondary_hash)(&bytes))
    }

    fn address_from(&self, hash: u64) -> usize {
        (hash % self.n_cells) as usize
    }

    /// 0 marks an empty bucket, so a zero fingerprint is rehashed until it
    /// is not. The counter keeps the loop off fixed points of the combine.
    fn fingerprint_from(&self, mut hash: u64) -> u64 {
        let mut fingerprint = hash & self.fingerprint_mask;
        let mut adder = 0u64;
        while fingerprint == 0 {
            adder += 1;
            hash = hash_combine(hash, hash.wrapping_add(adder));
            fingerprint = hash & self.fingerprint_mask;
        }
        fingerprint
    }
}
