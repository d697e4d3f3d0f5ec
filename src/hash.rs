use fnv::FnvHasher;
use murmur3::murmur3_x64_128;
use std::hash::{Hash, Hasher};
use std::io::Cursor;

/// A type alias for the hash functions used by the filters.
///
/// **Parameters:**
///
/// - `bytes: &[u8]`
///   - The byte image of an element, as produced by its `Hash` impl.
///
/// **Returns:**
///
/// - `u64`
///   - A deterministic, near-uniform 64-bit hash of the input.
///
/// **Usage:**
///
/// A filter takes two of these. The primary one picks the cell an element
/// lives in, the secondary one its fingerprint. They must be independent of
/// each other, otherwise fingerprint collisions follow address collisions.
pub type HashFunction = fn(&[u8]) -> u64;

const PRIMARY_SEED: u32 = 0x5bd1_e995;

pub fn default_primary_hash(bytes: &[u8]) -> u64 {
    let mut cursor = Cursor::new(bytes);
    // Reading from an in-memory cursor cannot fail.
    murmur3_x64_128(&mut cursor, PRIMARY_SEED).unwrap_or_default() as u64
}

pub fn default_secondary_hash(bytes: &[u8]) -> u64 {
    let mut hasher = FnvHasher::default();
    hasher.write(bytes);
    fmix64(hasher.finish())
}

/// Murmur3 finalizer, spreads FNV's weak low bits over the whole word.
#[inline]
pub(crate) fn fmix64(mut k: u64) -> u64 {
    k ^= k >> 33;
    k = k.wrapping_mul(0xff51_afd7_ed55_8ccd);
    k ^= k >> 33;
    k = k.wrapping_mul(0xc4ce_b9fe_1a85_ec53);
    k ^= k >> 33;
    k
}

/// Boost-style `hash_combine` of `value` into `seed`.
#[inline]
pub(crate) fn hash_combine(seed: u64, value: u64) -> u64 {
    seed ^ value
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(seed << 6)
        .wrapping_add(seed >> 2)
}

/// Collects whatever an element feeds into a `Hasher` so both hash
/// functions can run over the same bytes.
#[derive(Default)]
pub(crate) struct ByteCollector {
    bytes: Vec<u8>,
}

impl ByteCollector {
    pub(crate) fn collect<T: Hash + ?Sized>(item: &T) -> Vec<u8> {
        let mut collector = Self::default();
        item.hash(&mut collector);
        collector.bytes
    }
}

impl Hasher for ByteCollector {
    fn write(&mut self, bytes: &[u8]) {
        self.bytes.extend_from_slice(bytes);
    }

    fn finish(&self) -> u64 {
        default_primary_hash(&self.bytes)
    }
}
