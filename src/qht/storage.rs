use super::FilterParams;
use bitvec::prelude::*;

/// Value of an empty bucket.
pub const EMPTY: u64 = 0;

/// Flat bit table split into cells of `n_buckets` fingerprint-sized buckets.
///
/// A fingerprint occupies `fingerprint_size` consecutive bits, most
/// significant bit at the lowest index. Buckets of a cell are consecutive and
/// cells follow each other, so bucket `b` of cell `c` starts at bit
/// `c * n_buckets * fingerprint_size + b * fingerprint_size`.
pub struct BucketTable {
    bits: BitVec<u64, Msb0>,
    n_cells: usize,
    n_buckets: usize,
    fingerprint_size: usize,
}

impl BucketTable {
    pub fn new(params: &FilterParams) -> Self {
        Self {
            bits: bitvec![u64, Msb0; 0; params.table_bits],
            n_cells: params.n_cells,
            n_buckets: params.n_buckets,
            fingerprint_size: params.fingerprint_size,
        }
    }

    #[inline]
    fn offset(&self, address: usize, bucket: usize) -> usize {
        assert!(
            address < self.n_cells,
            "cell {address} out of range for {} cells",
            self.n_cells
        );
        assert!(
            bucket < self.n_buckets,
            "bucket {bucket} out of range for {} buckets",
            self.n_buckets
        );
        (address * self.n_buckets + bucket) * self.fingerprint_size
    }

    pub fn get(&self, address: usize, bucket: usize) -> u64 {
        let start = self.offset(address, bucket);
        self.bits[start..start + self.fingerprint_size].load_be::<u64>()
    }

    pub fn set(&mut self, address: usize, bucket: usize, fingerprint: u64) {
        debug_assert!(
            fingerprint >> self.fingerprint_size == 0,
            "fingerprint {fingerprint:#x} wider than {} bits",
            self.fingerprint_size
        );
        let start = self.offset(address, bucket);
        self.bits[start..start + self.fingerprint_size]
            .store_be::<u64>(fingerprint);
    }

    pub fn in_cell(&self, address: usize, fingerprint: u64) -> bool {
        (0..self.n_buckets).any(|bucket| self.get(address, bucket) == fingerprint)
    }

    /// First bucket of the cell holding `fingerprint`.
    pub fn position(&self, address: usize, fingerprint: u64) -> Option<usize> {
        (0..self.n_buckets).find(|&bucket| self.get(address, bucket) == fingerprint)
    }

    pub fn count(&self, address: usize, fingerprint: u64) -> usize {
        (0..self.n_buckets)
            .filter(|&bucket| self.get(address, bucket) == fingerprint)
            .count()
    }

    /// Drops the bucket at `bucket`, pulls every later bucket one slot to the
    /// left and clears the last one.
    pub fn remove_at(&mut self, address: usize, bucket: usize) {
        for i in bucket..self.n_buckets - 1 {
            let next = self.get(address, i + 1);
            self.set(address, i, next);
        }
        self.set(address, self.n_buckets - 1, EMPTY);
    }

    /// Drops bucket 0, shifts the cell left and writes `fingerprint` last.
    /// Returns the dropped value.
    pub fn push_back(&mut self, address: usize, fingerprint: u64) -> u64 {
        let dropped = self.get(address, 0);
        for i in 0..self.n_buckets - 1 {
            let next = self.get(address, i + 1);
            self.set(address, i, next);
        }
        self.set(address, self.n_buckets - 1, fingerprint);
        dropped
    }

    pub fn cell(&self, address: usize) -> Vec<u64> {
        (0..self.n_buckets)
            .map(|bucket| self.get(address, bucket))
            .collect()
    }

    pub fn occupied(&self) -> usize {
        (0..self.n_cells)
            .map(|address| self.count_occupied(address))
            .sum()
    }

    pub fn count_occupied(&self, address: usize) -> usize {
        (0..self.n_buckets)
            .filter(|&bucket| self.get(address, bucket) != EMPTY)
            .count()
    }

    pub fn reset(&mut self) {
        self.bits.fill(false);
    }

    pub fn len_bits(&self) -> usize {
        self.bits.len()
    }

    pub fn n_cells(&self) -> usize {
        self.n_cells
    }

    pub fn n_buckets(&self) -> usize {
        self.n_buckets
    }

    pub fn fingerprint_size(&self) -> usize {
        self.fingerprint_size
    }

    #[cfg(test)]
    pub(crate) fn bit(&self, index: usize) -> bool {
        self.bits[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(n_cells: usize, n_buckets: usize, fingerprint_size: usize) -> BucketTable {
        BucketTable::new(&FilterParams {
            n_cells,
            n_buckets,
            fingerprint_size,
            table_bits: n_cells * n_buckets * fingerprint_size,
        })
    }

    #[test]
    fn test_new_table_is_empty() {
        let table = table(4, 3, 5);
        assert_eq!(table.len_bits(), 60);
        assert_eq!(table.occupied(), 0);
        for address in 0..4 {
            assert_eq!(table.cell(address), vec![0, 0, 0]);
        }
    }

    #[test]
    fn test_fingerprint_is_stored_msb_first() {
        let mut table = table(2, 2, 4);
        // cell 1, bucket 0 starts at bit 8
        table.set(1, 0, 0b1011);

        let stored: Vec<bool> = (8..12).map(|i| table.bit(i)).collect();
        assert_eq!(stored, vec![true, false, true, true]);
        assert!((0..8).all(|i| !table.bit(i)));
        assert!((12..16).all(|i| !table.bit(i)));
        assert_eq!(table.get(1, 0), 0b1011);
    }

    #[test]
    fn test_fields_crossing_word_boundary() {
        // 7-bit fields straddle the 64-bit storage words
        let mut table = table(10, 3, 7);
        for address in 0..10 {
            for bucket in 0..3 {
                table.set(address, bucket, ((address * 3 + bucket) % 127 + 1) as u64);
            }
        }
        for address in 0..10 {
            for bucket in 0..3 {
                assert_eq!(
                    table.get(address, bucket),
                    ((address * 3 + bucket) % 127 + 1) as u64
                );
            }
        }
    }

    #[test]
    fn test_set_overwrites_neighbours_untouched() {
        let mut table = table(1, 3, 6);
        table.set(0, 0, 0b111111);
        table.set(0, 1, 0b111111);
        table.set(0, 2, 0b111111);
        table.set(0, 1, 0b000001);
        assert_eq!(table.cell(0), vec![0b111111, 0b000001, 0b111111]);
    }

    #[test]
    fn test_in_cell_and_position() {
        let mut table = table(2, 4, 8);
        table.set(0, 2, 42);
        assert!(table.in_cell(0, 42));
        assert!(!table.in_cell(1, 42));
        assert_eq!(table.position(0, 42), Some(2));
        assert_eq!(table.position(0, 7), None);
        assert_eq!(table.position(0, EMPTY), Some(0));
    }

    #[test]
    fn test_remove_at_compacts() {
        let mut table = table(1, 4, 8);
        for (bucket, fp) in [1, 2, 3, 4].into_iter().enumerate() {
            table.set(0, bucket, fp);
        }
        table.remove_at(0, 1);
        assert_eq!(table.cell(0), vec![1, 3, 4, 0]);
        table.remove_at(0, 2);
        assert_eq!(table.cell(0), vec![1, 3, 0, 0]);
    }

    #[test]
    fn test_remove_last_bucket() {
        let mut table = table(1, 2, 3);
        table.set(0, 0, 5);
        table.set(0, 1, 6);
        table.remove_at(0, 1);
        assert_eq!(table.cell(0), vec![5, 0]);
    }

    #[test]
    fn test_push_back_rotates() {
        let mut table = table(1, 3, 8);
        assert_eq!(table.push_back(0, 1), 0);
        assert_eq!(table.push_back(0, 2), 0);
        assert_eq!(table.push_back(0, 3), 0);
        assert_eq!(table.cell(0), vec![1, 2, 3]);
        assert_eq!(table.push_back(0, 4), 1);
        assert_eq!(table.cell(0), vec![2, 3, 4]);
    }

    #[test]
    fn test_push_back_single_bucket() {
        let mut table = table(3, 1, 2);
        table.push_back(1, 3);
        assert_eq!(table.push_back(1, 2), 3);
        assert_eq!(table.cell(1), vec![2]);
        assert_eq!(table.occupied(), 1);
    }

    #[test]
    fn test_count_and_occupied() {
        let mut table = table(3, 3, 4);
        table.set(0, 0, 9);
        table.set(0, 1, 9);
        table.set(2, 0, 1);
        assert_eq!(table.count(0, 9), 2);
        assert_eq!(table.count_occupied(0), 2);
        assert_eq!(table.count_occupied(1), 0);
        assert_eq!(table.occupied(), 3);
    }

    #[test]
    fn test_reset_zeroes_table() {
        let mut table = table(5, 2, 3);
        for address in 0..5 {
            table.set(address, 0, 7);
            table.set(address, 1, 3);
        }
        table.reset();
        assert_eq!(table.occupied(), 0);
        assert_eq!(table.len_bits(), 30);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_bucket_out_of_range_panics() {
        let table = table(2, 2, 4);
        table.get(0, 2);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_cell_out_of_range_panics() {
        let mut table = table(2, 2, 4);
        table.set(2, 0, 1);
    }
}
