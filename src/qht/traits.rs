use std::hash::Hash;

/// Core operations shared by both filter variants
pub trait FilterOps {
    /// True if a matching fingerprint sits in the item's cell
    fn lookup<T: Hash + ?Sized>(&self, item: &T) -> bool;

    /// Insert the item, returning whether it was detected before insertion
    fn insert<T: Hash + ?Sized>(&mut self, item: &T) -> bool;

    /// Remove one occurrence of the item's fingerprint, returning whether one was found
    fn delete<T: Hash + ?Sized>(&mut self, item: &T) -> bool;

    /// Clear every cell
    fn reset(&mut self);
}

/// Combined test-and-insert in a single scan
pub trait StreamFilterOps: FilterOps {
    /// Returns true if the item was already present, false if it was just inserted
    fn stream<T: Hash + ?Sized>(&mut self, item: &T) -> bool;
}

pub trait BulkFilterOps {
    fn insert_bulk<T: Hash + ?Sized>(&mut self, items: &[&T]) -> Vec<bool>;
    fn lookup_bulk<T: Hash + ?Sized>(&self, items: &[&T]) -> Vec<bool>;
}

impl<F: FilterOps> BulkFilterOps for F {
    fn insert_bulk<T: Hash + ?Sized>(&mut self, items: &[&T]) -> Vec<bool> {
        items.iter().map(|item| self.insert(*item)).collect()
    }

    fn lookup_bulk<T: Hash + ?Sized>(&self, items: &[&T]) -> Vec<bool> {
        items.iter().map(|item| self.lookup(*item)).collect()
    }
}

pub trait FilterStats {
    fn n_cells(&self) -> usize;
    fn n_buckets(&self) -> usize;
    fn fingerprint_size(&self) -> usize;
    /// Size of the bucket table in bits
    fn memory_bits(&self) -> usize;
    fn occupied_buckets(&self) -> usize;

    fn load_factor(&self) -> f64 {
        self.occupied_buckets() as f64 / (self.n_cells() * self.n_buckets()) as f64
    }
}
