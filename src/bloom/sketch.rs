// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use std::hash::Hash;

use tracing::trace;

use super::BitArray;
use super::BitStorage;
use super::BloomFilterBuilder;
use crate::error::Error;
use crate::hash::HashGenerator;
use crate::hash::MurmurHashGenerator;

/// A Bloom filter for probabilistic set membership testing.
///
/// Provides membership queries with:
/// - No false negatives (inserted keys always report present)
/// - A false positive rate bounded by the sizing parameters
/// - A fixed bit array sized once at construction
///
/// Use [`BloomFilter::new`] or [`BloomFilterBuilder`] to construct instances.
#[derive(Debug, Clone, PartialEq)]
pub struct BloomFilter<H = MurmurHashGenerator, S = BitArray> {
    /// Number of keys the filter was sized for (n)
    capacity: u64,
    /// Number of probes per key (k)
    num_hashes: u16,
    /// False positive probability the filter was sized for
    target_fpp: f64,
    /// Length of the bit array (m)
    num_bits: u64,
    /// Exact count of one bits in `bits`
    num_bits_set: u64,
    hasher: H,
    bits: S,
}

impl BloomFilter {
    /// Creates a filter for `capacity` keys using `num_hashes` probes per key and a target
    /// false positive probability of `fpp`.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// `capacity` or `num_hashes` is zero or `fpp` is not strictly between 0 and 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use bloomsketch::bloom::BloomFilter;
    ///
    /// let mut filter = BloomFilter::new(1000, 4, 0.05).unwrap();
    /// filter.insert("apple");
    ///
    /// assert!(filter.find("apple")); // true - was inserted
    /// assert!(!filter.find("grape")); // false - never inserted (probably)
    /// ```
    pub fn new(capacity: u64, num_hashes: u16, fpp: f64) -> Result<Self, Error> {
        BloomFilterBuilder::with_accuracy(capacity, num_hashes, fpp).build()
    }

    /// Returns a builder for creating a Bloom filter with the same parameters as
    /// [`new`](Self::new).
    pub fn builder(capacity: u64, num_hashes: u16, fpp: f64) -> BloomFilterBuilder {
        BloomFilterBuilder::with_accuracy(capacity, num_hashes, fpp)
    }
}

impl<H: HashGenerator, S: BitStorage> BloomFilter<H, S> {
    pub(super) fn from_parts(
        capacity: u64,
        num_hashes: u16,
        target_fpp: f64,
        num_bits: u64,
        hasher: H,
    ) -> Self {
        let bits = S::zeroed(num_bits);
        // Probe indices are reduced modulo `num_bits`, so storage must match it exactly.
        debug_assert_eq!(bits.len(), num_bits, "bit storage length mismatch");
        BloomFilter {
            capacity,
            num_hashes,
            target_fpp,
            num_bits,
            num_bits_set: 0,
            hasher,
            bits,
        }
    }

    // ========================================================================
    // Update Operations
    // ========================================================================

    /// Inserts a key into the filter.
    ///
    /// After insertion, `find(key)` will always return `true`. Inserting the same key again
    /// changes nothing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 3, 0.01).unwrap();
    ///
    /// filter.insert("apple");
    /// filter.insert(&42_u64);
    /// filter.insert(&[1, 2, 3]);
    ///
    /// assert!(filter.find("apple"));
    /// ```
    pub fn insert<T: Hash + ?Sized>(&mut self, key: &T) {
        for probe in 1..=self.num_hashes {
            let index = self.probe_index(key, probe);
            if self.bits.set(index) {
                self.num_bits_set += 1;
            }
        }
        trace!(bits_set = self.num_bits_set, "inserted key");
    }

    /// Tests and inserts a key in a single pass.
    ///
    /// Returns whether the key was possibly present before this insertion.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 3, 0.01).unwrap();
    ///
    /// assert!(!filter.contains_and_insert("apple")); // First insertion
    /// assert!(filter.contains_and_insert("apple")); // Now it's in the set
    /// ```
    pub fn contains_and_insert<T: Hash + ?Sized>(&mut self, key: &T) -> bool {
        let mut was_present = true;
        for probe in 1..=self.num_hashes {
            let index = self.probe_index(key, probe);
            if self.bits.set(index) {
                self.num_bits_set += 1;
                was_present = false;
            }
        }
        trace!(
            bits_set = self.num_bits_set,
            was_present,
            "checked and inserted key"
        );
        was_present
    }

    // ========================================================================
    // Query Operations
    // ========================================================================

    /// Tests whether a key is possibly in the set.
    ///
    /// Returns:
    /// - `true`: Key was **possibly** inserted (or false positive)
    /// - `false`: Key was **definitely not** inserted
    pub fn find<T: Hash + ?Sized>(&self, key: &T) -> bool {
        (1..=self.num_hashes).all(|probe| self.bits.get(self.probe_index(key, probe)))
    }

    // ========================================================================
    // Statistics and Properties
    // ========================================================================

    /// Returns the number of bits currently set to 1.
    pub fn bits_set_count(&self) -> u64 {
        self.num_bits_set
    }

    /// Returns the false positive probability implied by the bits actually set so far.
    ///
    /// With `phi` the fraction of bits still zero, a key never inserted is reported present
    /// when all `k` of its probes land on one bits: `(1 - phi)^k`. Unlike
    /// [`target_fpp`](Self::target_fpp) this tracks the live fill of the filter.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilter;
    /// let mut filter = BloomFilter::new(100, 3, 0.01).unwrap();
    /// assert_eq!(filter.projected_fpp(), 0.0);
    ///
    /// filter.insert("apple");
    /// assert!(filter.projected_fpp() > 0.0);
    /// ```
    pub fn projected_fpp(&self) -> f64 {
        let phi = (self.num_bits - self.num_bits_set) as f64 / self.num_bits as f64;
        (1.0 - phi).powi(i32::from(self.num_hashes))
    }

    /// Returns the fraction of bits set to 1.
    pub fn load_factor(&self) -> f64 {
        self.num_bits_set as f64 / self.num_bits as f64
    }

    /// Returns whether no key has been inserted.
    pub fn is_empty(&self) -> bool {
        self.num_bits_set == 0
    }

    /// Returns the number of keys the filter was sized for.
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Returns the number of probes per key.
    pub fn num_hashes(&self) -> u16 {
        self.num_hashes
    }

    /// Returns the false positive probability the filter was sized for.
    pub fn target_fpp(&self) -> f64 {
        self.target_fpp
    }

    /// Returns the length of the bit array.
    pub fn num_bits(&self) -> u64 {
        self.num_bits
    }

    /// Returns the hash generator.
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    // ========================================================================
    // Internal Helpers
    // ========================================================================

    /// Maps probe `probe` (1-based) of `key` onto the bit array.
    #[inline]
    fn probe_index<T: Hash + ?Sized>(&self, key: &T, probe: u16) -> u64 {
        self.hasher.hash(key, u32::from(probe)) % self.num_bits
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let filter = BloomFilter::new(1000, 4, 0.05).unwrap();
        assert_eq!(filter.capacity(), 1000);
        assert_eq!(filter.num_hashes(), 4);
        assert_eq!(filter.target_fpp(), 0.05);
        assert_eq!(
            filter.num_bits(),
            BloomFilterBuilder::suggest_num_bits(1000, 4, 0.05).unwrap()
        );
        assert_eq!(filter.bits.len(), filter.num_bits());
        assert!(filter.is_empty());
        assert_eq!(filter.bits_set_count(), 0);
    }

    #[test]
    fn test_insert_and_find() {
        let mut filter = BloomFilter::new(100, 4, 0.01).unwrap();

        assert!(!filter.find("apple"));
        filter.insert("apple");
        assert!(filter.find("apple"));
        assert!(!filter.is_empty());
        assert!(filter.bits_set_count() >= 1);
        assert!(filter.bits_set_count() <= 4);
    }

    #[test]
    fn test_insert_is_idempotent() {
        let mut once = BloomFilter::new(100, 4, 0.01).unwrap();
        let mut twice = once.clone();

        once.insert("apple");
        twice.insert("apple");
        twice.insert("apple");

        assert_eq!(once, twice);
        assert_eq!(once.bits_set_count(), twice.bits_set_count());
    }

    #[test]
    fn test_bits_set_count_matches_scan() {
        let mut filter = BloomFilter::new(500, 5, 0.02).unwrap();
        for i in 0..800_u32 {
            filter.insert(&i);
            if i % 100 == 0 {
                assert_eq!(filter.bits_set_count(), filter.bits.count_ones());
            }
        }
        assert_eq!(filter.bits_set_count(), filter.bits.count_ones());
    }

    #[test]
    fn test_contains_and_insert() {
        let mut filter = BloomFilter::new(100, 4, 0.01).unwrap();

        let was_present = filter.contains_and_insert(&42_u64);
        assert!(!was_present);

        let was_present = filter.contains_and_insert(&42_u64);
        assert!(was_present);
        assert_eq!(filter.bits_set_count(), filter.bits.count_ones());
    }

    #[test]
    fn test_saturated_filter() {
        // Two bits in total, so a hundred keys fill both of them.
        let mut filter = BloomFilter::new(1, 1, 0.5).unwrap();
        assert_eq!(filter.num_bits(), 2);

        for i in 0..100_u32 {
            filter.insert(&i);
        }
        assert_eq!(filter.bits_set_count(), 2);
        assert_eq!(filter.load_factor(), 1.0);
        assert_eq!(filter.projected_fpp(), 1.0);
    }

    #[test]
    fn test_statistics() {
        let mut filter = BloomFilter::new(1000, 5, 0.01).unwrap();
        assert_eq!(filter.load_factor(), 0.0);
        assert_eq!(filter.projected_fpp(), 0.0);

        filter.insert("test");
        let set = filter.bits_set_count() as f64;
        let m = filter.num_bits() as f64;
        assert_eq!(filter.load_factor(), set / m);
        assert!((filter.projected_fpp() - (set / m).powi(5)).abs() < 1e-15);
    }

    /// Storage that allocates one bit more than asked for.
    #[derive(Debug, Clone, PartialEq)]
    struct OversizedBits(BitArray);

    impl BitStorage for OversizedBits {
        fn zeroed(len: u64) -> Self {
            OversizedBits(BitArray::zeroed(len + 1))
        }

        fn len(&self) -> u64 {
            self.0.len()
        }

        fn get(&self, index: u64) -> bool {
            self.0.get(index)
        }

        fn set(&mut self, index: u64) -> bool {
            self.0.set(index)
        }
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "bit storage length mismatch")]
    fn test_storage_length_mismatch_panics() {
        let _: BloomFilter<MurmurHashGenerator, OversizedBits> =
            BloomFilterBuilder::with_accuracy(100, 4, 0.05)
                .build_with_hasher(MurmurHashGenerator::default())
                .unwrap();
    }

    #[test]
    fn test_seed_changes_positions() {
        let mut f1 = BloomFilter::builder(100, 4, 0.01).seed(1).build().unwrap();
        let mut f2 = BloomFilter::builder(100, 4, 0.01).seed(2).build().unwrap();
        for i in 0..20_u32 {
            f1.insert(&i);
            f2.insert(&i);
        }
        assert_ne!(f1.bits, f2.bits);
    }
}
