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

use tracing::debug;

use super::BitArray;
use super::BitStorage;
use super::BloomFilter;
use crate::error::Error;
use crate::hash::DEFAULT_UPDATE_SEED;
use crate::hash::HashGenerator;
use crate::hash::MurmurHashGenerator;

/// Largest bit array a builder will allocate (~4 GiB of words).
pub const MAX_NUM_BITS: u64 = (1u64 << 35) - 64;

/// Builder for creating [`BloomFilter`] instances.
///
/// Holds the three sizing parameters plus the base seed of the default hash generator.
/// Parameters are validated when the filter is built, so a misconfigured builder surfaces
/// as an [`Error`] rather than a panic.
#[derive(Debug, Clone)]
pub struct BloomFilterBuilder {
    capacity: u64,
    num_hashes: u16,
    fpp: f64,
    seed: u32,
}

impl BloomFilterBuilder {
    /// Creates a builder for a filter holding `capacity` keys, probing `num_hashes` bits per
    /// key, with a target false positive probability of `fpp`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let filter = BloomFilterBuilder::with_accuracy(10_000, 4, 0.01)
    ///     .seed(42)
    ///     .build()
    ///     .unwrap();
    /// assert_eq!(filter.num_hashes(), 4);
    /// ```
    pub fn with_accuracy(capacity: u64, num_hashes: u16, fpp: f64) -> Self {
        BloomFilterBuilder {
            capacity,
            num_hashes,
            fpp,
            seed: DEFAULT_UPDATE_SEED,
        }
    }

    /// Sets the base seed of the default hash generator (default: 9001).
    ///
    /// Ignored by [`build_with_hasher()`](Self::build_with_hasher).
    pub fn seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the filter with [`MurmurHashGenerator`] and [`BitArray`] storage.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) if
    /// `capacity` or `num_hashes` is zero, `fpp` is not strictly between 0 and 1, or the
    /// derived bit count exceeds [`MAX_NUM_BITS`].
    pub fn build(self) -> Result<BloomFilter, Error> {
        let hasher = MurmurHashGenerator::with_seed(self.seed);
        self.build_with_hasher::<MurmurHashGenerator, BitArray>(hasher)
    }

    /// Builds the filter with a caller-supplied hash generator and storage type.
    ///
    /// # Errors
    ///
    /// Same as [`build()`](Self::build).
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::{BitArray, BloomFilter, BloomFilterBuilder};
    /// # use bloomsketch::hash::MurmurHashGenerator;
    /// let filter: BloomFilter<_, BitArray> = BloomFilterBuilder::with_accuracy(100, 3, 0.05)
    ///     .build_with_hasher(MurmurHashGenerator::with_seed(7))
    ///     .unwrap();
    /// assert_eq!(filter.hasher().seed(), 7);
    /// ```
    pub fn build_with_hasher<H, S>(self, hasher: H) -> Result<BloomFilter<H, S>, Error>
    where
        H: HashGenerator,
        S: BitStorage,
    {
        let num_bits = Self::suggest_num_bits(self.capacity, self.num_hashes, self.fpp)?;
        debug!(
            capacity = self.capacity,
            num_hashes = self.num_hashes,
            fpp = self.fpp,
            num_bits,
            "sized bloom filter"
        );
        Ok(BloomFilter::from_parts(
            self.capacity,
            self.num_hashes,
            self.fpp,
            num_bits,
            hasher,
        ))
    }

    /// Computes the bit array length for the given parameters.
    ///
    /// First the fraction of bits that must still be zero after `capacity` insertions is
    /// derived from the target rate: `phi = 1 - fpp^(1/k)`. Then the length `N` is solved so
    /// that `capacity` insertions of `k` uniform bits each leave that fraction unset:
    /// `N = k / (1 - phi^(1/capacity))`, truncated.
    ///
    /// # Errors
    ///
    /// Returns [`ErrorKind::InvalidParameter`](crate::error::ErrorKind::InvalidParameter) on
    /// out-of-range parameters or when the result is not finite or exceeds [`MAX_NUM_BITS`].
    ///
    /// # Examples
    ///
    /// ```
    /// # use bloomsketch::bloom::BloomFilterBuilder;
    /// let bits = BloomFilterBuilder::suggest_num_bits(1000, 4, 0.05).unwrap();
    /// assert!(bits > 6200 && bits < 6300); // 6248 bits
    /// ```
    pub fn suggest_num_bits(capacity: u64, num_hashes: u16, fpp: f64) -> Result<u64, Error> {
        Self::validate_params(capacity, num_hashes, fpp)?;

        let k = f64::from(num_hashes);
        let n = capacity as f64;
        let phi = 1.0 - fpp.powf(1.0 / k);
        let bits = k / (1.0 - phi.powf(1.0 / n));

        if !bits.is_finite() || bits > MAX_NUM_BITS as f64 {
            return Err(
                Error::invalid_parameter(format!("num_bits must not exceed {MAX_NUM_BITS}"))
                    .with_context("capacity", capacity)
                    .with_context("num_hashes", num_hashes)
                    .with_context("fpp", fpp),
            );
        }
        Ok(bits.floor() as u64)
    }

    fn validate_params(capacity: u64, num_hashes: u16, fpp: f64) -> Result<(), Error> {
        if capacity == 0 {
            return Err(Error::invalid_parameter("capacity must be greater than 0")
                .with_context("capacity", capacity));
        }
        if num_hashes == 0 {
            return Err(Error::invalid_parameter("num_hashes must be at least 1")
                .with_context("num_hashes", num_hashes));
        }
        // Written to also reject NaN.
        if !(fpp > 0.0 && fpp < 1.0) {
            return Err(
                Error::invalid_parameter("fpp must be between 0.0 and 1.0 (exclusive)")
                    .with_context("fpp", fpp),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_suggest_num_bits_exact() {
        // phi = 1 - 0.5 = 0.5, N = 1 / (1 - 0.5) = 2
        assert_eq!(BloomFilterBuilder::suggest_num_bits(1, 1, 0.5).unwrap(), 2);
    }

    #[test]
    fn test_suggest_num_bits_covers_hashes() {
        for (capacity, num_hashes, fpp) in [(1, 8, 0.5), (10, 3, 0.01), (1000, 4, 0.05)] {
            let bits = BloomFilterBuilder::suggest_num_bits(capacity, num_hashes, fpp).unwrap();
            assert!(bits >= num_hashes as u64, "{bits} < {num_hashes}");
        }
    }

    #[test]
    fn test_suggest_num_bits_grows_with_accuracy() {
        let loose = BloomFilterBuilder::suggest_num_bits(1000, 4, 0.1).unwrap();
        let tight = BloomFilterBuilder::suggest_num_bits(1000, 4, 0.01).unwrap();
        assert!(tight > loose);
    }

    #[test]
    fn test_reject_zero_capacity() {
        let err = BloomFilterBuilder::with_accuracy(0, 4, 0.05)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.context("capacity"), Some("0"));
    }

    #[test]
    fn test_reject_zero_hashes() {
        let err = BloomFilterBuilder::with_accuracy(100, 0, 0.05)
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert_eq!(err.context("num_hashes"), Some("0"));
    }

    #[test]
    fn test_reject_fpp_out_of_range() {
        for fpp in [0.0, 1.0, -0.1, 1.5, f64::NAN, f64::INFINITY] {
            let err = BloomFilterBuilder::with_accuracy(100, 4, fpp)
                .build()
                .unwrap_err();
            assert_eq!(err.kind(), ErrorKind::InvalidParameter, "fpp = {fpp}");
        }
    }

    #[test]
    fn test_reject_oversized() {
        let err = BloomFilterBuilder::suggest_num_bits(u64::MAX, 4, 0.05).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidParameter);
        assert!(err.message().contains("num_bits must not exceed"));
    }

    #[test]
    fn test_seed_reaches_hasher() {
        let filter = BloomFilterBuilder::with_accuracy(100, 4, 0.05)
            .seed(123)
            .build()
            .unwrap();
        assert_eq!(filter.hasher().seed(), 123);
    }
}
