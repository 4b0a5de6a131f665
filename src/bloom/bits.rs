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

/// Fixed-length array of single-bit cells.
///
/// Storage never shrinks, grows, or clears individual bits; the only mutation is
/// [`set`](Self::set).
pub trait BitStorage {
    /// Creates storage of `len` bits, all zero.
    fn zeroed(len: u64) -> Self;

    /// Returns the number of bits.
    fn len(&self) -> u64;

    /// Returns whether the storage holds no bits at all.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns the bit at `index`.
    fn get(&self, index: u64) -> bool;

    /// Sets the bit at `index` to one.
    ///
    /// Returns `true` if the bit was previously zero.
    fn set(&mut self, index: u64) -> bool;
}

/// Bits packed into `u64` words, least significant bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BitArray {
    num_bits: u64,
    words: Vec<u64>,
}

impl BitArray {
    /// Counts one bits by scanning every word.
    pub fn count_ones(&self) -> u64 {
        self.words.iter().map(|word| word.count_ones() as u64).sum()
    }

    #[inline]
    fn locate(&self, index: u64) -> (usize, u64) {
        assert!(
            index < self.num_bits,
            "bit index {index} out of range for length {}",
            self.num_bits
        );
        ((index / 64) as usize, 1u64 << (index % 64))
    }
}

impl BitStorage for BitArray {
    fn zeroed(len: u64) -> Self {
        BitArray {
            num_bits: len,
            words: vec![0u64; len.div_ceil(64) as usize],
        }
    }

    fn len(&self) -> u64 {
        self.num_bits
    }

    fn get(&self, index: u64) -> bool {
        let (word, mask) = self.locate(index);
        self.words[word] & mask != 0
    }

    fn set(&mut self, index: u64) -> bool {
        let (word, mask) = self.locate(index);
        let was_unset = self.words[word] & mask == 0;
        self.words[word] |= mask;
        was_unset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeroed() {
        let bits = BitArray::zeroed(130);
        assert_eq!(bits.len(), 130);
        assert!(!bits.is_empty());
        assert_eq!(bits.words.len(), 3);
        assert!((0..130).all(|i| !bits.get(i)));
        assert_eq!(bits.count_ones(), 0);
    }

    #[test]
    fn test_set_reports_transition() {
        let mut bits = BitArray::zeroed(100);
        assert!(bits.set(63));
        assert!(bits.set(64));
        assert!(!bits.set(63));
        assert!(bits.get(63));
        assert!(bits.get(64));
        assert!(!bits.get(65));
        assert_eq!(bits.count_ones(), 2);
    }

    #[test]
    fn test_last_bit() {
        let mut bits = BitArray::zeroed(65);
        assert!(bits.set(64));
        assert!(bits.get(64));
        assert_eq!(bits.count_ones(), 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_get_out_of_range() {
        let bits = BitArray::zeroed(10);
        bits.get(10);
    }
}
