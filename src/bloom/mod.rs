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

//! Bloom filter implementation for probabilistic set membership testing.
//!
//! A Bloom filter is a space-efficient probabilistic data structure used to test whether
//! a key is a member of a set. False positive matches are possible, but false negatives
//! are not. In other words, a query returns either "possibly in set" or "definitely not in set".
//!
//! # Properties
//!
//! - **No false negatives**: If a key was inserted, `find()` will always return `true`
//! - **Possible false positives**: `find()` may return `true` for keys never inserted
//! - **Insert only**: keys cannot be removed, since their bits may be shared with other keys
//! - **Fixed size**: the bit array is sized once from capacity, probe count and target rate
//!
//! # Usage
//!
//! ```rust
//! use bloomsketch::bloom::BloomFilter;
//!
//! // Sized for 1000 keys, 4 probes per key, 5% false positive rate
//! let mut filter = BloomFilter::new(1000, 4, 0.05).unwrap();
//!
//! filter.insert("apple");
//! filter.insert("banana");
//! filter.insert(&42_u64);
//!
//! assert!(filter.find("apple"));
//! assert!(!filter.find("grape")); // never inserted (probably)
//!
//! println!("Bits: {}", filter.num_bits());
//! println!("Bits set: {}", filter.bits_set_count());
//! println!("Projected FPP: {:.4}%", filter.projected_fpp() * 100.0);
//! ```
//!
//! # Sizing
//!
//! Unlike the usual `m = -n ln(p) / ln(2)^2` rule, the probe count `k` is chosen by the
//! caller and the array length is solved for it. The fraction of bits that must remain zero
//! is `phi = 1 - p^(1/k)`, and the length is `m = k / (1 - phi^(1/n))`, truncated.
//!
//! # Pluggable Parts
//!
//! Hashing goes through [`HashGenerator`](crate::hash::HashGenerator) and storage through
//! [`BitStorage`]; the defaults are MurmurHash3 and a packed [`BitArray`].
//!
//! ```rust
//! use bloomsketch::bloom::{BitArray, BloomFilter, BloomFilterBuilder};
//! use bloomsketch::hash::MurmurHashGenerator;
//!
//! let filter: BloomFilter<_, BitArray> = BloomFilterBuilder::with_accuracy(100, 3, 0.01)
//!     .build_with_hasher(MurmurHashGenerator::with_seed(1))
//!     .unwrap();
//! assert!(filter.is_empty());
//! ```
//!
//! # References
//!
//! - Bloom, Burton H. (1970). "Space/time trade-offs in hash coding with allowable errors"

mod bits;
mod builder;
mod sketch;

pub use self::bits::BitArray;
pub use self::bits::BitStorage;
pub use self::builder::BloomFilterBuilder;
pub use self::builder::MAX_NUM_BITS;
pub use self::sketch::BloomFilter;
