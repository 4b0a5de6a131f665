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

//! Keyed hash functions used to derive probe positions.
//!
//! A Bloom filter needs `k` independent hash values per key. Rather than
//! `k` distinct algorithms, a [`HashGenerator`] is a single hash family
//! parameterized by an integer seed: the filter asks for `hash(key, 1)`
//! through `hash(key, k)`.

mod murmurhash;

use std::hash::Hash;

pub use self::murmurhash::MurmurHashGenerator;

/// The seed 9001 used by the default generator is a prime number.
///
/// Choosing a seed is somewhat arbitrary. Two filters only agree on bit positions when both
/// the hash family and the base seed match, so a seed cannot change once filters built with it
/// are compared against each other.
pub const DEFAULT_UPDATE_SEED: u32 = 9001;

/// A family of keyed hash functions.
///
/// Implementations must be deterministic for a given `(key, seed)` pair and should spread
/// outputs uniformly over `u64` so that distinct seeds behave like independent functions.
pub trait HashGenerator {
    /// Hashes `key` with the function selected by `seed`.
    fn hash<T: Hash + ?Sized>(&self, key: &T, seed: u32) -> u64;
}

impl<G: HashGenerator + ?Sized> HashGenerator for &G {
    fn hash<T: Hash + ?Sized>(&self, key: &T, seed: u32) -> u64 {
        (**self).hash(key, seed)
    }
}
