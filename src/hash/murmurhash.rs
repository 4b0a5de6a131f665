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

use super::DEFAULT_UPDATE_SEED;
use super::HashGenerator;

// Odd 32-bit golden ratio constant; multiplying by it is a bijection on u32.
const PROBE_MIX: u32 = 0x9E37_79B9;

/// [`HashGenerator`] backed by 128-bit MurmurHash3 (x64 variant).
///
/// The probe seed is mixed into the base seed before hashing, and the low 64 bits of the
/// 128-bit digest are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MurmurHashGenerator {
    seed: u32,
}

impl MurmurHashGenerator {
    /// Creates a generator with the given base seed.
    pub fn with_seed(seed: u32) -> Self {
        MurmurHashGenerator { seed }
    }

    /// Returns the base seed.
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for MurmurHashGenerator {
    fn default() -> Self {
        Self::with_seed(DEFAULT_UPDATE_SEED)
    }
}

impl HashGenerator for MurmurHashGenerator {
    fn hash<T: Hash + ?Sized>(&self, key: &T, seed: u32) -> u64 {
        let mut hasher = mur3::Hasher128::with_seed(self.seed ^ seed.wrapping_mul(PROBE_MIX));
        key.hash(&mut hasher);
        let (lo, _) = hasher.finish128();
        lo
    }
}
