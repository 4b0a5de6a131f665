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

use bloomsketch::bloom::BloomFilter;

const NUM_KEYS: u64 = 100_000;
const NUM_HASHES: u16 = 4;
const MAX_FALSE_POSITIVE: f64 = 0.05;

fn main() {
    println!("=== Bloom Filter Word Check ===\n");

    let mut filter = BloomFilter::new(NUM_KEYS, NUM_HASHES, MAX_FALSE_POSITIVE)
        .expect("demo parameters are valid");
    println!(
        "Sized for {} keys with {} hashes at {:.2}% target: {} bits",
        filter.capacity(),
        filter.num_hashes(),
        filter.target_fpp() * 100.0,
        filter.num_bits()
    );

    // Synthetic words stand in for a word list; the first batch is inserted.
    let inserted = (0..NUM_KEYS).map(|i| format!("word-{i:06}"));
    for word in inserted.clone() {
        filter.insert(&word);
    }

    println!("Bits set: {}", filter.bits_set_count());
    println!(
        "Projected theoretical false positive rate: {:.6}",
        filter.projected_fpp()
    );

    let missing = inserted.filter(|word| !filter.find(word)).count();
    println!("There are {missing} words missing from the Bloom filter.");

    // The second batch was never inserted, so every hit is a false positive.
    let false_positives = (NUM_KEYS..2 * NUM_KEYS)
        .map(|i| format!("word-{i:06}"))
        .filter(|word| filter.find(word))
        .count();
    println!("There were {false_positives} false positives.");
    println!(
        "Percentage rate of false positives: {:.4}%",
        false_positives as f64 / NUM_KEYS as f64 * 100.0
    );
}
