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

//! # bloomsketch
//!
//! A classic Bloom filter: given how many keys to hold, how many hash probes to spend per
//! key, and a target false positive rate, it sizes a bit array and answers "possibly
//! present" or "definitely absent" for any key.
//!
//! - [`bloom`]: the filter, its builder, and bit storage
//! - [`hash`]: the keyed hash family probes are drawn from
//! - [`error`]: construction errors
//!
//! Construction is logged through [`tracing`](https://docs.rs/tracing); install a subscriber
//! to see the derived sizes.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(missing_docs)]

pub mod bloom;
pub mod error;
pub mod hash;
