////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

// shared between the integration tests and the benches, not every user needs
// every helper
#![allow(dead_code)]

use std::iter;

use rand::prelude::*;

/// A few kilobytes of plain English prose
pub const SAMPLE_TEXT: &[u8] = include_bytes!("sample.txt");

pub const HELLO_PHRASE: &[u8] = b"Hello world, this is quite something ";

pub fn sample_text() -> Vec<u8> {
    SAMPLE_TEXT.to_vec()
}

/// `HELLO_PHRASE` repeated `repeats` times
pub fn hello_repeated(repeats: usize) -> Vec<u8> {
    HELLO_PHRASE.repeat(repeats)
}

/// Uppercase alphabet with no repetition at all
pub fn alphabet() -> Vec<u8> {
    (b'A'..=b'Z').collect()
}

pub fn random_vec(len: usize) -> Vec<u8> {
    iter::repeat_with(random::<u8>).take(len).collect()
}

/// Random bytes from a seeded generator, for inputs that have to be identical
/// between runs
pub fn seeded_random_vec(len: usize, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    iter::repeat_with(|| rng.gen::<u8>()).take(len).collect()
}

pub fn repeating_vec(num: usize) -> Vec<u8> {
    (0..=255).cycle().take(num).collect()
}
