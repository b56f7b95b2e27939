////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use lz4hc::{
    bound,
    compress_hc_level,
    compress_hc_to_vec,
    decompress,
    decompress_to_vec,
    literal_only_len,
    Lz4HcError,
};
use proptest::collection::vec;
use proptest::prelude::*;
use test_strategy::proptest;

#[proptest]
fn compression_symmetrical(
    #[strategy(vec(any::<u8>(), 100..=1_000))] input: Vec<u8>,
    #[strategy(0..=16u8)] level: u8,
) {
    let compressed = compress_hc_to_vec(&input, level).unwrap();
    prop_assert!(compressed.len() <= bound(&input));

    let decompressed = decompress_to_vec(&compressed, input.len()).unwrap();

    prop_assert_eq!(input, decompressed);
}

#[proptest]
fn repetitive_compression_symmetrical(
    #[strategy(vec(vec(any::<u8>(), 1..=16), 1..=200))] pieces: Vec<Vec<u8>>,
    #[strategy(vec(0..#pieces.len(), 0..=400))] picks: Vec<usize>,
    #[strategy(0..=16u8)] level: u8,
) {
    let input: Vec<u8> = picks.iter().flat_map(|&pick| pieces[pick].clone()).collect();

    let compressed = compress_hc_to_vec(&input, level).unwrap();
    let decompressed = decompress_to_vec(&compressed, input.len()).unwrap();

    prop_assert_eq!(input, decompressed);
}

#[proptest]
fn any_sufficient_output_length_works(
    #[strategy(vec(0..=15u8, 0..=1_000))] input: Vec<u8>,
    #[strategy(0..=64usize)] slack: usize,
) {
    let mut output = vec![0; literal_only_len(input.len()) + slack];
    let written = compress_hc_level(&input, &mut output, 9).unwrap();

    let mut decompressed = vec![0; input.len()];
    decompress(&output[..written], &mut decompressed).unwrap();

    prop_assert_eq!(input, decompressed);
}

#[proptest]
fn corrupted_block_is_detected_or_decodes(
    #[strategy(vec(any::<u8>(), 13..=500))] input: Vec<u8>,
    #[strategy(0..#input.len())] corrupt_at: usize,
    flip: u8,
) {
    let mut compressed = compress_hc_to_vec(&input, 9).unwrap();
    let index = corrupt_at % compressed.len();
    compressed[index] ^= flip;

    // corruption is either reported or decodes to some block of the same
    // length, never a panic
    match decompress_to_vec(&compressed, input.len()) {
        Ok(_) | Err(Lz4HcError::CorruptStream { .. } | Lz4HcError::SizeMismatch { .. }) => {}
        Err(other) => prop_assert!(false, "unexpected error {other:?}"),
    }
}
