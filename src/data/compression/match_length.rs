////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use std::cmp::min;

const USIZE_BYTES: usize = size_of::<usize>();

#[inline(always)]
fn load_word(bytes: &[u8]) -> usize {
    let mut word = [0u8; USIZE_BYTES];
    word.copy_from_slice(bytes);
    usize::from_le_bytes(word)
}

/// index of the first differing byte of two words, if any
#[inline(always)]
fn compare_block(src: &[u8], cmp: &[u8]) -> Option<usize> {
    let xor = load_word(src) ^ load_word(cmp);

    if xor == 0 {
        None
    } else {
        Some((xor.trailing_zeros() / 8) as usize)
    }
}

/// find the length of common bytes between two positions in a buffer, up to
/// `max_len` bytes and the end of the buffer
///
/// `matched_pos` must come before `source`; the ranges may overlap.
#[inline]
pub fn match_length(buffer: &[u8], source: usize, matched_pos: usize, max_len: usize) -> usize {
    debug_assert!(matched_pos < source);

    let end = min(source.saturating_add(max_len), buffer.len());
    let source_slice = &buffer[source..end];
    let match_slice = &buffer[matched_pos..matched_pos + source_slice.len()];

    let mut source_chunks = source_slice.chunks_exact(USIZE_BYTES);
    let mut match_chunks = match_slice.chunks_exact(USIZE_BYTES);

    let mut num = 0;
    for (src, cmp) in (&mut source_chunks).zip(&mut match_chunks) {
        if let Some(found) = compare_block(src, cmp) {
            return num + found;
        }
        num += USIZE_BYTES;
    }

    num + source_chunks
        .remainder()
        .iter()
        .zip(match_chunks.remainder())
        .take_while(|(a, b)| a == b)
        .count()
}
