////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Decompression of LZ4 blocks.
//!
//! A block is read as a repeating stream of tokens, each consisting of a token
//! byte, an optional literal length continuation, the literal bytes, and (for
//! every token but the last) a back reference.
//!
//! Literal bytes are always written before the back reference is performed.
//!
//! Back references are "run length encoded": the length of a copy may be longer
//! than its offset. The copy then reads bytes it has written itself, and the
//! last `offset` bytes repeat until the length is fulfilled.
//!
//! # Example
//!
//! Given the current decoded output of `DEADBEEF`, a match with an offset of
//! `4` and a length of `16` repeats `BEEF`:
//!
//! ```text
//! DEADBEEF
//!     ^   ^
//!     LB  O
//! ```
//!
//! ```text
//! DEADBEEFBEEFBEEFBEEFBEEF
//! ```
//!
//! The block has no end marker. It ends when the input runs out right after
//! the literals of a token, and at that point the output has to be exactly as
//! long as the destination.

use std::io::Cursor;

use byteorder::{LittleEndian, ReadBytesExt};

use crate::data::block::{read_length, MIN_MATCH, ML_BITS, ML_MASK, RUN_MASK};
use crate::data::{check_offset, copy_literals, replay_match, DecodeError};
use crate::{Lz4HcError, Lz4HcResult};

/// Decompress an LZ4 block from `input` into `output`.
///
/// `output` must be exactly as long as the decompressed data; the block
/// doesn't store that length, so the caller keeps track of it.
///
/// # Example
///
/// ```
/// let input = b"Hello world, this is quite something Hello world, this is quite something";
/// let compressed = lz4hc::compress_hc_to_vec(input, lz4hc::DEFAULT_LEVEL).unwrap();
///
/// let mut output = vec![0; input.len()];
/// lz4hc::decompress(&compressed, &mut output).unwrap();
/// assert_eq!(&output[..], &input[..]);
/// ```
///
/// # Errors
/// - [Lz4HcError::CorruptStream]: the block is empty, ends in the middle of a
///   token, or holds a match with an offset of 0 or reaching back before the
///   start of the output
/// - [Lz4HcError::SizeMismatch]: the block decodes to more bytes than `output`
///   holds, or ends before filling it
///
/// On error the contents of `output` are unspecified.
pub fn decompress(input: &[u8], output: &mut [u8]) -> Lz4HcResult<()> {
    if input.is_empty() {
        return Err(Lz4HcError::CorruptStream {
            error: DecodeError::Empty,
            position: 0,
        });
    }

    let destination = output.len();
    let overrun = |decoded: usize| Lz4HcError::SizeMismatch {
        destination,
        decoded,
    };

    let mut reader = Cursor::new(input);
    let mut position = 0usize;

    loop {
        let token_position = reader.position() as usize;
        let corrupt = |error: DecodeError| Lz4HcError::CorruptStream {
            error,
            position: token_position,
        };

        let token = reader.read_u8().map_err(|err| corrupt(err.into()))?;

        let literal_length = read_length(token >> ML_BITS, RUN_MASK, &mut reader)
            .map_err(|err| corrupt(err.into()))?;
        let literal_end = position.saturating_add(literal_length);
        if literal_end > destination {
            return Err(overrun(literal_end));
        }
        position = copy_literals(output, &mut reader, position, literal_length).map_err(corrupt)?;

        if reader.position() as usize == input.len() {
            // last token, no match follows
            return if position == destination {
                Ok(())
            } else {
                Err(overrun(position))
            };
        }

        let offset = reader
            .read_u16::<LittleEndian>()
            .map_err(|err| corrupt(err.into()))? as usize;
        check_offset(position, offset).map_err(corrupt)?;

        let match_length = read_length(token & ML_MASK as u8, ML_MASK, &mut reader)
            .map_err(|err| corrupt(err.into()))?
            .saturating_add(MIN_MATCH);
        let match_end = position.saturating_add(match_length);
        if match_end > destination {
            return Err(overrun(match_end));
        }

        position = replay_match(output, position, offset, match_length).map_err(corrupt)?;
    }
}

/// Wrapped decompress function with a bit easier and cleaner of an API.
/// Takes a slice of bytes and the decompressed length, and returns a Vec of
/// bytes
///
/// # Returns
///
/// A Result containing either `Vec<u8>` of the decompressed data or a
/// `Lz4HcError`.
///
/// # Errors
/// See [decompress]
#[inline]
pub fn decompress_to_vec(input: &[u8], decompressed_length: usize) -> Lz4HcResult<Vec<u8>> {
    let mut output = vec![0; decompressed_length];
    decompress(input, &mut output)?;
    Ok(output)
}
