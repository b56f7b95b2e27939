////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! A pure Rust implementation of the "high compression" (HC) encoder for the
//! LZ4 block format, along with a block decompressor.
//!
//! The HC encoder spends more time searching for matches than the regular
//! LZ4 encoder, walking a hash chain of earlier positions and looking ahead
//! one position before committing a match. The output is a plain LZ4 block:
//! no frame header, no checksum, and no stored decompressed length. Any
//! standard LZ4 block decoder can read it.
//!
//! The caller owns both buffers. Size the compression output with [`bound`],
//! and keep track of the decompressed length yourself, since
//! [`decompress`] needs a destination of exactly that length.
//!
//! # Example
//!
//! ```
//! let input = b"Hello world, this is quite something. Hello world, this is quite something.";
//!
//! let mut compressed = vec![0; lz4hc::bound(input)];
//! let size = lz4hc::compress_hc(input, &mut compressed).unwrap();
//! compressed.truncate(size);
//!
//! let mut decompressed = vec![0; input.len()];
//! lz4hc::decompress(&compressed, &mut decompressed).unwrap();
//! assert_eq!(&decompressed[..], &input[..]);
//! ```
//!
//! # Levels
//!
//! Compression levels run from [`MIN_LEVEL`] to [`MAX_LEVEL`]. Level `0`
//! selects [`DEFAULT_LEVEL`], and anything above [`MAX_LEVEL`] is clamped to
//! it. Higher levels search deeper; output size tends to plateau across the
//! upper levels.

#![warn(clippy::pedantic, clippy::cargo)]
// Due to the high amount of byte conversions, sometimes intentional lossy conversions are necessary.
#![allow(clippy::cast_possible_truncation)]
// too many lines is a dumb metric
#![allow(clippy::too_many_lines)]

pub mod data;
mod error;

pub use crate::data::compression::{
    compress_hc,
    compress_hc_level,
    compress_hc_to_vec,
    HcCompressor,
    DEFAULT_LEVEL,
    MAX_LEVEL,
    MIN_LEVEL,
};
pub use crate::data::decompression::{decompress, decompress_to_vec};
pub use crate::data::DecodeError;
pub use crate::error::{Error as Lz4HcError, Result as Lz4HcResult};

/// Worst case compressed size for an input of `length` bytes.
///
/// `length + length / 255 + 16`, saturating at `usize::MAX`.
#[must_use]
pub const fn bound_len(length: usize) -> usize {
    length
        .saturating_add(length / 255)
        .saturating_add(16)
}

/// Worst case compressed size for `input`. An output buffer of this size
/// always holds the compressed block.
///
/// See [`bound_len`].
#[must_use]
pub fn bound(input: &[u8]) -> usize {
    bound_len(input.len())
}

/// Size of the block that stores all `length` bytes as a single literal run.
///
/// This is the smallest output buffer the compression functions accept for an
/// input of `length` bytes.
#[must_use]
pub const fn literal_only_len(length: usize) -> usize {
    data::block::Sequence::last(length).encoded_len()
}
