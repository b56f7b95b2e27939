////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! High compression encoder. Exact compression algorithm may be subject to
//! change; only the block format is fixed.
//!
//! Compression happens in two passes over the input. First the parser walks
//! the input, asking a hash chain match finder for the longest earlier
//! occurrence of the bytes at the current position, and splits the input into
//! [Sequence]s of literals followed by a match. Then every sequence is written
//! out as one token.
//!
//! The compression level picks how many chain links are followed per search
//! and whether the parser looks one position ahead before committing a match:
//!
//! | Level   | Chain depth     | Lookahead           | Search stops at |
//! |---------|-----------------|---------------------|-----------------|
//! | 1..=2   | `1 << (l - 1)`  | none                | 64 bytes        |
//! | 3..=8   | `1 << (l - 1)`  | one position        | 64 bytes        |
//! | 9..=15  | `1 << (l - 1)`  | while it improves   | 256 bytes       |
//! | 16      | 32768           | while it improves   | never           |
//!
//! Level 0 is [DEFAULT_LEVEL], levels past [MAX_LEVEL] are clamped.
//!
//! Positions inside a committed match are still inserted into the hash chain,
//! so later searches can find matches starting inside it.

pub(crate) mod hc;
pub(crate) mod match_length;
pub(crate) mod prefix_search;

use std::io::Cursor;

use log::{debug, trace};

use crate::data::block::Sequence;
use crate::data::compression::prefix_search::hash_chain::{ChainTables, HashChain};
use crate::{literal_only_len, Lz4HcError, Lz4HcResult};

/// Lowest accepted compression level. Selects [DEFAULT_LEVEL].
pub const MIN_LEVEL: u8 = 0;

/// Highest compression level. Higher values are clamped to this.
pub const MAX_LEVEL: u8 = 16;

/// Level used by [compress_hc], and by level `0`
pub const DEFAULT_LEVEL: u8 = 9;

/// Numeric search policy derived from a compression level
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct SearchParams {
    /// chain links followed per search
    pub max_attempts: usize,
    /// a match at least this long ends the search early
    pub sufficient_length: usize,
    /// how many times the parser may defer a match to the next position
    pub lazy_steps: usize,
}

/// Map any level onto `1..=MAX_LEVEL`
fn effective_level(level: u8) -> u8 {
    match level {
        0 => DEFAULT_LEVEL,
        1..=MAX_LEVEL => level,
        _ => {
            debug!("Compression level {level} clamped to {MAX_LEVEL}");
            MAX_LEVEL
        }
    }
}

impl SearchParams {
    pub(crate) fn for_level(level: u8) -> Self {
        let level = effective_level(level);
        Self {
            max_attempts: 1 << (level - 1),
            sufficient_length: match level {
                1..=8 => 64,
                9..=15 => 256,
                _ => usize::MAX,
            },
            lazy_steps: match level {
                1..=2 => 0,
                3..=8 => 1,
                _ => usize::MAX,
            },
        }
    }
}

/// Reusable high compression context.
///
/// Holds on to the hash chain tables between calls so repeated compression
/// doesn't allocate them every time. Each call still starts from empty tables;
/// nothing about one input influences the output for the next.
///
/// # Example
///
/// ```
/// use lz4hc::HcCompressor;
///
/// let mut compressor = HcCompressor::new(12);
/// for input in [&b"first input, first input"[..], &b"second input, second input"[..]] {
///     let mut output = vec![0; lz4hc::bound(input)];
///     let size = compressor.compress(input, &mut output).unwrap();
///     assert!(size <= output.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct HcCompressor {
    level: u8,
    params: SearchParams,
    tables: ChainTables,
}

impl Default for HcCompressor {
    fn default() -> Self {
        Self::new(DEFAULT_LEVEL)
    }
}

impl HcCompressor {
    /// Create a compressor for `level`. See [compress_hc_level] for how levels
    /// are interpreted.
    #[must_use]
    pub fn new(level: u8) -> Self {
        let level = effective_level(level);
        Self {
            level,
            params: SearchParams::for_level(level),
            tables: ChainTables::default(),
        }
    }

    /// The effective compression level, after mapping `0` to the default and
    /// clamping
    #[must_use]
    pub fn level(&self) -> u8 {
        self.level
    }

    /// Compress `input` into `output` as a single block.
    ///
    /// # Returns
    /// the number of bytes written to `output`
    ///
    /// # Errors
    /// - [Lz4HcError::CapacityExceeded]: `output` is shorter than
    ///   [literal_only_len] of the input. Nothing is written.
    pub fn compress(&mut self, input: &[u8], output: &mut [u8]) -> Lz4HcResult<usize> {
        let required = literal_only_len(input.len());
        if output.len() < required {
            return Err(Lz4HcError::CapacityExceeded {
                required,
                available: output.len(),
            });
        }

        let sequences = {
            let mut finder = HashChain::new(input, &mut self.tables);
            hc::parse(&mut finder, input, &self.params)
        };

        let written = match write_block(input, &sequences, output) {
            Ok(written) => written,
            Err(Lz4HcError::CapacityExceeded {
                required,
                available,
            }) => {
                debug!(
                    "Compressed block needs at least {required} bytes but only {available} are \
                     available, storing literals only"
                );
                write_block(input, &[Sequence::last(input.len())], output)?
            }
            Err(error) => return Err(error),
        };

        trace!(
            "Compressed {} bytes to {written} at level {}",
            input.len(),
            self.level
        );

        Ok(written)
    }
}

/// Encode `sequences` into `output` as tokens, taking the literal bytes from
/// `input`.
///
/// Every token is checked against the remaining capacity before anything of
/// it is written.
///
/// # Returns
/// the number of bytes written
///
/// # Errors
/// - [Lz4HcError::CapacityExceeded]: the next token doesn't fit
fn write_block(input: &[u8], sequences: &[Sequence], output: &mut [u8]) -> Lz4HcResult<usize> {
    let available = output.len();
    let mut writer = Cursor::new(output);
    let mut position = 0;

    for sequence in sequences {
        let written = writer.position() as usize;
        let required = written + sequence.encoded_len();
        if required > available {
            return Err(Lz4HcError::CapacityExceeded {
                required,
                available,
            });
        }

        let literals = &input[position..position + sequence.literals];
        sequence
            .write(literals, &mut writer)
            .map_err(|_| Lz4HcError::CapacityExceeded {
                required,
                available,
            })?;
        position += sequence.decoded_len();
    }

    debug_assert_eq!(position, input.len());
    Ok(writer.position() as usize)
}

/// Compress `input` into `output` at [DEFAULT_LEVEL].
///
/// `output` should be [bound](crate::bound) bytes long to be sure the block
/// fits. Anything shorter than [literal_only_len] of the input is rejected.
///
/// # Example
///
/// ```
/// let input = b"Hello world, this is quite something Hello world, this is quite something";
/// let mut output = vec![0; lz4hc::bound(input)];
///
/// let size = lz4hc::compress_hc(input, &mut output).unwrap();
/// assert!(size < input.len());
/// ```
///
/// # Returns
/// the number of bytes written to `output`
///
/// # Errors
/// - [Lz4HcError::CapacityExceeded]: `output` can't even hold the input as
///   literals. Nothing is written.
pub fn compress_hc(input: &[u8], output: &mut [u8]) -> Lz4HcResult<usize> {
    compress_hc_level(input, output, DEFAULT_LEVEL)
}

/// Compress `input` into `output` at the given level.
///
/// Levels run from [MIN_LEVEL] to [MAX_LEVEL]. Level `0` selects
/// [DEFAULT_LEVEL], and levels above [MAX_LEVEL] are clamped to it. Higher
/// levels search harder and generally give smaller output, though neighbouring
/// levels often produce the same size.
///
/// Compression succeeds whenever `output` holds at least [literal_only_len]
/// bytes; if the compressed tokens don't fit, the input is stored as literals.
///
/// # Returns
/// the number of bytes written to `output`
///
/// # Errors
/// - [Lz4HcError::CapacityExceeded]: `output` can't even hold the input as
///   literals. Nothing is written.
pub fn compress_hc_level(input: &[u8], output: &mut [u8], level: u8) -> Lz4HcResult<usize> {
    HcCompressor::new(level).compress(input, output)
}

/// Wrapped compress function with a bit easier and cleaner of an API. Takes a
/// `&[u8]` slice of uncompressed bytes and returns a `Vec<u8>` holding just the
/// compressed block
///
/// In implementation this allocates a [bound](crate::bound) sized buffer,
/// calls [compress_hc_level] and truncates the result.
///
/// # Errors
/// Never fails in practice, since the buffer is always large enough; the
/// `Result` mirrors [compress_hc_level].
#[inline]
pub fn compress_hc_to_vec(input: &[u8], level: u8) -> Lz4HcResult<Vec<u8>> {
    let mut output = vec![0; crate::bound(input)];
    let written = compress_hc_level(input, &mut output, level)?;
    output.truncate(written);
    Ok(output)
}
