////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! things relating to the compressed block itself. The token format, the
//! compression algorithms, and decompression.

use std::io::{self, Read};

use onlyerror::Error;

pub mod block;
pub mod compression;
pub mod decompression;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeError {
    /// Error indicating that the compressed input was empty. Even an empty
    /// block consists of one token.
    #[error("Compressed block is empty")]
    Empty,
    /// Error indicating that the block ended in the middle of a token, before
    /// a length byte, literal, or offset it announced.
    #[error("Compressed block ended in the middle of a token")]
    Truncated,
    /// Error indicating that a match offset was 0. This doesn't make sense,
    /// and likely indicates the data is corrupted or malformed.
    #[error("Offset is 0 in match")]
    BadOffset,
    /// Error indicating that the requested copy offset would go past the start
    /// of the buffer. This indicates malformed or corrupted data.
    ///
    /// ### Fields
    /// - usize: decoded length so far
    /// - usize: offset requested
    #[error("Offset went past start of buffer: decoded length `{0}`, offset `{1}`")]
    NegativePosition(usize, usize),
}

impl From<io::Error> for DecodeError {
    // every read happens on an in-memory cursor, so the only failure is
    // running out of input
    fn from(_: io::Error) -> Self {
        Self::Truncated
    }
}

/// Check that a match `offset` bytes behind `position` lands inside the
/// decoded data
///
/// # Errors
/// - [DecodeError::BadOffset]: `offset` is 0
/// - [DecodeError::NegativePosition]: `offset` > `position`
#[inline(always)]
pub(crate) fn check_offset(position: usize, offset: usize) -> Result<(), DecodeError> {
    if offset == 0 {
        return Err(DecodeError::BadOffset);
    }
    if offset > position {
        return Err(DecodeError::NegativePosition(position, offset));
    }
    Ok(())
}

/// Replay a match: copy `length` bytes starting `offset` bytes behind
/// `position` to `position`.
///
/// The source range may overlap the destination when `offset < length`, in
/// which case bytes written earlier in the same copy are read again, repeating
/// the last `offset` bytes.
///
/// If this function errors no data will have been copied
///
/// # Errors
/// - [DecodeError::BadOffset]: `offset` is 0
/// - [DecodeError::NegativePosition]: `offset` > `position`
///
/// # Panics
/// Panics if `position + length` > `buffer.len()`. Callers check the
/// destination before replaying.
///
/// # Returns
/// the new position of the buffer after the copy
#[inline(always)]
pub(crate) fn replay_match(
    buffer: &mut [u8],
    position: usize,
    offset: usize,
    length: usize,
) -> Result<usize, DecodeError> {
    check_offset(position, offset)?;
    assert!(
        position + length <= buffer.len(),
        "Attempted to copy past end of output buffer; position: {position}; length: {length}"
    );

    let source = position - offset;

    if offset >= length {
        buffer.copy_within(source..source + length, position);
    } else {
        // overlapping, the copy has to observe its own output
        for i in 0..length {
            buffer[position + i] = buffer[source + i];
        }
    }

    Ok(position + length)
}

/// Copy `length` literal bytes from the reader into `buffer` at `position`
///
/// # Returns
/// the new position of the buffer after the read
///
/// # Errors
/// - [DecodeError::Truncated]: the reader holds fewer than `length` bytes
///
/// # Panics
/// Panics if a copy would go past the end of the buffer to copy to
#[inline(always)]
pub(crate) fn copy_literals(
    buffer: &mut [u8],
    reader: &mut impl Read,
    position: usize,
    length: usize,
) -> Result<usize, DecodeError> {
    assert!(
        buffer.len() >= position + length,
        "Attempted to copy past end of output buffer; position: {position}; length: {length}"
    );

    reader.read_exact(&mut buffer[position..(position + length)])?;

    Ok(position + length)
}
