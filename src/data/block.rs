////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

//! Tokens of the LZ4 block format, utilized by compression and decompression
//!
//! A block is a plain sequence of tokens, with no header, footer or checksum.
//! Every token is a run of literal bytes optionally followed by a match. The
//! last token of a block never has a match.
//!
//! ## Key for layout
//! - `L`: Literal run length
//! - `M`: Match length, biased by [MIN_MATCH]
//! - `-`: Nibble Separator
//! - `:`: Field Separator
//!
//! ```text
//! LLLL-MMMM : [literal length bytes] : literals : offset (u16 LE) : [match length bytes]
//! ```
//!
//! ## Lengths
//!
//! Both lengths start in their nibble of the token byte. A nibble value of
//! `15` means the length continues in extra bytes after the token (for the
//! literal length) or after the offset (for the match length). Every extra
//! byte is added to the length, and bytes keep following as long as the last
//! one read was `255`.
//!
//! Writing out a literal length of 300:
//!
//! 1. the nibble is `15`, leaving `285`
//! 2. write `255`, leaving `30`
//! 3. write `30`. it isn't `255`, so the length ends here
//!
//! A remainder that is an exact multiple of 255 still ends with a `0` byte.

use std::io::{self, Read, Write};

use byteorder::{LittleEndian, ReadBytesExt, WriteBytesExt};

/// Shortest match the format can express. Match lengths are stored minus this.
pub const MIN_MATCH: usize = 4;

/// Largest distance a match can reach back
pub const MAX_DISTANCE: usize = 65_535;

/// Number of bits used for the match length in the token byte
pub const ML_BITS: u32 = 4;

/// Mask for the match length nibble
pub const ML_MASK: usize = (1 << ML_BITS) - 1;

/// Mask for the literal length nibble
pub const RUN_MASK: usize = (1 << (8 - ML_BITS)) - 1;

/// The last bytes of a block are always literals
pub const LAST_LITERALS: usize = 5;

/// The last match must start at least this many bytes before the end of the
/// block
pub const MF_LIMIT: usize = 12;

/// Blocks shorter than this hold no matches
pub const MIN_INPUT_LENGTH: usize = MF_LIMIT + 1;

/// Value of a length byte that means another length byte follows
const LENGTH_CONTINUE: u8 = u8::MAX;

/// A back reference: copy `length` bytes starting `offset` bytes behind the
/// current output position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BackReference {
    pub offset: u16,
    pub length: usize,
}

/// A literal run and the match following it. One `Sequence` encodes to one
/// token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sequence {
    /// number of literal bytes preceding the match
    pub literals: usize,
    /// the match, `None` only for the final sequence of a block
    pub copy: Option<BackReference>,
}

/// Number of extra bytes needed to write a length whose nibble is saturated
/// at `mask`
const fn length_bytes(length: usize, mask: usize) -> usize {
    if length < mask {
        0
    } else {
        (length - mask) / LENGTH_CONTINUE as usize + 1
    }
}

const fn nibble(length: usize, mask: usize) -> usize {
    if length < mask {
        length
    } else {
        mask
    }
}

impl Sequence {
    /// Create a sequence of `literals` literal bytes followed by a match.
    ///
    /// # Panics
    /// Panics if the match is shorter than [MIN_MATCH] or has an offset of 0
    #[must_use]
    pub fn new(literals: usize, offset: u16, length: usize) -> Self {
        assert!(
            length >= MIN_MATCH,
            "Match length must be at least {MIN_MATCH} (got {length})"
        );
        assert!(offset > 0, "Match offset must not be 0");
        Self {
            literals,
            copy: Some(BackReference { offset, length }),
        }
    }

    /// Create the final sequence of a block, `literals` bytes with no match
    #[must_use]
    pub const fn last(literals: usize) -> Self {
        Self {
            literals,
            copy: None,
        }
    }

    /// Number of bytes this sequence decodes to
    #[must_use]
    pub fn decoded_len(self) -> usize {
        self.literals + self.copy.map_or(0, |copy| copy.length)
    }

    /// Number of bytes the encoded token takes up, including the literals
    #[must_use]
    pub const fn encoded_len(self) -> usize {
        let literal_part = 1 + length_bytes(self.literals, RUN_MASK) + self.literals;
        match self.copy {
            Some(copy) => literal_part + 2 + length_bytes(copy.length - MIN_MATCH, ML_MASK),
            None => literal_part,
        }
    }

    /// The token byte: literal length nibble high, match length nibble low
    #[must_use]
    pub fn token(self) -> u8 {
        let literal = nibble(self.literals, RUN_MASK);
        let matched = self
            .copy
            .map_or(0, |copy| nibble(copy.length - MIN_MATCH, ML_MASK));
        ((literal << ML_BITS) | matched) as u8
    }

    /// Encodes and writes the token followed by `literals` to a writer
    ///
    /// # Errors
    /// - Generic IO error occurred while attempting to write data
    ///
    /// # Panics
    /// Panics if `literals` is not exactly the length of the literal run
    pub fn write(self, literals: &[u8], writer: &mut impl Write) -> io::Result<()> {
        assert_eq!(
            literals.len(),
            self.literals,
            "Literal bytes do not match the literal run length"
        );

        writer.write_u8(self.token())?;
        if self.literals >= RUN_MASK {
            write_length(self.literals - RUN_MASK, writer)?;
        }
        writer.write_all(literals)?;

        if let Some(copy) = self.copy {
            writer.write_u16::<LittleEndian>(copy.offset)?;
            let biased = copy.length - MIN_MATCH;
            if biased >= ML_MASK {
                write_length(biased - ML_MASK, writer)?;
            }
        }
        Ok(())
    }
}

/// Write the extra bytes of a length, `remainder` being what is left after
/// the nibble
fn write_length(mut remainder: usize, writer: &mut impl Write) -> io::Result<()> {
    while remainder >= LENGTH_CONTINUE as usize {
        writer.write_u8(LENGTH_CONTINUE)?;
        remainder -= LENGTH_CONTINUE as usize;
    }
    writer.write_u8(remainder as u8)
}

/// Resolve a length from its nibble, reading extra bytes from the reader if
/// the nibble is saturated at `mask`
///
/// # Errors
/// - Generic IO error if the reader runs out before the length ends
#[inline(always)]
pub(crate) fn read_length(nibble: u8, mask: usize, reader: &mut impl Read) -> io::Result<usize> {
    let mut length = nibble as usize;
    if length == mask {
        loop {
            let byte = reader.read_u8()?;
            length = length.saturating_add(byte as usize);
            if byte != LENGTH_CONTINUE {
                break;
            }
        }
    }
    Ok(length)
}
