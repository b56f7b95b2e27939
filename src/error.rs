////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use std::fmt::{Display, Formatter};

use crate::data::DecodeError;

/// Possible errors returned by compression and decompression functions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The output buffer given to a compression function is too small to hold
    /// the compressed block. Nothing was written to it.
    ///
    /// ### Fields
    /// - required: minimum number of bytes the output needs
    /// - available: length of the output buffer that was provided
    CapacityExceeded { required: usize, available: usize },
    /// Indicates that an invalid token was encountered while decoding a block.
    /// This normally indicates invalid or corrupted data.
    ///
    /// See [DecodeError] for further details on types of errors that can occur.
    ///
    /// ### Fields
    /// - error: what went wrong
    /// - position: offset in the compressed input of the token being decoded
    CorruptStream { error: DecodeError, position: usize },
    /// The destination buffer given to decompression is not the length the
    /// block decodes to.
    ///
    /// ### Fields
    /// - destination: length of the destination buffer
    /// - decoded: length implied by the block. If the block overran the
    ///   destination this is the length it needed at the point it stopped, so
    ///   the real decoded length is at least this.
    SizeMismatch { destination: usize, decoded: usize },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CapacityExceeded {
                required,
                available,
            } => {
                write!(
                    f,
                    "Output buffer too small: `{required}` bytes required, `{available}` available"
                )
            }
            Error::CorruptStream { error, position } => {
                write!(
                    f,
                    "Error occured while decoding token at position `{position}`:\n{error}"
                )
            }
            Error::SizeMismatch {
                destination,
                decoded,
            } => {
                if decoded > destination {
                    write!(
                        f,
                        "Block decodes to at least `{decoded}` bytes, destination holds \
                         `{destination}`"
                    )
                } else {
                    write!(
                        f,
                        "Block decodes to `{decoded}` bytes, destination expects `{destination}`"
                    )
                }
            }
        }
    }
}

impl std::error::Error for Error {}

/// Wrapper for Result specified to [Lz4HcError](crate::Lz4HcError)
pub type Result<T> = std::result::Result<T, Error>;
