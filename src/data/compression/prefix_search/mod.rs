////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

pub(crate) mod hash_chain;

use crate::data::compression::SearchParams;

/// log2 of the number of hash buckets
pub(crate) const HASH_LOG: u32 = 15;

/// number of hash buckets
pub(crate) const HASH_TABLE_SIZE: usize = 1 << HASH_LOG;

/// Bytes hashed per position. Equal to the minimum match length, so every
/// candidate sharing a bucket has a chance of being a real match.
pub(crate) const PREFIX_LEN: usize = 4;

/// hash of the 4 byte prefix at the start of `input_buf`
#[inline(always)]
pub(crate) fn hash_prefix(input_buf: &[u8]) -> usize {
    let prefix = u32::from_le_bytes([input_buf[0], input_buf[1], input_buf[2], input_buf[3]]);
    (prefix.wrapping_mul(2_654_435_761) >> (32 - HASH_LOG)) as usize
}

/// A candidate match for the current position
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Match {
    /// distance back to the start of the match, `1..=MAX_DISTANCE`
    pub offset: usize,
    /// number of matching bytes, at least `MIN_MATCH`
    pub length: usize,
}

pub(crate) trait MatchFinder {
    /// Find the longest match for the bytes at `pos`.
    ///
    /// Positions have to be searched in non-decreasing order. Every position
    /// before `pos` must be eligible as a match start, including ones that were
    /// never searched themselves.
    ///
    /// Matches end at or before `match_limit`. Among matches of equal length
    /// the one with the smallest offset wins. Returns `None` if nothing of at
    /// least `MIN_MATCH` bytes is found.
    fn find_longest(&mut self, pos: usize, match_limit: usize, params: &SearchParams)
        -> Option<Match>;
}

#[cfg(test)]
pub(crate) mod reference {
    //! exhaustive search to check the hash chain against

    use super::{Match, MatchFinder};
    use crate::data::block::{MAX_DISTANCE, MIN_MATCH};
    use crate::data::compression::match_length::match_length;
    use crate::data::compression::SearchParams;

    pub(crate) struct BruteForce<'a> {
        pub buffer: &'a [u8],
    }

    impl MatchFinder for BruteForce<'_> {
        fn find_longest(
            &mut self,
            pos: usize,
            match_limit: usize,
            _params: &SearchParams,
        ) -> Option<Match> {
            let mut best: Option<Match> = None;
            for offset in 1..=pos.min(MAX_DISTANCE) {
                let length = match_length(self.buffer, pos, pos - offset, match_limit - pos);
                if length >= MIN_MATCH && best.map_or(true, |best| length > best.length) {
                    best = Some(Match { offset, length });
                }
            }
            best
        }
    }
}
