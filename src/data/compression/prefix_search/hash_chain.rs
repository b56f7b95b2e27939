////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use std::cmp::min;

use crate::data::block::{MAX_DISTANCE, MIN_MATCH};
use crate::data::compression::match_length::match_length;
use crate::data::compression::prefix_search::{
    hash_prefix,
    Match,
    MatchFinder,
    HASH_TABLE_SIZE,
    PREFIX_LEN,
};
use crate::data::compression::SearchParams;

// links older than the maximum distance are never followed, so the chain only
// has to remember one window worth of positions
const WINDOW_SIZE: usize = MAX_DISTANCE + 1;

const NONE: usize = usize::MAX;

/// Backing storage of a [HashChain]. Kept separately so it can be reused
/// between compression calls.
#[derive(Debug, Default, Clone)]
pub(crate) struct ChainTables {
    /// most recent position for every hash bucket
    head: Vec<usize>,
    /// previous position with the same hash, indexed by position modulo the
    /// table length
    prev: Vec<usize>,
}

impl ChainTables {
    fn reset(&mut self, bytes: usize) {
        self.head.clear();
        self.head.resize(HASH_TABLE_SIZE, NONE);
        self.prev.clear();
        self.prev.resize(min(bytes, WINDOW_SIZE), NONE);
    }
}

/// Hash chain match finder.
///
/// Every position is linked to the previous position whose 4 byte prefix has
/// the same hash. Walking the links from the bucket head visits candidates
/// newest first, so the first candidate of a given length is also the closest.
pub(crate) struct HashChain<'a> {
    buffer: &'a [u8],
    tables: &'a mut ChainTables,
    /// first position that hasn't been inserted yet
    next_to_index: usize,
}

impl<'a> HashChain<'a> {
    pub(crate) fn new(buffer: &'a [u8], tables: &'a mut ChainTables) -> Self {
        tables.reset(buffer.len());
        Self {
            buffer,
            tables,
            next_to_index: 0,
        }
    }

    /// insert every position before `target` that hasn't been inserted yet
    fn index_up_to(&mut self, target: usize) {
        // positions without a full prefix left can't start a match
        let target = min(target, self.buffer.len().saturating_sub(PREFIX_LEN - 1));
        let ring = self.tables.prev.len();

        while self.next_to_index < target {
            let pos = self.next_to_index;
            let hash = hash_prefix(&self.buffer[pos..]);
            self.tables.prev[pos % ring] = self.tables.head[hash];
            self.tables.head[hash] = pos;
            self.next_to_index += 1;
        }
    }
}

impl MatchFinder for HashChain<'_> {
    fn find_longest(
        &mut self,
        pos: usize,
        match_limit: usize,
        params: &SearchParams,
    ) -> Option<Match> {
        self.index_up_to(pos);

        let max_len = match_limit.saturating_sub(pos);
        if max_len < MIN_MATCH {
            return None;
        }

        let buffer = self.buffer;
        let ring = self.tables.prev.len();

        let mut candidate = self.tables.head[hash_prefix(&buffer[pos..])];
        let mut attempts = params.max_attempts;
        let mut best = None;
        let mut best_len = MIN_MATCH - 1;

        while candidate != NONE && attempts > 0 {
            let offset = pos - candidate;
            if offset > MAX_DISTANCE {
                break;
            }
            attempts -= 1;

            // a longer match has to agree on the byte right after the current best
            if buffer[candidate + best_len] == buffer[pos + best_len] {
                let length = match_length(buffer, pos, candidate, max_len);
                if length > best_len {
                    best_len = length;
                    best = Some(Match { offset, length });
                    if length >= params.sufficient_length || length == max_len {
                        break;
                    }
                }
            }

            candidate = self.tables.prev[candidate % ring];
        }

        best
    }
}
