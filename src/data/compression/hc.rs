////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use crate::data::block::{Sequence, LAST_LITERALS, MF_LIMIT, MIN_INPUT_LENGTH};
use crate::data::compression::prefix_search::MatchFinder;
use crate::data::compression::SearchParams;

/// Split `input` into literal runs and matches.
///
/// At every position the longest match is looked up. Before a match is
/// committed, the next position is probed as well (up to
/// `params.lazy_steps` times); if it holds a strictly longer match, the current
/// byte becomes a literal and the longer match is taken instead.
///
/// The returned sequences cover the whole input, and the final one carries no
/// match.
pub(crate) fn parse(
    finder: &mut impl MatchFinder,
    input: &[u8],
    params: &SearchParams,
) -> Vec<Sequence> {
    let input_length = input.len();
    let mut sequences = vec![];

    if input_length < MIN_INPUT_LENGTH {
        sequences.push(Sequence::last(input_length));
        return sequences;
    }

    // matches end before the trailing literals and start before the match
    // start limit
    let match_limit = input_length - LAST_LITERALS;
    let start_limit = input_length - MF_LIMIT;

    let mut anchor = 0;
    let mut pos = 0;

    while pos <= start_limit {
        let Some(mut found) = finder.find_longest(pos, match_limit, params) else {
            pos += 1;
            continue;
        };

        let mut lazy_steps = params.lazy_steps;
        while lazy_steps > 0 && pos < start_limit {
            match finder.find_longest(pos + 1, match_limit, params) {
                Some(next) if next.length > found.length => {
                    pos += 1;
                    found = next;
                    lazy_steps -= 1;
                }
                _ => break,
            }
        }

        sequences.push(Sequence::new(
            pos - anchor,
            found.offset as u16,
            found.length,
        ));

        pos += found.length;
        anchor = pos;
    }

    sequences.push(Sequence::last(input_length - anchor));
    sequences
}

#[cfg(test)]
mod test {
    use proptest::collection::vec;
    use proptest::prelude::*;
    use test_strategy::proptest;

    use super::*;
    use crate::data::block::{MAX_DISTANCE, MIN_MATCH};
    use crate::data::compression::prefix_search::hash_chain::{ChainTables, HashChain};
    use crate::data::compression::prefix_search::reference::BruteForce;

    fn greedy() -> SearchParams {
        SearchParams {
            max_attempts: usize::MAX,
            sufficient_length: usize::MAX,
            lazy_steps: 0,
        }
    }

    fn lazy() -> SearchParams {
        SearchParams {
            lazy_steps: usize::MAX,
            ..greedy()
        }
    }

    fn parse_hash_chain(input: &[u8], params: &SearchParams) -> Vec<Sequence> {
        let mut tables = ChainTables::default();
        let mut finder = HashChain::new(input, &mut tables);
        parse(&mut finder, input, params)
    }

    /// rebuild the input from the sequences, checking every match along the way
    fn replay(input: &[u8], sequences: &[Sequence]) -> Vec<u8> {
        let mut out = Vec::with_capacity(input.len());
        for sequence in sequences {
            out.extend_from_slice(&input[out.len()..out.len() + sequence.literals]);
            if let Some(copy) = sequence.copy {
                let offset = copy.offset as usize;
                assert!(offset >= 1 && offset <= MAX_DISTANCE && offset <= out.len());
                assert!(copy.length >= MIN_MATCH);
                for _ in 0..copy.length {
                    out.push(out[out.len() - offset]);
                }
            }
        }
        out
    }

    #[test]
    fn short_input_is_literal_only() {
        let input = b"aaaaaaaaaaaa";
        assert_eq!(parse_hash_chain(input, &lazy()), vec![Sequence::last(12)]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(parse_hash_chain(&[], &lazy()), vec![Sequence::last(0)]);
    }

    #[test]
    fn run_becomes_one_match() {
        let input = [b'z'; 64];
        assert_eq!(
            parse_hash_chain(&input, &lazy()),
            vec![Sequence::new(1, 1, 64 - 1 - LAST_LITERALS), Sequence::last(5)]
        );
    }

    #[test]
    fn lazy_defers_to_longer_match() {
        // at `abcd` the chain finds a 4 byte match, one byte later a 10 byte one
        let input = b"Xbcdefghij_abcd-+abcdefghij_0123456789";
        let greedy_sequences = parse_hash_chain(input, &greedy());
        let lazy_sequences = parse_hash_chain(input, &lazy());

        assert_eq!(greedy_sequences[0], Sequence::new(17, 6, 4));
        assert_eq!(lazy_sequences[0], Sequence::new(18, 17, 10));
        assert_eq!(replay(input, &lazy_sequences), input.to_vec());
        assert_eq!(replay(input, &greedy_sequences), input.to_vec());
    }

    #[test]
    fn tail_is_always_literal() {
        let input = [0u8; 100];
        let sequences = parse_hash_chain(&input, &lazy());
        let last = sequences.last().unwrap();
        assert!(last.copy.is_none());
        assert!(last.literals >= LAST_LITERALS);
    }

    #[proptest]
    fn sequences_cover_input(
        #[strategy(vec(0..=3u8, 0..=3_000))] input: Vec<u8>,
        #[strategy(0..=4usize)] lazy_steps: usize,
        #[strategy(1..=64usize)] max_attempts: usize,
    ) {
        let params = SearchParams {
            max_attempts,
            sufficient_length: 32,
            lazy_steps,
        };
        let sequences = parse_hash_chain(&input, &params);

        let (last, rest) = sequences.split_last().unwrap();
        prop_assert!(last.copy.is_none());
        prop_assert!(rest.iter().all(|sequence| sequence.copy.is_some()));
        if input.len() >= MIN_INPUT_LENGTH {
            prop_assert!(last.literals >= LAST_LITERALS);
        }
        prop_assert_eq!(replay(&input, &sequences), input);
    }

    #[proptest]
    fn hash_chain_parse_matches_reference(
        #[strategy(vec(0..=3u8, 0..=500))] input: Vec<u8>,
        lazy_parse: bool,
    ) {
        let params = if lazy_parse { lazy() } else { greedy() };
        let mut reference = BruteForce { buffer: &input };

        prop_assert_eq!(
            parse_hash_chain(&input, &params),
            parse(&mut reference, &input, &params)
        );
    }
}
