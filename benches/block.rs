////////////////////////////////////////////////////////////////////////////////
// This Source Code Form is subject to the terms of the Mozilla Public         /
// License, v. 2.0. If a copy of the MPL was not distributed with this         /
// file, You can obtain one at https://mozilla.org/MPL/2.0/.                   /
//                                                                             /
////////////////////////////////////////////////////////////////////////////////

use std::io::Cursor;

use criterion::measurement::WallTime;
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lz4hc::data::block::{Sequence, MIN_MATCH};
use lz4hc::decompress;

const CONST_BENCH_LENGTH: usize = 8096;

/// 4 literal bytes, then `repeats` minimum length matches at `offset`
fn repeating_short_match_block(repeats: usize, offset: u16) -> (Vec<u8>, usize) {
    let mut writer = Cursor::new(vec![]);

    Sequence::new(4, offset, MIN_MATCH)
        .write(&[0; 4], &mut writer)
        .unwrap();
    for _ in 1..repeats {
        Sequence::new(0, offset, MIN_MATCH)
            .write(&[], &mut writer)
            .unwrap();
    }
    Sequence::last(0).write(&[], &mut writer).unwrap();

    (writer.into_inner(), 4 + repeats * MIN_MATCH)
}

fn repeating_short_match_bench(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("Repeating short match copy".to_string());

    for offset in [1, 4] {
        let (input, decompressed_len) = repeating_short_match_block(CONST_BENCH_LENGTH, offset);
        group.throughput(Throughput::Bytes(decompressed_len as u64));

        let mut output = vec![0; decompressed_len];
        group.bench_with_input(format!("decompress offset {offset}"), &input, |b, i| {
            b.iter(|| decompress(black_box(i), &mut output))
        });
    }

    group.finish();
}

fn long_literal_bench(c: &mut Criterion<WallTime>) {
    let mut group = c.benchmark_group("Single literal run".to_string());

    let literals = vec![0x5A; CONST_BENCH_LENGTH * 8];
    let mut writer = Cursor::new(vec![]);
    Sequence::last(literals.len())
        .write(&literals, &mut writer)
        .unwrap();
    let input = writer.into_inner();

    group.throughput(Throughput::Bytes(literals.len() as u64));

    let mut output = vec![0; literals.len()];
    group.bench_with_input("decompress", &input, |b, i| {
        b.iter(|| decompress(black_box(i), &mut output))
    });

    group.finish();
}

criterion_group!(
    name = benches;
    config = Criterion::default();
    targets = repeating_short_match_bench,
    long_literal_bench
);
criterion_main!(benches);
