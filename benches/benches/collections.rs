// Copyright 2026 the Trellis Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Micro-benchmarks for the hot collection paths: substring filtering,
//! enabled-aware traversal, roving navigation, and type-ahead matching over
//! large synthetic collections.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use trellis_core::option::{self, OptionItem};
use trellis_interaction_state::roving::{RovingEntry, RovingFocus, WrapMode};
use trellis_interaction_state::typeahead::Typeahead;

const N: usize = 10_000;

fn synthetic_options() -> Vec<OptionItem<usize>> {
    (0..N)
        .map(|i| {
            let item = OptionItem::new(i, format!("Item number {i}"));
            // Every seventh item disabled, like a realistically sparse list.
            if i % 7 == 0 { item.disabled() } else { item }
        })
        .collect()
}

fn bench_filter_substring(c: &mut Criterion) {
    let options = synthetic_options();
    c.bench_function("filter_substring/10k", |b| {
        b.iter(|| option::filter_substring(&options, "number 99"));
    });
}

fn bench_enabled_traversal(c: &mut Criterion) {
    let options = synthetic_options();
    c.bench_function("next_enabled_wrap/10k", |b| {
        b.iter(|| {
            let mut at = 0;
            for _ in 0..100 {
                at = option::next_enabled(&options, at, true).unwrap_or(0);
            }
            at
        });
    });
}

fn bench_roving_navigation(c: &mut Criterion) {
    let entries: Vec<RovingEntry<usize>> = (0..N)
        .map(|i| {
            let entry = RovingEntry::new(i);
            if i % 7 == 0 { entry.disabled() } else { entry }
        })
        .collect();
    c.bench_function("roving_move_next/10k", |b| {
        b.iter_batched(
            || RovingFocus::new(WrapMode::Wrap),
            |mut roving| {
                for _ in 0..100 {
                    roving.move_next(&entries);
                }
                roving.current()
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_typeahead(c: &mut Criterion) {
    let labels: Vec<String> = (0..N).map(|i| format!("Item number {i}")).collect();
    let labels: Vec<&str> = labels.iter().map(String::as_str).collect();
    c.bench_function("typeahead_find_match/10k", |b| {
        b.iter_batched(
            || {
                let mut typeahead = Typeahead::new();
                let mut at_ms = 0_u64;
                for ch in "item number 9".chars() {
                    typeahead.on_char(ch, at_ms);
                    at_ms += 10;
                }
                typeahead
            },
            |typeahead| typeahead.find_match(&labels, Some(N / 2)),
            BatchSize::SmallInput,
        );
    });
}

criterion_group!(
    benches,
    bench_filter_substring,
    bench_enabled_traversal,
    bench_roving_navigation,
    bench_typeahead
);
criterion_main!(benches);
