// Copyright 2014-2017 The html5ever Project Developers. See the
// COPYRIGHT file at the top-level directory of this distribution.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Black-boxes every token, fed a realistic-sized input through
//! `criterion::BatchSize::SmallInput`, via repeated `read_token()`
//! calls since the Java tokenizer is pull-based.

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

use javafront::diagnostics::NullErrorSink;
use javafront::names::Names;
use javafront::token::TokenKind;
use javafront::tokenizer::{JavaTokenizer, JavaTokenizerOpts};

/// A small compilation unit repeated to a few kB. No on-disk fixture
/// corpus exists for this benchmark, so the input is synthesized
/// in-line instead of adding a data directory for one benchmark.
fn synthesize_source(target_len: usize) -> String {
    const UNIT: &str = r#"
package com.example.bench;

import java.util.List;
import java.util.Map;

/**
 * Example class used only to give the tokenizer benchmark realistic
 * input: identifiers, keywords, literals, comments and a javadoc
 * comment with a {@link java.util.List#add(Object)} reference.
 *
 * @param <T> the element type
 */
public class Example<T extends Comparable<T>> {
    private final List<T> items = new java.util.ArrayList<>();
    private static final int MAGIC = 0x1_F2_3A;
    private double ratio = 3.14159e-2;

    /**
     * @param value the value to add
     * @return true if added
     */
    public boolean add(T value) {
        if (value == null) {
            throw new NullPointerException("value");
        }
        return items.add(value);
    }
}
"#;
    let mut out = String::with_capacity(target_len + UNIT.len());
    while out.len() < target_len {
        out.push_str(UNIT);
    }
    out
}

fn run_bench(c: &mut Criterion, name: &str, target_len: usize) {
    let src = synthesize_source(target_len);
    c.bench_function(&format!("java tokenizing {name}"), move |b| {
        b.iter_batched(
            || src.clone(),
            |src| {
                let mut names = Names::new();
                let mut sink = NullErrorSink;
                let mut tz =
                    JavaTokenizer::new(&src, &mut names, &mut sink, JavaTokenizerOpts::default());
                loop {
                    let tok = tz.read_token();
                    let is_eof = tok.kind == TokenKind::Eof;
                    std::hint::black_box(&tok);
                    if is_eof {
                        break;
                    }
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn tokenizer_benchmark(c: &mut Criterion) {
    run_bench(c, "small-unit", 1024);
    run_bench(c, "medium-unit", 16 * 1024);
    run_bench(c, "large-unit", 256 * 1024);
}

criterion_group!(benches, tokenizer_benchmark);
criterion_main!(benches);
