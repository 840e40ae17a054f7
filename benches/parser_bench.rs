//! Parser benchmarks.
//!
//! Covers full parses of typical code, parses of pre-scanned tokens, and
//! scaling with statement count and nesting depth.

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kestrel::{ParserOptions, parse, parse_tokens, tokenize};

/// Typical application code.
const APP_CODE: &str = r#"
import { readFile } from "fs/promises";

export class Cache {
    #entries = new Map();
    static #instances = 0;

    constructor(limit = 100) {
        this.limit = limit;
        Cache.#instances++;
    }

    get size() { return this.#entries.size; }

    async load(path, { encoding = "utf8", ...rest } = {}) {
        const hit = this.#entries.get(path);
        if (hit !== undefined) return hit;
        try {
            const text = await readFile(path, { encoding, ...rest });
            this.#entries.set(path, text);
            return text;
        } catch (err) {
            console.error(`failed to load ${path}: ${err?.message ?? err}`);
            throw err;
        } finally {
            this.trim();
        }
    }

    trim() {
        for (const [key] of this.#entries) {
            if (this.#entries.size <= this.limit) break;
            this.#entries.delete(key);
        }
    }
}

export default function* range(start, end, step = 1) {
    for (let i = start; i < end; i += step) yield i;
}

export const compose = (...fns) => (x) => fns.reduceRight((acc, f) => f(acc), x);
"#;

/// Operator-dense expressions.
const EXPRESSION_CODE: &str = r#"
x = a + b * c - d / e % f ** g;
y = a && b || c ?? d;
z = (a, b) => a > b ? a : b;
w = obj?.deep?.[key]?.(arg) ?? fallback;
v = [1, [2, [3, [4]]], { a: { b: { c: 1 } } }];
"#;

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for (name, source) in [("app", APP_CODE), ("expressions", EXPRESSION_CODE)] {
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::new("module", name), source, |b, source| {
            b.iter(|| black_box(parse(black_box(source), ParserOptions::module())))
        });
    }

    group.finish();
}

fn bench_parse_tokens_only(c: &mut Criterion) {
    let (tokens, _) = tokenize(APP_CODE);
    c.bench_function("parse_pre_scanned_tokens", |b| {
        b.iter(|| {
            black_box(parse_tokens(
                "bench.js",
                tokens.clone(),
                ParserOptions::module(),
            ))
        })
    });
}

fn bench_error_recovery(c: &mut Criterion) {
    let broken = APP_CODE.replace(')', "").replace(';', ",");
    c.bench_function("parse_with_recovery", |b| {
        b.iter(|| black_box(parse(black_box(&broken), ParserOptions::module())))
    });
}

fn bench_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_scaling");

    for &statements in &[10, 100, 1000, 10_000] {
        let code = "total = total + value * 2;\n".repeat(statements);
        group.throughput(Throughput::Bytes(code.len() as u64));
        group.bench_with_input(BenchmarkId::new("statements", statements), &code, |b, code| {
            b.iter(|| black_box(parse(code, ParserOptions::default())))
        });
    }

    for &depth in &[1, 10, 50, 100] {
        let mut code = String::new();
        for _ in 0..depth {
            code.push_str("if (x) {\n");
        }
        code.push_str("x--;\n");
        for _ in 0..depth {
            code.push_str("}\n");
        }

        group.bench_with_input(BenchmarkId::new("nesting", depth), &code, |b, code| {
            b.iter(|| black_box(parse(code, ParserOptions::default())))
        });
    }

    group.finish();
}

criterion_group!(
    parser_benches,
    bench_parse,
    bench_parse_tokens_only,
    bench_error_recovery,
    bench_scaling
);
criterion_main!(parser_benches);
