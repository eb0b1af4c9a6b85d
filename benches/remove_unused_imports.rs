//! Benchmarks for the remove-unused-imports pipeline
//!
//! Measures parsing plus liveness analysis on generated modules with a
//! growing number of imports, half of which are unused.

use codemods::config::TransformOptions;
use codemods::syntax::{FileInfo, SourceParser};
use codemods::transforms::remove_unused_imports::{remove_unused_imports, LivenessOracle};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Generate a TSX module with `imports` named imports and code using every other one.
fn create_module(imports: usize) -> String {
    let mut source = String::from("// generated\nimport React from 'react';\n");
    for i in 0..imports {
        source.push_str(&format!("import {{ Item{i}, helper{i} }} from './item{i}';\n"));
    }

    source.push_str("\nexport function App(props: { items: number[] }) {\n  return (\n    <div>\n");
    for i in (0..imports).step_by(2) {
        source.push_str(&format!("      <Item{i} value={{helper{i}(props.items[{i}])}} />\n"));
    }
    source.push_str("    </div>\n  );\n}\n");
    source
}

/// Benchmark the full transform: parse, analyze, prune and print
fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("remove_unused_imports");
    let options = TransformOptions::default();

    for size in [10, 100, 500, 1000].iter() {
        let file = FileInfo::new("App.tsx", create_module(*size));
        let mut parser = SourceParser::new().unwrap();

        group.bench_with_input(BenchmarkId::new("imports", size), size, |b, _| {
            b.iter(|| {
                let tree = parser.parse(&file).unwrap();
                black_box(remove_unused_imports(&tree, &options).unwrap())
            });
        });
    }

    group.finish();
}

/// Benchmark building the liveness oracle on an already parsed tree
fn bench_liveness(c: &mut Criterion) {
    let mut group = c.benchmark_group("liveness_oracle");

    for size in [100, 1000].iter() {
        let file = FileInfo::new("App.tsx", create_module(*size));
        let mut parser = SourceParser::new().unwrap();
        let tree = parser.parse(&file).unwrap();

        group.bench_with_input(BenchmarkId::new("imports", size), &tree, |b, tree| {
            b.iter(|| black_box(LivenessOracle::new(tree)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_transform, bench_liveness);
criterion_main!(benches);
