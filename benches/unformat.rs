//! Benchmarks for template compilation and unformatting.
//!
//! Compares the regex and delimited strategies on short log-style lines and on
//! long inputs where the captured values contain many delimiter candidates.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use unformat_engine::{compile, CaptureMode, CompiledTemplate, Compiler, MatchStrategy, UnformatConfig};

const LOG_TEMPLATE: &str = "{0:yyyy/MM/dd HH:mm:ss} [{1,-5}] {2}: request {3} took {4:0.00}ms";

fn log_line(i: usize) -> String {
    format!(
        "2024/03/{:02} 12:{:02}:{:02} [INFO ] api-{}: request /v1/items/{} took {}.{:02}ms",
        i % 28 + 1,
        i % 60,
        (i * 7) % 60,
        i % 4,
        i,
        i % 500,
        i % 100
    )
}

fn config(strategy: MatchStrategy, capture: CaptureMode) -> UnformatConfig {
    UnformatConfig::new()
        .with_strategy(strategy)
        .with_capture_mode(capture)
}

/// Compile `source` and check that it recovers every sample before timing it.
fn prepared(config: UnformatConfig, source: &str, samples: &[&str]) -> anyhow::Result<CompiledTemplate> {
    let template = Compiler::with_config(config).compile(source)?;
    if let Some(miss) = samples.iter().find(|sample| template.unformat(**sample).is_none()) {
        anyhow::bail!("template {source:?} does not match sample {miss:?}");
    }
    Ok(template)
}

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");

    let wide: String = (0..100).map(|i| format!("field{i}={{{i}}}; ")).collect();
    for (name, template) in [("log_line", LOG_TEMPLATE.to_string()), ("wide_100", wide)] {
        for strategy in [MatchStrategy::Regex, MatchStrategy::Delimited] {
            let compiler = Compiler::with_config(config(strategy, CaptureMode::Greedy));
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), name),
                &template,
                |b, template| b.iter(|| compiler.compile(black_box(template)).unwrap()),
            );
        }
    }

    group.finish();
}

fn bench_unformat_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("unformat_line");
    let line = log_line(42);

    for strategy in [MatchStrategy::Regex, MatchStrategy::Delimited] {
        for capture in [CaptureMode::Greedy, CaptureMode::Lazy] {
            let template = prepared(config(strategy, capture), LOG_TEMPLATE, &[line.as_str()]).unwrap();
            group.bench_function(format!("{strategy:?}/{capture:?}"), |b| {
                b.iter(|| template.unformat(black_box(line.as_str())))
            });
        }
    }

    let template = compile(LOG_TEMPLATE).unwrap();
    group.bench_function("no_match", |b| {
        b.iter(|| template.unformat(black_box("GET /health 200")))
    });

    group.finish();
}

fn bench_long_values(c: &mut Criterion) {
    let mut group = c.benchmark_group("long_values");

    for size in [1_000, 10_000, 100_000] {
        let input = format!("{}end, tail", "x, ".repeat(size / 3));
        group.throughput(Throughput::Bytes(input.len() as u64));

        for strategy in [MatchStrategy::Regex, MatchStrategy::Delimited] {
            let template =
                prepared(config(strategy, CaptureMode::Greedy), "{0}, {1}", &[input.as_str()]).unwrap();
            group.bench_with_input(
                BenchmarkId::new(format!("{strategy:?}"), size),
                &input,
                |b, input| b.iter(|| template.unformat(black_box(input.as_str()))),
            );
        }
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let lines: Vec<String> = (0..10_000).map(log_line).collect();
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    group.throughput(Throughput::Elements(refs.len() as u64));

    for parallel in [false, true] {
        let config = UnformatConfig::linear_time().with_parallel(parallel);
        let template = prepared(config, LOG_TEMPLATE, &refs).unwrap();
        let name = if parallel { "rayon" } else { "sequential" };
        group.bench_function(name, |b| b.iter(|| template.unformat_batch(black_box(&refs))));
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_compile,
    bench_unformat_line,
    bench_long_values,
    bench_batch
);
criterion_main!(benches);
