//! Shared use across threads, large batches and large inputs.

use std::sync::Arc;
use std::thread;
use unformat_engine::{compile, CaptureMode, Compiler, MatchStrategy, UnformatConfig};

#[test]
fn test_shared_template_across_threads() {
    let template = Arc::new(compile("user={0} id={1,5}").unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let template = Arc::clone(&template);
            thread::spawn(move || {
                for i in 0..500 {
                    let input = format!("user=w{worker}-{i} id={i:>5}");
                    let result = template.unformat(input.as_str()).unwrap();
                    assert_eq!(result.first(0).unwrap().value, format!("w{worker}-{i}"));
                    assert_eq!(result.first(1).unwrap().value.trim(), i.to_string());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

#[test]
fn test_large_parallel_batch_matches_sequential() {
    let inputs: Vec<String> = (0..5_000)
        .map(|i| {
            if i % 7 == 0 {
                format!("broken {i}")
            } else {
                format!("[{i}] item {}", i * 3)
            }
        })
        .collect();
    let refs: Vec<&str> = inputs.iter().map(String::as_str).collect();

    let parallel = compile("[{0}] item {1}").unwrap();
    let sequential =
        Compiler::with_config(UnformatConfig::new().with_parallel(false)).compile("[{0}] item {1}").unwrap();

    let a = parallel.unformat_batch(&refs);
    let b = sequential.unformat_batch(&refs);
    assert_eq!(a.len(), inputs.len());
    assert_eq!(a, b);
    assert_eq!(a.iter().filter(|r| r.is_none()).count(), (0..5_000).filter(|i| i % 7 == 0).count());
    assert_eq!(a[1].as_ref().unwrap().first(1).unwrap().value, "3");
}

#[test]
fn test_large_input_with_many_delimiters() {
    let value = "x, ".repeat(20_000);
    let input = format!("{value}end, tail");

    for strategy in [MatchStrategy::Regex, MatchStrategy::Delimited] {
        for capture in [CaptureMode::Greedy, CaptureMode::Lazy] {
            let config = UnformatConfig::new()
                .with_strategy(strategy)
                .with_capture_mode(capture);
            let template = Compiler::with_config(config).compile("{0}, {1}").unwrap();
            let result = template.unformat(input.as_str()).unwrap();

            let (first, second) = match capture {
                CaptureMode::Greedy => (format!("{value}end"), "tail".to_string()),
                CaptureMode::Lazy => ("x".to_string(), input["x, ".len()..].to_string()),
            };
            assert_eq!(result.first(0).unwrap().value, first, "{strategy:?} {capture:?}");
            assert_eq!(result.first(1).unwrap().value, second, "{strategy:?} {capture:?}");
        }
    }
}

#[test]
fn test_many_placeholders() {
    let source: String = (0..200).map(|i| format!("<{i}>{{{i}}}")).collect();
    let input: String = (0..200).map(|i| format!("<{i}>v{i}")).collect();

    for config in [UnformatConfig::new(), UnformatConfig::linear_time()] {
        let template = Compiler::with_config(config).compile(&source).unwrap();
        let result = template.unformat(input.as_str()).unwrap();
        assert_eq!(result.len(), 200);
        for i in 0..200 {
            assert_eq!(result.first(i).unwrap().value, format!("v{i}"));
        }
    }
}
