use criterion::{black_box, criterion_group, criterion_main, Criterion};
use safecalc_rs::ast::Parser;
use safecalc_rs::{evaluate_expression, Calculator};

/// Benchmark simple arithmetic expressions
fn benchmark_simple_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Simple arithmetic Expression Evaluation");

    let calculator = Calculator::new();
    let expr = "2 + 3 * 4";

    group.bench_function("parse_arithmetic", |b| {
        b.iter(|| Parser::parse_expression(black_box(expr)).unwrap())
    });

    group.bench_function("pipeline_arithmetic", |b| {
        b.iter(|| evaluate_expression(black_box(expr), calculator.evaluator()).unwrap())
    });

    group.bench_function("native_rust_arithmetic", |b| {
        b.iter(|| black_box(2.0 + 3.0 * 4.0))
    });
}

/// Benchmark complex arithmetic expressions
fn benchmark_complex_arithmetic(c: &mut Criterion) {
    let mut group = c.benchmark_group("Complex arithmetic Expression Evaluation");

    let calculator = Calculator::new();
    let expr = "(10 + 20) * 3 / (4 - 1) + sqrt(25) ** 2 % 7";

    group.bench_function("pipeline_complex_arithmetic", |b| {
        b.iter(|| evaluate_expression(black_box(expr), calculator.evaluator()).unwrap())
    });

    group.bench_function("native_rust_complex_arithmetic", |b| {
        b.iter(|| black_box((10.0 + 20.0) * 3.0 / (4.0 - 1.0) + 25.0f64.sqrt().powf(2.0) % 7.0))
    });
}

/// Benchmark the linear equation solver
fn benchmark_equation_solving(c: &mut Criterion) {
    let mut group = c.benchmark_group("Linear Equation Solving");

    let calculator = Calculator::new();

    group.bench_function("solve_linear_equation", |b| {
        b.iter(|| calculator.run(black_box("2x + 3 = 7"), "x").unwrap())
    });
}

/// Benchmark batch evaluation
fn benchmark_batch_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Batch Evaluation");

    let calculator = Calculator::new();
    let input = "2 + 3; sqrt(16); 10 % 3; mean([1, 2, 3, 4]); 2 ** 10";

    group.bench_function("batch_of_five", |b| {
        b.iter(|| calculator.run(black_box(input), "x").unwrap())
    });
}

/// Grouping benchmarks
criterion_group!(
    benches,
    benchmark_simple_arithmetic,
    benchmark_complex_arithmetic,
    benchmark_equation_solving,
    benchmark_batch_evaluation,
);
criterion_main!(benches);
