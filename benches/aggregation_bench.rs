use apicov::aggregation::{CallGraph, EntryCoverageAggregator, FullCoverageAggregator};
use apicov::report::ReportCorpus;
use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

const FUNCTIONS: usize = 2_000;

fn synthetic_corpus() -> ReportCorpus {
    let mut text = String::new();
    for i in 0..FUNCTIONS {
        text.push_str(&format!(
            "Function 'fn_{i}'\nLines executed:{}.00% of {}\n",
            i % 100,
            10 + i % 40
        ));
        if i % 10 == 0 {
            text.push_str(&format!("File 'src/file_{i}.c'\nLines executed:50.00% of 400\n"));
        }
    }
    ReportCorpus::from_text(&text, "Cannot")
}

fn synthetic_graph() -> CallGraph {
    let mut graph = CallGraph::new();
    for i in 0..FUNCTIONS {
        graph.add_call(format!("fn_{i}"), format!("fn_{}", (i * 7 + 1) % FUNCTIONS));
        graph.add_call(format!("fn_{i}"), format!("fn_{}", (i * 13 + 5) % FUNCTIONS));
    }
    graph
}

fn bench_aggregation(c: &mut Criterion) {
    let corpus = synthetic_corpus();
    let graph = synthetic_graph();
    let apis: Vec<String> = (0..FUNCTIONS).step_by(20).map(|i| format!("fn_{i}")).collect();

    c.bench_function("entry_aggregate", |b| {
        b.iter(|| black_box(EntryCoverageAggregator::new(&corpus).aggregate(&apis)))
    });

    c.bench_function("full_aggregate", |b| {
        b.iter(|| black_box(FullCoverageAggregator::new(&corpus, &graph).aggregate(&apis)))
    });
}

criterion_group!(benches, bench_aggregation);
criterion_main!(benches);
