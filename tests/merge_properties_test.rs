use apicov::aggregation::{ApiCoverage, CallGraph, EntryCoverageAggregator, FullCoverageAggregator};
use apicov::report::{resolve_function, ReportCorpus};
use proptest::prelude::*;

fn block_text(name: &str, percent: f64, total: u64) -> String {
    format!("Function '{name}'\nLines executed:{percent:.2}% of {total}\n")
}

fn blocks() -> impl Strategy<Value = Vec<(f64, u64)>> {
    prop::collection::vec((0.0f64..150.0, 0u64..500), 1..12)
}

proptest! {
    #[test]
    fn covered_never_exceeds_total(blocks in blocks()) {
        let text: String = blocks.iter().map(|(p, t)| block_text("f", *p, *t)).collect();
        let corpus = ReportCorpus::from_text(&text, "Cannot");

        let record = resolve_function(&corpus, "f");
        prop_assert!(record.covered_lines() <= record.total_lines() as f64);
    }

    #[test]
    fn block_order_does_not_change_result(blocks in blocks()) {
        let forward: String = blocks.iter().map(|(p, t)| block_text("f", *p, *t)).collect();
        let backward: String = blocks.iter().rev().map(|(p, t)| block_text("f", *p, *t)).collect();

        let a = resolve_function(&ReportCorpus::from_text(&forward, "Cannot"), "f");
        let b = resolve_function(&ReportCorpus::from_text(&backward, "Cannot"), "f");
        prop_assert_eq!(a.total_lines(), b.total_lines());
        prop_assert_eq!(a.covered_lines(), b.covered_lines());
    }

    #[test]
    fn probe_merge_is_commutative(
        a in (0u64..1000, 0.0f64..1000.0),
        b in (0u64..1000, 0.0f64..1000.0),
    ) {
        let x = ApiCoverage::new("api", a.0, a.1.min(a.0 as f64));
        let y = ApiCoverage::new("api", b.0, b.1.min(b.0 as f64));

        let mut xy = x.clone();
        xy.merge(&y);
        let mut yx = y.clone();
        yx.merge(&x);
        prop_assert_eq!(xy, yx);
    }

    #[test]
    fn aggregation_is_idempotent(blocks in blocks()) {
        let text: String = blocks
            .iter()
            .enumerate()
            .map(|(i, (p, t))| block_text(&format!("fn_{}", i % 3), *p, *t))
            .collect();
        let apis: Vec<String> = (0..3).map(|i| format!("fn_{i}")).collect();
        let graph: CallGraph = [("fn_0", "fn_1"), ("fn_1", "fn_2")].into_iter().collect();

        let first = ReportCorpus::from_text(&text, "Cannot");
        let second = ReportCorpus::from_text(&text, "Cannot");

        prop_assert_eq!(
            EntryCoverageAggregator::new(&first).aggregate(&apis),
            EntryCoverageAggregator::new(&second).aggregate(&apis)
        );
        prop_assert_eq!(
            FullCoverageAggregator::new(&first, &graph).aggregate(&apis),
            FullCoverageAggregator::new(&second, &graph).aggregate(&apis)
        );
    }
}
