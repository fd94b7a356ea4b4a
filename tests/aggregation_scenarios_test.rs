use apicov::aggregation::{CallGraph, EntryCoverageAggregator, FullCoverageAggregator};
use apicov::report::ReportCorpus;
use indoc::indoc;
use pretty_assertions::assert_eq;

fn names(apis: &[&str]) -> Vec<String> {
    apis.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_entry_coverage_with_duplicate_blocks() {
    let corpus = ReportCorpus::from_text(
        indoc! {"
            Function 'f'
            Lines executed:50.00% of 10
            Function 'f'
            Lines executed:80.00% of 20
        "},
        "Cannot",
    );

    let table = EntryCoverageAggregator::new(&corpus).aggregate(&names(&["f"]));
    let f = table.get("f").unwrap();
    assert_eq!(f.size, 20);
    assert_eq!(f.covered, 16.0);
    assert!(table.failed_apis().is_empty());
}

#[test]
fn test_macro_suffix_probe_resolves_wrapped_api() {
    let corpus = ReportCorpus::from_text(
        indoc! {"
            Function 'foo_REAL'
            Lines executed:100.00% of 30
        "},
        "Cannot",
    );

    let plain = EntryCoverageAggregator::new(&corpus).aggregate(&names(&["foo"]));
    assert_eq!(plain.failed_apis(), &["foo".to_string()]);

    let probed = EntryCoverageAggregator::new(&corpus)
        .with_macro_suffix(Some("_REAL".to_string()))
        .aggregate(&names(&["foo"]));
    let foo = probed.get("foo").unwrap();
    assert_eq!(foo.size, 30);
    assert_eq!(foo.covered, 30.0);
}

#[test]
fn test_full_coverage_of_thin_wrapper() {
    let corpus = ReportCorpus::from_text(
        indoc! {"
            Function 'g'
            Lines executed:0.00% of 0
            Function 'h'
            Lines executed:100.00% of 10
            Function 'i'
            Lines executed:0.00% of 5
        "},
        "Cannot",
    );
    let graph = CallGraph::from_json_str(r#"{"g": ["h", "i"]}"#).unwrap();

    let aggregator = FullCoverageAggregator::new(&corpus, &graph);
    let sums = aggregator.reachable_coverage("g");
    let mut reachable = sums.reachable.clone();
    reachable.sort();
    assert_eq!(reachable, names(&["g", "h", "i"]));

    let table = aggregator.aggregate(&names(&["g"]));
    let g = table.get("g").unwrap();
    assert_eq!(g.size, 15);
    assert_eq!(g.covered, 10.0);
    assert!((g.percentage() - 66.67).abs() < 0.01);
}

#[test]
fn test_corrupt_only_block_is_a_resolution_failure() {
    let corpus = ReportCorpus::from_text(
        indoc! {"
            Function 'broken'
            Lines executed:xx% of yy
        "},
        "Cannot",
    );

    let table = EntryCoverageAggregator::new(&corpus).aggregate(&names(&["broken"]));
    assert!(table.get("broken").is_none());
    assert!(!table.sizes().contains_key("broken"));
    assert_eq!(table.failed_apis(), &["broken".to_string()]);
}

#[test]
fn test_cyclic_graph_terminates_and_counts_once() {
    let corpus = ReportCorpus::from_text(
        indoc! {"
            Function 'A'
            Lines executed:50.00% of 10
            Function 'B'
            Lines executed:100.00% of 2
        "},
        "Cannot",
    );
    let graph = CallGraph::from_json_str(r#"{"A": ["B"], "B": ["A"]}"#).unwrap();

    let aggregator = FullCoverageAggregator::new(&corpus, &graph);
    assert_eq!(aggregator.reachable_coverage("A").reachable.len(), 2);

    let a = aggregator.api_coverage("A").unwrap();
    assert_eq!(a.size, 12);
    assert_eq!(a.covered, 7.0);
}

#[test]
fn test_absent_api_reports_zero_without_panicking() {
    let corpus = ReportCorpus::new();
    let graph = CallGraph::new();

    let aggregator = FullCoverageAggregator::new(&corpus, &graph);
    let sums = aggregator.reachable_coverage("nowhere");
    assert_eq!(sums.total, 0);
    assert_eq!(sums.covered, 0.0);

    let table = aggregator.aggregate(&names(&["nowhere"]));
    assert!(table.is_empty());
    assert_eq!(table.failed_apis(), &["nowhere".to_string()]);
}

#[test]
fn test_entry_and_full_agree_without_callees() {
    let corpus = ReportCorpus::from_text(
        indoc! {"
            Function 'leaf'
            Lines executed:40.00% of 5
        "},
        "Cannot",
    );
    let graph = CallGraph::new();
    let apis = names(&["leaf"]);

    let entry = EntryCoverageAggregator::new(&corpus).aggregate(&apis);
    let full = FullCoverageAggregator::new(&corpus, &graph).aggregate(&apis);
    assert_eq!(entry.get("leaf"), full.get("leaf"));
}
