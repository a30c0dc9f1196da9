//! Query evaluation over a built corpus.

use std::sync::Arc;

use stemdex::build::build_index;
use stemdex::search::{evaluate_queries, evaluate_queries_parallel, read_query_file};
use stemdex::{canonical_query, ConcurrentIndex, Index, Session, SessionConfig, WorkQueue};

use crate::common::{corpus, location, write};

const QUERIES: &[&str] = &[
    "running",
    "",
    "Run runs RUN",
    "lazy dogs",
    "   ",
    "café",
    "quick brown",
    "123",
    "zebra",
    "dog lazy",
];

#[test]
fn test_partial_reaches_longer_stems() {
    let dir = corpus();
    let index = build_index(dir.path()).unwrap();
    let running = location(dir.path(), "nested/running.txt");

    let exact = index.exact_search(canonical_query("run").unwrap().stems());
    let partial = index.partial_search(canonical_query("run").unwrap().stems());

    let exact_running = exact.iter().find(|r| r.location == running).unwrap();
    let partial_running = partial.iter().find(|r| r.location == running).unwrap();
    // "run" x3 exactly; "runner" x2 only by prefix.
    assert_eq!(exact_running.count, 3);
    assert_eq!(partial_running.count, 5);
    assert_eq!(exact.len(), partial.len());
}

#[test]
fn test_keys_follow_line_order_and_skip_empty_lines() {
    let dir = corpus();
    let mut index = build_index(dir.path()).unwrap();
    let keys = evaluate_queries(&mut index, QUERIES, true);
    assert_eq!(
        keys,
        vec!["run", "run", "dog lazi", "cafe", "brown quick", "zebra", "dog lazi"]
    );
    assert_eq!(index.queries().len(), 5);
    assert_eq!(index.cached_results("zebra"), Some(Vec::new()));
}

#[test]
fn test_second_pass_is_a_cache_hit() {
    let dir = corpus();
    let mut index = build_index(dir.path()).unwrap();
    evaluate_queries(&mut index, QUERIES, false);
    let first = index.snapshot().results;

    // Exact mode now would give different "run" results, but the cache wins.
    evaluate_queries(&mut index, QUERIES, true);
    assert_eq!(index.snapshot().results, first);
}

#[test]
fn test_parallel_evaluation_matches_serial() {
    let dir = corpus();
    let mut serial = build_index(dir.path()).unwrap();
    evaluate_queries(&mut serial, QUERIES, false);

    let shared = Arc::new(ConcurrentIndex::from(build_index(dir.path()).unwrap()));
    let queue = WorkQueue::new(4).unwrap();
    let submitted = evaluate_queries_parallel(&queue, &shared, QUERIES, false).unwrap();

    assert_eq!(submitted, 8);
    assert_eq!(shared.snapshot().results, serial.snapshot().results);
}

#[test]
fn test_query_file_through_session() {
    let dir = corpus();
    let query_file = write(dir.path(), "queries/list.md", &QUERIES.join("\n"));
    assert_eq!(read_query_file(&query_file).unwrap().len(), QUERIES.len());

    let mut serial = Session::new(SessionConfig::default()).unwrap();
    serial.add_path(dir.path()).unwrap();
    let mut concurrent = Session::new(SessionConfig::concurrent(3)).unwrap();
    concurrent.add_path(dir.path()).unwrap();

    let from_serial = serial.search_file(&query_file, true).unwrap();
    let from_concurrent = concurrent.search_file(&query_file, true).unwrap();
    assert_eq!(from_serial, from_concurrent);

    let keys: Vec<&str> = from_serial.iter().map(|(key, _)| key.as_str()).collect();
    assert_eq!(keys, vec!["brown quick", "cafe", "dog lazi", "run", "zebra"]);

    let (_, cafe) = &from_serial[1];
    assert_eq!(cafe.len(), 1);
    assert_eq!(cafe[0].location, location(dir.path(), "nested/deeper/cafe.text"));
    assert_eq!(cafe[0].count, 2);
}

#[test]
fn test_missing_query_file_is_an_error() {
    let dir = corpus();
    let mut session = Session::new(SessionConfig::default()).unwrap();
    assert!(session.search_file(&dir.path().join("nope.txt"), false).is_err());
}
