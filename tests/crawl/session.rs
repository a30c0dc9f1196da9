//! Crawling through Session, then querying what was crawled.

use std::sync::Arc;

use stemdex::{Session, SessionConfig};

use crate::common::{chain_url, MapFetcher};

#[test]
fn test_crawl_then_rank() {
    let mut session = Session::new(SessionConfig::concurrent(3)).unwrap();
    session
        .crawl_with(&chain_url(0), Arc::new(MapFetcher::chain(3)))
        .unwrap();

    let results = session.search(&["Running!"], false);
    assert_eq!(results.len(), 1);
    let (key, ranked) = &results[0];
    assert_eq!(key, "run");

    let order: Vec<&str> = ranked.iter().map(|r| r.location.as_str()).collect();
    // p2 has five words, the others six.
    assert_eq!(order, vec![chain_url(2), chain_url(0), chain_url(1)]);
    assert!(ranked.iter().all(|r| r.count == 1));
}

#[test]
fn test_serial_session_switches_to_concurrent_for_crawl() {
    let mut session = Session::new(SessionConfig::default().with_limit(2)).unwrap();
    assert!(!session.is_concurrent());

    session
        .crawl_with(&chain_url(0), Arc::new(MapFetcher::chain(5)))
        .unwrap();
    assert!(session.is_concurrent());
    assert_eq!(session.visited().len(), 2);
}

#[test]
fn test_second_crawl_reuses_index_and_frontier() {
    let fetcher = Arc::new(MapFetcher::chain(10));
    let mut session = Session::new(SessionConfig::concurrent(2).with_limit(2)).unwrap();
    session.crawl_with(&chain_url(0), fetcher.clone()).unwrap();
    session.crawl_with(&chain_url(5), fetcher).unwrap();

    let visited: Vec<String> = session
        .visited()
        .iter()
        .map(|url| url.as_str().to_string())
        .collect();
    let mut expected = vec![chain_url(0), chain_url(1)];
    expected.extend((5..10).map(chain_url));
    assert_eq!(visited, expected);

    let snapshot = session.snapshot();
    assert_eq!(snapshot.counts.len(), 7);
}

#[test]
fn test_snapshot_serializes_urls_as_locations() {
    let mut session = Session::new(SessionConfig::concurrent(2)).unwrap();
    session
        .crawl_with(&chain_url(0), Arc::new(MapFetcher::chain(2)))
        .unwrap();
    session.search(&["chain"], true);

    let json = serde_json::to_value(session.snapshot()).unwrap();
    assert_eq!(json["postings"]["chain"][chain_url(1)], serde_json::json!([1]));
    assert_eq!(json["counts"][chain_url(0)], 6);
    assert_eq!(json["results"]["chain"][0]["count"], 1);
}
