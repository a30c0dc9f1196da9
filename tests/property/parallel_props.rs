//! Serial and work-queue runs agree.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use proptest::prelude::*;
use stemdex::build::{build_index, build_index_parallel};
use stemdex::{Index, WorkQueue};
use tempfile::TempDir;

use crate::common::{triples, write};

fn corpus_strategy() -> impl Strategy<Value = Vec<String>> {
    let word = prop::sample::select(vec![
        "alpha", "beta", "gamma", "running", "runner", "runs", "lock", "locks", "queue",
    ]);
    let doc = prop::collection::vec(word, 0..25).prop_map(|words| words.join(" "));
    prop::collection::vec(doc, 1..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Property: the parallel builder produces the serial index.
    #[test]
    fn prop_parallel_build_equals_serial(docs in corpus_strategy(), threads in 1usize..6) {
        let dir = TempDir::new().unwrap();
        for (n, body) in docs.iter().enumerate() {
            write(dir.path(), &format!("d{}/doc{n}.txt", n % 3), body);
        }

        let serial = build_index(dir.path()).unwrap();
        let queue = WorkQueue::new(threads).unwrap();
        let parallel = build_index_parallel(&queue, dir.path()).unwrap();

        prop_assert_eq!(triples(&*parallel), triples(&serial));
        prop_assert_eq!(parallel.snapshot().counts, serial.snapshot().counts);
    }

    /// Property: every submitted task, direct or nested, runs exactly once
    /// before finish returns.
    #[test]
    fn prop_finish_accounts_for_nested_tasks(fan_out in prop::collection::vec(0usize..5, 1..30), threads in 1usize..5) {
        let queue = WorkQueue::new(threads).unwrap();
        let ran = Arc::new(AtomicUsize::new(0));
        for &children in &fan_out {
            let ran = Arc::clone(&ran);
            let spawner = queue.spawner();
            queue.submit(move || {
                ran.fetch_add(1, Ordering::SeqCst);
                for _ in 0..children {
                    let ran = Arc::clone(&ran);
                    spawner.submit(move || {
                        ran.fetch_add(1, Ordering::SeqCst);
                        Ok(())
                    })?;
                }
                Ok(())
            }).unwrap();
        }
        queue.finish();

        let expected = fan_out.len() + fan_out.iter().sum::<usize>();
        prop_assert_eq!(ran.load(Ordering::SeqCst), expected);
        prop_assert_eq!(queue.pending(), 0);
    }
}
