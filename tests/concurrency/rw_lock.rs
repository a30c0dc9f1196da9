//! ReadWriteLock under contention.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Barrier};
use std::thread;
use std::time::Duration;

use stemdex::ReadWriteLock;

#[test]
fn test_readers_overlap() {
    let lock = Arc::new(ReadWriteLock::new(0));
    let readers = 4;
    let barrier = Arc::new(Barrier::new(readers));
    let peak = Arc::new(AtomicUsize::new(0));

    let handles: Vec<_> = (0..readers)
        .map(|_| {
            let lock = Arc::clone(&lock);
            let barrier = Arc::clone(&barrier);
            let peak = Arc::clone(&peak);
            thread::spawn(move || {
                let guard = lock.read();
                // All readers hold the lock at the same time here.
                barrier.wait();
                peak.fetch_max(lock.readers(), Ordering::SeqCst);
                barrier.wait();
                drop(guard);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(peak.load(Ordering::SeqCst), readers);
    assert_eq!(lock.readers(), 0);
}

#[test]
fn test_readers_never_see_a_half_written_value() {
    let lock = Arc::new(ReadWriteLock::new((0u64, 0u64)));

    let writer = {
        let lock = Arc::clone(&lock);
        thread::spawn(move || {
            for i in 1..=500u64 {
                let mut pair = lock.write();
                pair.0 = i;
                thread::yield_now();
                pair.1 = i;
            }
        })
    };

    let readers: Vec<_> = (0..3)
        .map(|_| {
            let lock = Arc::clone(&lock);
            thread::spawn(move || {
                for _ in 0..1_000 {
                    {
                        let pair = lock.read();
                        assert_eq!(pair.0, pair.1);
                    }
                    thread::yield_now();
                }
            })
        })
        .collect();

    for reader in readers {
        reader.join().unwrap();
    }
    writer.join().unwrap();
    assert_eq!(*lock.read(), (500, 500));
    assert!(!lock.is_write_locked());
}

#[test]
fn test_writer_blocks_new_readers_until_done() {
    let lock = Arc::new(ReadWriteLock::new(String::new()));
    let guard = lock.write();

    let reader = {
        let lock = Arc::clone(&lock);
        thread::spawn(move || lock.read().clone())
    };
    thread::sleep(Duration::from_millis(30));
    assert!(!reader.is_finished());

    let mut guard = guard;
    guard.push_str("written");
    drop(guard);
    assert_eq!(reader.join().unwrap(), "written");
}
