//! Serial index construction.

use super::common::{corpus, location};
use stemdex::build::build_index;
use stemdex::Index;

#[test]
fn test_word_counts_cover_every_token() {
    let dir = corpus();
    let index = build_index(dir.path()).unwrap();

    assert_eq!(index.word_count(&location(dir.path(), "animals.txt")), Some(13));
    assert_eq!(index.word_count(&location(dir.path(), "nested/running.txt")), Some(7));
    assert_eq!(index.word_count(&location(dir.path(), "nested/deeper/UPPER.TXT")), Some(4));
}

#[test]
fn test_files_without_words_get_no_count() {
    let dir = corpus();
    let index = build_index(dir.path()).unwrap();

    assert_eq!(index.word_count(&location(dir.path(), "empty.txt")), None);
    assert_eq!(index.word_count(&location(dir.path(), "numbers.txt")), None);
}

#[test]
fn test_positions_continue_across_lines() {
    let dir = corpus();
    let index = build_index(dir.path()).unwrap();
    let animals = location(dir.path(), "animals.txt");

    // Line one has nine words, so "dogs" on line two sits at position 10.
    assert!(index.contains_position("dog", &animals, 9));
    assert!(index.contains_position("dog", &animals, 10));
    assert!(index.contains_position("fox", &animals, 4));
    assert!(index.contains_position("fox", &animals, 12));
    assert_eq!(index.num_positions("the", &animals), 2);
}

#[test]
fn test_inflections_share_a_stem() {
    let dir = corpus();
    let index = build_index(dir.path()).unwrap();
    let running = location(dir.path(), "nested/running.txt");

    assert_eq!(index.num_positions("run", &running), 3);
    assert_eq!(index.num_positions("runner", &running), 2);
    assert!(!index.contains_stem("running"));
    assert!(!index.contains_stem("runners"));
}

#[test]
fn test_diacritics_are_stripped() {
    let dir = corpus();
    let index = build_index(dir.path()).unwrap();
    let cafe = location(dir.path(), "nested/deeper/cafe.text");

    assert_eq!(index.num_positions("cafe", &cafe), 2);
    assert!(index.contains_location("naiv", &cafe));
}

#[test]
fn test_non_text_files_are_ignored() {
    let dir = corpus();
    let index = build_index(dir.path()).unwrap();

    assert!(!index.contains_stem("markdown"));
    assert!(!index.contains_location("run", &location(dir.path(), "notes.md")));
}
