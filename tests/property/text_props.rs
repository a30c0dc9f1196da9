//! Cleaning and query canonicalization.

use proptest::prelude::*;
use stemdex::canonical_query;
use stemdex::text::{clean, list_stems, unique_stems};

fn text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9éüñÅ ,.!?'\\-]{0,60}").unwrap()
}

fn words_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop::sample::select(vec![
            "Running", "runs", "dog", "DOGS", "café", "lazy", "quick", "jumped", "naïve",
        ])
        .prop_map(str::to_string),
        1..8,
    )
}

proptest! {
    /// Property: cleaned text holds only lowercase letters and whitespace.
    #[test]
    fn prop_clean_keeps_letters_only(text in text_strategy()) {
        let cleaned = clean(&text);
        prop_assert!(cleaned
            .chars()
            .all(|c| c.is_whitespace() || (c.is_alphabetic() && !c.is_uppercase())));
    }

    /// Property: unique stems are exactly the distinct listed stems.
    #[test]
    fn prop_unique_stems_dedup_list(text in text_strategy()) {
        let listed = list_stems(&text);
        let unique = unique_stems(&text);
        prop_assert!(listed.iter().all(|stem| unique.contains(stem)));
        prop_assert!(unique.len() <= listed.len());
        prop_assert!(listed.iter().all(|stem| !stem.is_empty()));
    }

    /// Property: word order and repetition do not change the canonical key.
    #[test]
    fn prop_canonical_key_ignores_order(words in words_strategy()) {
        let forward = words.join(" ");
        let mut reversed = words.clone();
        reversed.reverse();
        reversed.extend(words.iter().cloned());
        let backward = reversed.join("  ");

        let a = canonical_query(&forward).unwrap();
        let b = canonical_query(&backward).unwrap();
        prop_assert_eq!(a.key(), b.key());

        let stems = a.stems();
        prop_assert!(stems.windows(2).all(|pair| pair[0] < pair[1]));
        prop_assert_eq!(a.key(), stems.join(" "));
    }
}
