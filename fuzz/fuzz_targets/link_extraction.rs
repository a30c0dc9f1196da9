// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for HTML cleaning and anchor extraction.
//!
//! Unterminated comments, nested script tags, hrefs full of garbage: none of
//! it should panic, and every link that comes out must be crawlable.

#![no_main]

use libfuzzer_sys::fuzz_target;
use stemdex::web::html::{list_links, strip_html};
use stemdex::web::Url;

fuzz_target!(|data: &[u8]| {
    let html = String::from_utf8_lossy(data);
    static BASE: std::sync::OnceLock<Url> = std::sync::OnceLock::new();
    let base = BASE.get_or_init(|| Url::parse("https://fuzz.test/dir/page.html").unwrap());

    for link in list_links(base, &html) {
        assert!(matches!(link.scheme(), "http" | "https"), "bad scheme: {link}");
        assert!(link.fragment().is_none(), "fragment kept: {link}");
    }

    let text = strip_html(&html);
    assert!(text.len() <= html.len());
});
