// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Regex HTML cleaning.
//!
//! Not a parser. Pages are cleaned in stages:
//! 1. [`strip_block_elements`]: comments plus `head`, `style`, `script`,
//!    `noscript` and `svg` elements with everything inside them
//! 2. [`list_links`]: `href` values of the anchors that remain
//! 3. [`strip_tags`], then [`strip_entities`]: what is left is text
//!
//! Links are extracted after step 1 so anchors inside comments and scripts
//! are never followed.

use std::sync::LazyLock;

use regex::Regex;
use reqwest::Url;

static COMMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

static BLOCK_ELEMENTS: LazyLock<Regex> = LazyLock::new(|| {
    let alternatives: Vec<String> = ["head", "style", "script", "noscript", "svg"]
        .iter()
        .map(|name| format!(r"<{name}\b[^>]*>.*?</{name}\s*>"))
        .collect();
    Regex::new(&format!("(?is){}", alternatives.join("|"))).expect("block element pattern")
});

static TAGS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));

static ENTITIES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&[^\s&;]+;").expect("entity pattern"));

static ANCHOR_HREF: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?msi)<a\s*[^>]*?\s*href\s*=\s*"(.*?)""#).expect("anchor pattern")
});

/// Replace HTML comments with a space.
pub fn strip_comments(html: &str) -> String {
    COMMENTS.replace_all(html, " ").into_owned()
}

/// Remove comments and non-content elements along with their bodies.
pub fn strip_block_elements(html: &str) -> String {
    let html = strip_comments(html);
    BLOCK_ELEMENTS.replace_all(&html, " ").into_owned()
}

/// Replace every remaining tag with a space.
pub fn strip_tags(html: &str) -> String {
    TAGS.replace_all(html, " ").into_owned()
}

/// Drop character entities such as `&amp;` or `&#8212;`.
pub fn strip_entities(html: &str) -> String {
    ENTITIES.replace_all(html, "").into_owned()
}

/// Full cleaning pipeline: the visible text of a page.
pub fn strip_html(html: &str) -> String {
    strip_entities(&strip_tags(&strip_block_elements(html)))
}

/// Absolute http(s) links from anchor `href`s, in document order, fragments removed.
///
/// Relative links resolve against `base`. Links that fail to resolve or use
/// another scheme (`mailto:`, `javascript:`) are skipped. Duplicates are kept.
pub fn list_links(base: &Url, html: &str) -> Vec<Url> {
    ANCHOR_HREF
        .captures_iter(html)
        .filter_map(|caps| {
            let href = caps.get(1)?.as_str().trim();
            let mut url = base.join(href).ok()?;
            if !matches!(url.scheme(), "http" | "https") {
                return None;
            }
            url.set_fragment(None);
            Some(url)
        })
        .collect()
}
