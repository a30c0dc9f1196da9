//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use stemdex::index::Index;
use stemdex::web::Url;
use stemdex::Fetcher;
use tempfile::TempDir;

// ============================================================================
// FILE FIXTURES
// ============================================================================

/// Files written by [`corpus`], relative to its root.
pub const CORPUS: &[(&str, &str)] = &[
    ("animals.txt", "The quick brown fox jumps over the lazy dog.\nDogs and foxes run."),
    ("nested/running.txt", "Running runners run; the runner is running!"),
    ("nested/deeper/cafe.text", "Café crème at the café. Naïve résumé."),
    ("nested/deeper/UPPER.TXT", "SHOUTING WORDS RUN LOUD"),
    ("empty.txt", ""),
    ("numbers.txt", "123 456 --- !!!"),
    ("notes.md", "markdown is not indexed run"),
    ("data.json", "{\"run\": true}"),
];

/// A temporary directory tree with text and non-text files.
pub fn corpus() -> TempDir {
    let dir = TempDir::new().unwrap();
    for (relative, body) in CORPUS {
        write(dir.path(), relative, body);
    }
    dir
}

/// A flat directory of `count` generated files sharing a vocabulary.
pub fn generated_corpus(count: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    let vocabulary = [
        "search", "engine", "index", "query", "runner", "running", "thread", "lock", "queue",
        "crawler", "stem", "word",
    ];
    for n in 0..count {
        let body: Vec<&str> = (0..40)
            .map(|i| vocabulary[(n * 7 + i * 3 + i / 5) % vocabulary.len()])
            .collect();
        write(dir.path(), &format!("doc{n:03}.txt"), &body.join(" "));
    }
    dir
}

pub fn write(root: &Path, relative: &str, body: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, body).unwrap();
    path
}

/// Location string the builders use for `relative` under `root`.
pub fn location(root: &Path, relative: &str) -> String {
    root.join(relative).to_string_lossy().into_owned()
}

pub fn words(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_string).collect()
}

/// Every (stem, location, position) triple in an index, sorted.
pub fn triples<I: Index>(index: &I) -> Vec<(String, String, usize)> {
    let snapshot = index.snapshot();
    let mut out = Vec::new();
    for stem in snapshot.postings.stems() {
        if let Some(locations) = snapshot.postings.locations(stem) {
            for (location, positions) in locations {
                for position in positions {
                    out.push((stem.to_string(), location.clone(), *position));
                }
            }
        }
    }
    out
}

// ============================================================================
// IN-MEMORY WEB
// ============================================================================

/// A fake web: URL string → HTML body. Anything else fails to fetch.
#[derive(Default)]
pub struct MapFetcher {
    pages: HashMap<String, String>,
}

impl MapFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    /// `count` pages where page `i` links to page `i + 1` and back to the root.
    pub fn chain(count: usize) -> Self {
        let mut fetcher = Self::new();
        for i in 0..count {
            let next = if i + 1 < count {
                format!(r#"<a href="/p{}.html">next</a>"#, i + 1)
            } else {
                String::new()
            };
            let html = format!(
                "<html><head><title>page {i}</title></head><body>\
                 <p>chain page number {i} running</p>{next}<a href=\"/p0.html#top\">home</a>\
                 </body></html>"
            );
            fetcher = fetcher.page(&chain_url(i), &html);
        }
        fetcher
    }

    /// A root page linking to `count` leaf pages, each linking to every other leaf.
    pub fn mesh(count: usize) -> Self {
        let links: String = (0..count)
            .map(|i| format!(r#"<a href="leaf{i}.html">leaf {i}</a> "#))
            .collect();
        let mut fetcher = Self::new().page(&mesh_url(None), &format!("<body>root {links}</body>"));
        for i in 0..count {
            fetcher = fetcher.page(
                &mesh_url(Some(i)),
                &format!("<body><h1>leaf {i}</h1> shared words {links}</body>"),
            );
        }
        fetcher
    }
}

impl Fetcher for MapFetcher {
    fn fetch(&self, url: &Url) -> Option<String> {
        self.pages.get(url.as_str()).cloned()
    }
}

pub fn chain_url(i: usize) -> String {
    format!("https://chain.test/p{i}.html")
}

pub fn mesh_url(leaf: Option<usize>) -> String {
    match leaf {
        Some(i) => format!("https://mesh.test/site/leaf{i}.html"),
        None => "https://mesh.test/site/index.html".to_string(),
    }
}
