// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Terminal summaries for the stemdex CLI.
//!
//! A boxed report after each run: what was indexed, how long it took, and the
//! top hits per query. Colors only when stdout is a TTY and `NO_COLOR` is unset,
//! so piping the output gives plain text.

use std::time::Duration;

use stemdex::SearchResult;

/// Width between the vertical borders.
pub const BOX_WIDTH: usize = 72;

/// Hits listed per query in the summary.
pub const TOP_HITS: usize = 3;

pub mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GRAY: &str = "\x1b[90m";
}

pub use colors::*;

/// Check if colors should be used (TTY detection)
pub fn use_colors() -> bool {
    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }
    atty::is(atty::Stream::Stdout)
}

/// Apply styles if colors are on, otherwise return plain text
pub fn styled(styles: &[&str], text: &str) -> String {
    if use_colors() {
        format!("{}{}{}", styles.join(""), text, RESET)
    } else {
        text.to_string()
    }
}

/// Visible length, skipping ANSI escape sequences.
pub fn visible_len(s: &str) -> usize {
    let mut in_escape = false;
    let mut len = 0;
    for c in s.chars() {
        if c == '\x1b' {
            in_escape = true;
        } else if in_escape && c == 'm' {
            in_escape = false;
        } else if !in_escape {
            len += 1;
        }
    }
    len
}

fn border(text: &str) -> String {
    styled(&[GRAY], text)
}

/// ┌─ LABEL ─────┐
pub fn section_top(label: &str) {
    let label_part = format!("─ {} ", styled(&[BOLD, CYAN], label));
    let remaining = BOX_WIDTH.saturating_sub(visible_len(&label_part));
    println!(
        "{}{}{}",
        border("┌"),
        label_part,
        border(&format!("{}┐", "─".repeat(remaining)))
    );
}

/// │ content     │
pub fn row(content: &str) {
    let pad = BOX_WIDTH.saturating_sub(visible_len(content) + 1);
    println!("{} {}{}{}", border("│"), content, " ".repeat(pad), border("│"));
}

/// └─────────────┘
pub fn section_bot() {
    println!("{}", border(&format!("└{}┘", "─".repeat(BOX_WIDTH))));
}

/// Human-readable duration: µs, ms or s.
pub fn format_duration(elapsed: Duration) -> String {
    let micros = elapsed.as_micros();
    if micros < 1_000 {
        format!("{micros}µs")
    } else if micros < 1_000_000 {
        format!("{:.1}ms", micros as f64 / 1_000.0)
    } else {
        format!("{:.2}s", elapsed.as_secs_f64())
    }
}

/// Shorten `text` to `max` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{kept}…")
}

/// What one build or crawl produced.
#[derive(Debug, Default)]
pub struct BuildSummary<'a> {
    pub source: &'a str,
    pub mode: &'a str,
    pub locations: usize,
    pub stems: usize,
    pub elapsed: Duration,
}

pub fn print_build_summary(summary: &BuildSummary<'_>) {
    section_top("INDEX");
    row(&format!("{:<10}{}", "source", truncate(summary.source, BOX_WIDTH - 12)));
    row(&format!("{:<10}{}", "mode", summary.mode));
    row(&format!(
        "{:<10}{} locations │ {} stems",
        "built",
        styled(&[GREEN], &summary.locations.to_string()),
        styled(&[GREEN], &summary.stems.to_string())
    ));
    row(&format!("{:<10}{}", "time", format_duration(summary.elapsed)));
    section_bot();
}

pub fn print_search_summary(results: &[(String, Vec<SearchResult>)], elapsed: Duration) {
    section_top("QUERIES");
    if results.is_empty() {
        row(&styled(&[DIM], "no queries with stems"));
    }
    for (query, hits) in results {
        row(&format!(
            "{} {}",
            styled(&[BOLD], &truncate(query, 40)),
            styled(&[DIM], &format!("({} hits)", hits.len()))
        ));
        for hit in hits.iter().take(TOP_HITS) {
            let location = truncate(&hit.location, BOX_WIDTH - 24);
            row(&format!(
                "  {} {:>4} {}",
                styled(&[YELLOW], &format!("{:.6}", hit.score)),
                hit.count,
                location
            ));
        }
    }
    row(&styled(&[DIM], &format!("evaluated in {}", format_duration(elapsed))));
    section_bot();
}
