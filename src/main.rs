// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use stemdex::{output, Session, SessionConfig};

mod cli;
use cli::display::{self, BuildSummary};
use cli::{Cli, Commands, OutputArgs, QueryArgs};

fn main() {
    init_tracing();

    let cli = Cli::parse();
    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        process::exit(1);
    }
}

/// Log to stderr, filtered by `RUST_LOG`, defaulting to `stemdex=info`.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("stemdex=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Index {
            path,
            threads,
            query,
            output,
        } => {
            let config = SessionConfig {
                threads,
                ..SessionConfig::default()
            };
            let started = Instant::now();
            let mut session = Session::new(config).context("failed to start session")?;
            let files = add_path(&mut session, &path)
                .with_context(|| format!("failed to index {}", path.display()))?;

            display::print_build_summary(&BuildSummary {
                source: &path.to_string_lossy(),
                mode: if session.is_concurrent() { "concurrent" } else { "serial" },
                locations: files,
                stems: session.num_stems(),
                elapsed: started.elapsed(),
            });
            finish(&mut session, &query, &output)
        }

        Commands::Crawl {
            url,
            limit,
            threads,
            redirects,
            query,
            output,
        } => {
            let config = SessionConfig::concurrent(threads)
                .with_limit(limit)
                .with_redirects(redirects);
            let started = Instant::now();
            let spinner = spinner(&format!("crawling {url}"));
            let mut session =
                Session::build(&url, config).with_context(|| format!("failed to crawl {url}"))?;
            finish_spinner(spinner);

            display::print_build_summary(&BuildSummary {
                source: &url,
                mode: "crawl",
                locations: session.visited().len(),
                stems: session.num_stems(),
                elapsed: started.elapsed(),
            });
            finish(&mut session, &query, &output)
        }
    }
}

/// Run queries, then write whichever outputs were asked for.
fn finish(session: &mut Session, query: &QueryArgs, outputs: &OutputArgs) -> Result<()> {
    if let Some(path) = &query.query {
        let started = Instant::now();
        let results = session
            .search_file(path, query.exact)
            .with_context(|| format!("failed to read queries from {}", path.display()))?;
        display::print_search_summary(&results, started.elapsed());
    }

    let snapshot = session.snapshot();
    if let Some(path) = &outputs.index {
        output::write_index(path, &snapshot.postings)?;
        eprintln!("✅ index written to {}", path.display());
    }
    if let Some(path) = &outputs.counts {
        output::write_counts(path, &snapshot.counts)?;
        eprintln!("✅ counts written to {}", path.display());
    }
    if let Some(path) = &outputs.results {
        output::write_results(path, &snapshot.results)?;
        eprintln!("✅ results written to {}", path.display());
    }
    Ok(())
}

#[cfg(feature = "progress")]
fn add_path(session: &mut Session, path: &Path) -> stemdex::Result<usize> {
    use indicatif::{ProgressBar, ProgressStyle};

    let progress = if atty::is(atty::Stream::Stderr) {
        ProgressBar::new(0)
    } else {
        ProgressBar::hidden()
    };
    if let Ok(style) = ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<10} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    ) {
        progress.set_style(style.progress_chars("━━╸"));
    }
    progress.set_prefix("Indexing");
    session.add_path_with_progress(path, &progress)
}

#[cfg(not(feature = "progress"))]
fn add_path(session: &mut Session, path: &Path) -> stemdex::Result<usize> {
    session.add_path(path)
}

#[cfg(feature = "progress")]
fn spinner(message: &str) -> indicatif::ProgressBar {
    let spinner = if atty::is(atty::Stream::Stderr) {
        indicatif::ProgressBar::new_spinner()
    } else {
        indicatif::ProgressBar::hidden()
    };
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));
    spinner
}

#[cfg(feature = "progress")]
fn finish_spinner(spinner: indicatif::ProgressBar) {
    spinner.finish_and_clear();
}

#[cfg(not(feature = "progress"))]
fn spinner(message: &str) {
    eprintln!("{message}...");
}

#[cfg(not(feature = "progress"))]
fn finish_spinner(_spinner: ()) {}
