// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the stemdex command-line interface.
//!
//! Two subcommands share the same query and output flags: `index` builds from
//! a directory of text files, `crawl` builds from a seed URL. Output flags take
//! an optional file name; given bare, they write to the default file.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use stemdex::config::{
    DEFAULT_COUNTS_OUTPUT, DEFAULT_CRAWL_LIMIT, DEFAULT_INDEX_OUTPUT, DEFAULT_REDIRECTS,
    DEFAULT_RESULTS_OUTPUT, DEFAULT_THREADS,
};

#[derive(Parser)]
#[command(
    name = "stemdex",
    about = "Concurrent stemmed inverted index over text files and web crawls",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index every .txt/.text file under a path
    Index {
        /// Directory or single text file to index
        #[arg(short, long)]
        path: PathBuf,

        /// Build and search on a pool of worker threads
        ///
        /// Given without a value, or with a value below 1, uses the default
        /// pool size. Omit it to run everything on the main thread.
        #[arg(
            short,
            long,
            num_args = 0..=1,
            default_missing_value = "0",
            allow_negative_numbers = true,
            value_parser = parse_threads
        )]
        threads: Option<usize>,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Crawl from a seed URL and index the pages found
    Crawl {
        /// Absolute http(s) URL to start from
        #[arg(short, long)]
        url: String,

        /// Maximum number of pages to visit, seed included (below 1 uses the default)
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_CRAWL_LIMIT,
            allow_negative_numbers = true,
            value_parser = parse_limit
        )]
        limit: usize,

        /// Worker threads for fetching and searching (below 1 uses the default)
        #[arg(
            short,
            long,
            default_value_t = DEFAULT_THREADS,
            allow_negative_numbers = true,
            value_parser = parse_threads
        )]
        threads: usize,

        /// Redirects followed per page
        #[arg(long, default_value_t = DEFAULT_REDIRECTS)]
        redirects: usize,

        #[command(flatten)]
        query: QueryArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug, Default)]
pub struct QueryArgs {
    /// File of queries, one per line
    #[arg(short, long, value_name = "FILE")]
    pub query: Option<PathBuf>,

    /// Match whole stems only instead of stem prefixes
    #[arg(long)]
    pub exact: bool,
}

#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Write the inverted index as JSON
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_INDEX_OUTPUT)]
    pub index: Option<PathBuf>,

    /// Write per-location word counts as JSON
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_COUNTS_OUTPUT)]
    pub counts: Option<PathBuf>,

    /// Write ranked query results as JSON
    #[arg(long, value_name = "FILE", num_args = 0..=1, default_missing_value = DEFAULT_RESULTS_OUTPUT)]
    pub results: Option<PathBuf>,
}

/// Parse a count, replacing anything below 1 with `default`.
fn positive_or(arg: &str, default: usize) -> Result<usize, String> {
    let n: i64 = arg
        .parse()
        .map_err(|_| format!("`{arg}` is not a whole number"))?;
    Ok(usize::try_from(n).ok().filter(|&n| n > 0).unwrap_or(default))
}

fn parse_threads(arg: &str) -> Result<usize, String> {
    positive_or(arg, DEFAULT_THREADS)
}

fn parse_limit(arg: &str) -> Result<usize, String> {
    positive_or(arg, DEFAULT_CRAWL_LIMIT)
}
