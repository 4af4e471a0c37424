//! Command line interface of the `forumparser` binary.
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use clap::{ArgGroup, Parser};
use log::debug;
use serde::Serialize;
use thiserror::Error;

use crate::forum::error::ExtractorError;
use crate::forum::fetch::DocumentFetcher;
use crate::forum::models::{ListingResult, PostDetail, ThreadResult};
use crate::forum::{ForumConfig, LISTING_PAGE_SIZE, THREAD_PAGE_SIZE};
use crate::{Extractor, ListingExtractor, PostExtractor, ThreadExtractor};

#[allow(clippy::enum_variant_names)]
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{source}")]
    ExtractorFail {
        #[from]
        source: ExtractorError,
    },

    #[error("Failed to access file: {source}")]
    IOError {
        #[from]
        source: io::Error,
    },

    #[error("Failed to serialize the result: {source}")]
    JsonSerializeFail {
        #[from]
        source: serde_json::Error,
    },

    #[error("No page could be selected from the given arguments")]
    ImpossibleExecutionPath,
}

/// A thread id with the page of the thread to read, as given by `-t <id>[-<page>]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadArg {
    pub thread_id: String,
    pub page: usize,
}

impl ThreadArg {
    /// Post offset of the selected page.
    #[inline]
    pub const fn start(&self) -> usize {
        self.page.saturating_sub(1).saturating_mul(THREAD_PAGE_SIZE)
    }
}

/// What was asked for on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Latest(u32),
    Thread(ThreadArg),
    Post(String),
}

#[derive(Parser, Debug)]
#[clap(name = "forumparser", author, version, about, long_about = None)]
#[clap(group(
    ArgGroup::new("mode")
        .required(true)
        .args(&["latest", "thread", "post"]),
))]
pub struct Cli {
    /// Get the list of latest threads
    #[clap(
        short,
        long,
        value_name = "PAGE",
        value_parser(clap::value_parser!(u32).range(1..))
    )]
    pub latest: Option<u32>,

    /// Get the posts of a single thread page
    ///
    /// The page number is optional and starts at 1 (example: 69626-3)
    #[clap(short, long, value_name = "ID[-PAGE]", value_parser = parse_thread_arg)]
    pub thread: Option<ThreadArg>,

    /// Get a single post
    #[clap(short, long, value_name = "ID", value_parser = parse_post_id)]
    pub post: Option<String>,

    /// Write the result into a JSON file instead of printing it
    #[clap(short, long, value_name = "FILE", value_parser)]
    pub json: Option<PathBuf>,
}

impl Cli {
    pub fn mode(&self) -> Result<Mode, CliError> {
        if let Some(page) = self.latest {
            return Ok(Mode::Latest(page));
        }
        if let Some(thread) = &self.thread {
            return Ok(Mode::Thread(thread.clone()));
        }
        if let Some(post) = &self.post {
            return Ok(Mode::Post(post.clone()));
        }
        Err(CliError::ImpossibleExecutionPath)
    }
}

/// Result of one command, serialized as the bare record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParsedPage {
    Listing(ListingResult),
    Thread(ThreadResult),
    Post(PostDetail),
}

/// Fetches and parses the page selected by `mode`.
///
/// Returns `Ok(None)` only when a post was requested and the forum doesn't have it.
pub fn run<F>(
    mode: &Mode,
    config: &ForumConfig,
    fetcher: &F,
) -> Result<Option<ParsedPage>, CliError>
where
    F: DocumentFetcher + ?Sized,
{
    match mode {
        Mode::Latest(page) => {
            let start = (*page as usize)
                .saturating_sub(1)
                .saturating_mul(LISTING_PAGE_SIZE);
            let extractor = ListingExtractor::new(config, start);
            let listing = extractor.fetch_and_extract(fetcher, &extractor.url())?;
            Ok(Some(ParsedPage::Listing(listing)))
        }
        Mode::Thread(arg) => {
            let url = config
                .thread_url(&arg.thread_id, arg.start())
                .ok_or(CliError::ImpossibleExecutionPath)?;
            let thread = ThreadExtractor::new(config).fetch_and_extract(fetcher, &url)?;
            Ok(Some(ParsedPage::Thread(thread)))
        }
        Mode::Post(post_id) => {
            let extractor = PostExtractor::new(config, post_id);
            let url = extractor.url().ok_or(CliError::ImpossibleExecutionPath)?;
            let post = extractor.fetch_and_extract(fetcher, &url)?;
            Ok(post.map(ParsedPage::Post))
        }
    }
}

/// Writes the result as compact JSON into `path`, replacing the file if it exists.
pub fn write_json(page: &ParsedPage, path: &Path) -> Result<(), CliError> {
    debug!("Writing result to {}", path.display());

    let mut writer = BufWriter::new(File::create(path)?);
    serde_json::to_writer(&mut writer, page)?;
    writer.flush()?;

    Ok(())
}

#[inline]
pub fn to_pretty_json(page: &ParsedPage) -> Result<String, CliError> {
    Ok(serde_json::to_string_pretty(page)?)
}

fn parse_thread_arg(s: &str) -> Result<ThreadArg, String> {
    let s = s.trim();
    let (id, page) = match s.split_once('-') {
        Some((id, page)) => (id, Some(page)),
        None => (s, None),
    };

    if id.is_empty() || !id.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("'{}' is not a valid thread id", id));
    }

    let page = match page {
        None => 1,
        Some(p) => p
            .parse::<usize>()
            .map_err(|_| format!("Can't download page-no '{}'", p))?,
    };

    if page == 0 {
        return Err(String::from("Can't download page-no '0'"));
    }

    if (page - 1).checked_mul(THREAD_PAGE_SIZE).is_none() {
        return Err(format!("Page-no '{}' is out of range", page));
    }

    Ok(ThreadArg {
        thread_id: id.to_string(),
        page,
    })
}

fn parse_post_id(s: &str) -> Result<String, String> {
    let s = s.trim();
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_digit()) {
        return Err(format!("'{}' is not a valid post id", s));
    }
    Ok(s.to_string())
}
