//! Modules that work by parsing forum pages into sparse records.
//! # Extractors
//!
//! Each extractor takes the HTML of one page and projects the fragments it knows about into the
//! [models](crate::forum::models). Parsing is a pure function of the document: the same page always gives the
//! same records, and nothing is kept between calls except the [`ForumConfig`](crate::ForumConfig) the
//! extractor was built with.
//!
//! ## Example with the thread extractor
//! ```rust,no_run
//! use forum_parser::*;
//!
//! fn run() -> Result<(), ExtractorError> {
//!     let config = ForumConfig::default();
//!     let fetcher = HttpFetcher::new(&config)?;
//!
//!     let url = config.thread_url("69626", 20).unwrap();
//!     let thread = ThreadExtractor::new(&config).fetch_and_extract(&fetcher, &url)?;
//!
//!     println!("{} ({}/{})", thread.thread_title, thread.pagination.curr_page, thread.pagination.max_pages);
//!     Ok(())
//! }
//! ```
use log::debug;

use super::error::ExtractorError;
use super::fetch::DocumentFetcher;

mod common;
pub mod fields;
pub mod listing;
pub mod markup;
pub mod post;
pub mod thread;

/// The only common interface all page extractors expose.
pub trait Extractor {
    type Output;

    /// Parses an already fetched document.
    fn extract(&self, html: &str) -> Result<Self::Output, ExtractorError>;

    /// Fetches `url` with the given fetcher and parses the result.
    fn fetch_and_extract<F>(&self, fetcher: &F, url: &str) -> Result<Self::Output, ExtractorError>
    where
        F: DocumentFetcher + ?Sized,
    {
        let html = fetcher.fetch(url)?;
        debug!("Parsing document of {} bytes", html.len());
        self.extract(&html)
    }
}
