//! # Forum Parser
//!
//! forum_parser turns pages of the openATV phpBB forum into plain records: the recent topics listing,
//! the posts of one thread page and the full detail of a single post.
//!
//! Every optional field of a record is left out when the page doesn't have it, so the JSON output only
//! carries what was actually found.
pub mod cli;
pub mod forum;

// Export the site description
pub use forum::ForumConfig;

pub use forum::error::ExtractorError;

// Export the fetchers
pub use forum::fetch::{DocumentFetcher, HttpFetcher};

// Export all extractor interfaces
pub use forum::extractors::listing::ListingExtractor;
pub use forum::extractors::post::PostExtractor;
pub use forum::extractors::thread::ThreadExtractor;
pub use forum::extractors::Extractor;

pub use forum::models::{
    ListingResult, PaginationInfo, PostDetail, PostSummary, ThreadResult, ThreadSummary,
};
