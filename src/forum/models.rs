//! Records produced by the extractors.
//!
//! All of them follow the same sparse model: an optional field is `Some` only when its source fragment was
//! found on the page and yielded non-empty text. `None` fields are left out of the JSON output entirely,
//! they never show up as `null` or `""`.
use ahash::AHashSet;
use serde::{Deserialize, Serialize};

/// One entry of the recent topics listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Numeric looking id of the thread, taken from the `t` parameter of the title link
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_id: Option<String>,
    /// Author of the latest post
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// The whole "latest post by" line
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest_line: Option<String>,
    /// Line naming the subforum the thread lives in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_line: Option<String>,
    /// Kept as text as shown by the forum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub views: Option<String>,
    /// Kept as text as shown by the forum
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts: Option<String>,
}

/// A post as seen on a thread page, with its content cut down to a preview.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_counter: Option<String>,
    /// `"online"` if the author was online when the page was rendered
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_time: Option<String>,
    /// First [`PREVIEW_CHARS`](crate::forum::extractors::thread::PREVIEW_CHARS) characters of the content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_content: Option<String>,
}

/// Everything the forum shows about a single post and its author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostDetail {
    pub post_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    /// Rank name, taken from the title of the rank image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_title: Option<String>,
    /// Absolute URL of the rank image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_rank: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub registered: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub residence: Option<String>,
    /// Receiver models listed in the author's profile, in page order. Entries without text are skipped.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receivers: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub posts_counter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thx_given: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thx_received: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub online: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_content: Option<String>,
    /// "Last edited by ..." notice
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_line: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub curr_page: u32,
    pub max_pages: u32,
}

impl PaginationInfo {
    /// Pagination of a thread that fits on a single page.
    pub const fn single_page() -> Self {
        Self {
            curr_page: 1,
            max_pages: 1,
        }
    }
}

impl Default for PaginationInfo {
    fn default() -> Self {
        Self::single_page()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingResult {
    pub thread_title: String,
    /// Topic offset the listing was requested with
    pub curr_post: usize,
    pub threads: Vec<ThreadSummary>,
    pub users: AHashSet<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThreadResult {
    pub thread_title: String,
    #[serde(flatten)]
    pub pagination: PaginationInfo,
    pub posts: Vec<PostSummary>,
    pub user: AHashSet<String>,
}
