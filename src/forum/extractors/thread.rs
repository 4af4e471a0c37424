//! Extractor for a single page of a thread.
//!
//! Besides the posts of the page, the thread title and the pagination state are read from the document.
//! Post contents are cut down to a preview of [`PREVIEW_CHARS`] characters, use the
//! [post extractor](super::post) to get everything about a post.
use ahash::AHashSet;
use log::debug;
use scraper::{ElementRef, Html};

use crate::forum::error::ExtractorError;
use crate::forum::models::{PaginationInfo, PostSummary, ThreadResult};
use crate::forum::ForumConfig;

use super::common::{self, owned_field, ProfileCounter};
use super::fields::{drop_last_chars, node_text, separated_text, take_chars};
use super::markup::{self, find, find_all};
use super::Extractor;

/// Suffix the forum appends to every page title.
pub const SITE_TITLE_SUFFIX: &str = " - openATV Forum";

/// Word in front of the page number in titles like `LCD4linux - Seite 150`.
pub const PAGE_MARKER: &str = "Seite";

/// Separator between the thread title and [`PAGE_MARKER`].
pub const PAGE_SEPARATOR: &str = " - ";

/// Characters between the end of the thread title and [`PAGE_MARKER`] (the [`PAGE_SEPARATOR`]).
pub const TITLE_BACKTRACK_CHARS: usize = 3;

/// Hard cutoff of the content preview. Not word-boundary aware.
pub const PREVIEW_CHARS: usize = 300;

pub struct ThreadExtractor<'a> {
    config: &'a ForumConfig,
}

impl<'a> ThreadExtractor<'a> {
    pub const fn new(config: &'a ForumConfig) -> Self {
        Self { config }
    }

    fn map_post(&self, container: ElementRef) -> Result<PostSummary, ExtractorError> {
        let profile = find(container, markup::post_profile);
        let body =
            find(container, markup::post_body).ok_or(ExtractorError::missing("post body"))?;
        let content =
            find(body, markup::post_content).ok_or(ExtractorError::missing("post content"))?;

        let preview = separated_text(content);

        Ok(PostSummary {
            post_id: common::post_id(container),
            user_name: profile.and_then(common::user_name),
            avatar_url: profile.and_then(|p| common::avatar_url(self.config, p)),
            posts_counter: profile
                .and_then(|p| common::profile_counter(p, ProfileCounter::Posts)),
            online: common::online_flag(container),
            post_number: common::post_number(body),
            post_time: common::post_time(body),
            short_content: owned_field(take_chars(&preview, PREVIEW_CHARS)),
        })
    }
}

impl Extractor for ThreadExtractor<'_> {
    type Output = ThreadResult;

    fn extract(&self, html: &str) -> Result<ThreadResult, ExtractorError> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        let title = find(root, markup::page_title).ok_or(ExtractorError::missing("page title"))?;
        let thread_title = thread_title(&node_text(title));
        let pagination = pagination(root);

        let mut posts = Vec::new();
        let mut user = AHashSet::new();

        for container in find_all(root, markup::post_container_with_background) {
            let post = self.map_post(container)?;

            if let Some(name) = &post.user_name {
                user.insert(name.clone());
            }
            posts.push(post);
        }

        debug!(
            "Page {}/{} of \"{}\": {} posts",
            pagination.curr_page,
            pagination.max_pages,
            thread_title,
            posts.len()
        );

        Ok(ThreadResult {
            thread_title,
            pagination,
            posts,
            user,
        })
    }
}

/// Thread title without the site suffix and the page number.
///
/// ```rust
/// use forum_parser::forum::extractors::thread::thread_title;
///
/// assert_eq!(thread_title("LCD4linux - Seite 150 - openATV Forum"), "LCD4linux");
/// assert_eq!(thread_title("LCD4linux - openATV Forum"), "LCD4linux");
/// ```
pub fn thread_title(page_title: &str) -> String {
    let title = page_title.replace(SITE_TITLE_SUFFIX, "");

    // Only a marker right after the separator is a page segment, "Seitenwechsel" is part of the title
    match title.rfind(PAGE_MARKER) {
        Some(pos) if title[..pos].ends_with(PAGE_SEPARATOR) => {
            drop_last_chars(&title[..pos], TITLE_BACKTRACK_CHARS).to_string()
        }
        _ => title,
    }
}

/// Reads the current page and the page count from the pagination bar.
///
/// Threads fitting on a single page have no active page marker at all.
pub fn pagination(root: ElementRef) -> PaginationInfo {
    let Some(active) = find(root, markup::active_page) else {
        return PaginationInfo::single_page();
    };

    let label = find(active, markup::span).unwrap_or(active);
    let curr_page = page_number(label).unwrap_or(1);

    // The last page is always rendered as a button, so the highest label is the page count
    let max_pages = find_all(root, markup::page_button)
        .filter_map(page_number)
        .max()
        .map_or(curr_page, |last| last.max(curr_page));

    PaginationInfo {
        curr_page,
        max_pages,
    }
}

fn page_number(el: ElementRef) -> Option<u32> {
    node_text(el)
        .trim()
        .parse::<u32>()
        .ok()
        .filter(|n| *n > 0)
}
