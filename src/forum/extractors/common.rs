//! Fragments that look the same on every page showing posts.
use scraper::ElementRef;

use crate::forum::ForumConfig;

use super::fields::{text_field, TextSource};
use super::markup::{self, find, find_all};

/// Characters of the post wrapper id that are not part of the post id (`p123` or `profile123`).
const POST_ID_MARKER: &str = "profile";

/// The author counters in the profile block.
///
/// phpBB renders them as consecutive `dd.profile-posts` nodes without anything telling them apart,
/// so each counter is identified by its position. Authors without thanks only have the first one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCounter {
    Posts = 0,
    ThanksGiven = 1,
    ThanksReceived = 2,
}

impl ProfileCounter {
    #[inline]
    pub const fn position(self) -> usize {
        self as usize
    }
}

/// Post id of a post wrapper, taken from its `id` attribute.
pub fn post_id(container: ElementRef) -> Option<String> {
    let raw = container.value().id().unwrap_or_default();
    text_field(Some(raw.trim_matches(|c| POST_ID_MARKER.contains(c))), &[])
}

pub fn user_name(profile: ElementRef) -> Option<String> {
    let node =
        find(profile, markup::username_link).or_else(|| find(profile, markup::username_span));
    text_field(node, &[])
}

pub fn avatar_url(config: &ForumConfig, profile: ElementRef) -> Option<String> {
    find(profile, markup::avatar)
        .and_then(|img| img.value().attr("src"))
        .and_then(|src| config.absolute_url(src))
}

pub fn profile_counter(profile: ElementRef, counter: ProfileCounter) -> Option<String> {
    text_field(
        find_all(profile, markup::profile_counter).nth(counter.position()),
        &[],
    )
}

/// `"online"` if the post wrapper is flagged as written by a user currently online.
pub fn online_flag(container: ElementRef) -> Option<String> {
    let flag = if markup::online_marker(&container) {
        "online"
    } else {
        ""
    };
    text_field(Some(flag), &[])
}

pub fn post_number(body: ElementRef) -> Option<String> {
    text_field(find(body, markup::post_number), &["\n"])
}

pub fn post_time(body: ElementRef) -> Option<String> {
    text_field(find(body, markup::post_time), &[])
}

/// Same as [`text_field`] for text that was already pulled out of the page.
#[inline]
pub fn owned_field<S: TextSource>(value: S) -> Option<String> {
    text_field(Some(value), &[])
}
