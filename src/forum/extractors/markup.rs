//! Predicates describing the markup of the forum template.
//!
//! The extractors never match on raw class strings. Every fragment they look for is named by one of the
//! predicates below, so a change in the forum template only requires touching this file.
use scraper::ElementRef;

/// First descendant of `scope` (not `scope` itself) matching `predicate`, in document order.
pub fn find<'a, P>(scope: ElementRef<'a>, predicate: P) -> Option<ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .find(|el| predicate(el))
}

/// All descendants of `scope` matching `predicate`, in document order.
pub fn find_all<'a, P>(scope: ElementRef<'a>, predicate: P) -> impl Iterator<Item = ElementRef<'a>>
where
    P: Fn(&ElementRef<'a>) -> bool,
{
    scope
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(move |el| predicate(el))
}

#[inline]
pub fn is_tag(el: &ElementRef, name: &str) -> bool {
    el.value().name() == name
}

#[inline]
pub fn has_class(el: &ElementRef, class: &str) -> bool {
    el.value().classes().any(|c| c == class)
}

#[inline]
pub fn has_class_prefix(el: &ElementRef, prefix: &str) -> bool {
    el.value().classes().any(|c| c.starts_with(prefix))
}

#[inline]
fn tag_with_classes(el: &ElementRef, name: &str, classes: &[&str]) -> bool {
    is_tag(el, name) && classes.iter().all(|c| has_class(el, c))
}

// Listing page

pub fn topic_list(el: &ElementRef) -> bool {
    tag_with_classes(el, "ul", &["topiclist", "topics", "collapsible"])
}

pub fn topic_entry(el: &ElementRef) -> bool {
    is_tag(el, "dl")
}

pub fn topic_title(el: &ElementRef) -> bool {
    tag_with_classes(el, "a", &["topictitle"])
}

/// "Last post by" block, only visible on narrow screens but always present in the markup
pub fn latest_post_line(el: &ElementRef) -> bool {
    tag_with_classes(el, "div", &["responsive-show"])
}

pub fn source_line(el: &ElementRef) -> bool {
    tag_with_classes(el, "div", &["responsive-hide"])
}

pub fn view_count(el: &ElementRef) -> bool {
    tag_with_classes(el, "dd", &["views"])
}

pub fn reply_count(el: &ElementRef) -> bool {
    tag_with_classes(el, "dd", &["posts"])
}

// Thread page

pub fn page_title(el: &ElementRef) -> bool {
    is_tag(el, "title")
}

/// `<li class="active"><span>2</span></li>`
pub fn active_page(el: &ElementRef) -> bool {
    tag_with_classes(el, "li", &["active"])
}

pub fn span(el: &ElementRef) -> bool {
    is_tag(el, "span")
}

/// `<a class="button" href="./viewtopic.php?t=69626&amp;start=20" role="button">2</a>`
pub fn page_button(el: &ElementRef) -> bool {
    tag_with_classes(el, "a", &["button"]) && el.value().attr("role") == Some("button")
}

/// Any post wrapper that carries an author profile.
pub fn post_container(el: &ElementRef) -> bool {
    tag_with_classes(el, "div", &["post", "has-profile"])
}

/// Post wrapper with one of the alternating `bg1`/`bg2` backgrounds, as rendered on thread pages.
pub fn post_container_with_background(el: &ElementRef) -> bool {
    post_container(el) && has_class_prefix(el, "bg")
}

pub fn online_marker(el: &ElementRef) -> bool {
    has_class(el, "online")
}

pub fn post_profile(el: &ElementRef) -> bool {
    tag_with_classes(el, "dl", &["postprofile"])
}

/// Registered users are rendered as a link, guests as a span.
pub fn username_link(el: &ElementRef) -> bool {
    is_tag(el, "a") && has_class_prefix(el, "username")
}

pub fn username_span(el: &ElementRef) -> bool {
    is_tag(el, "span") && has_class_prefix(el, "username")
}

pub fn avatar(el: &ElementRef) -> bool {
    tag_with_classes(el, "img", &["avatar"])
}

pub fn image(el: &ElementRef) -> bool {
    is_tag(el, "img")
}

pub fn profile_rank(el: &ElementRef) -> bool {
    tag_with_classes(el, "dd", &["profile-rank"])
}

pub fn profile_joined(el: &ElementRef) -> bool {
    tag_with_classes(el, "dd", &["profile-joined"])
}

pub fn profile_counter(el: &ElementRef) -> bool {
    tag_with_classes(el, "dd", &["profile-posts"])
}

pub fn profile_location(el: &ElementRef) -> bool {
    tag_with_classes(el, "dd", &["profile-custom-field", "profile-phpbb_location"])
}

pub fn profile_receiver(el: &ElementRef) -> bool {
    tag_with_classes(el, "dd", &["profile-custom-field"])
        && has_class_prefix(el, "profile-receiver_")
}

pub fn post_body(el: &ElementRef) -> bool {
    tag_with_classes(el, "div", &["postbody"])
}

pub fn post_number(el: &ElementRef) -> bool {
    tag_with_classes(el, "p", &["author", "post-number"])
}

pub fn post_time(el: &ElementRef) -> bool {
    is_tag(el, "time")
}

pub fn post_content(el: &ElementRef) -> bool {
    tag_with_classes(el, "div", &["content"])
}

pub fn edit_notice(el: &ElementRef) -> bool {
    tag_with_classes(el, "div", &["notice"])
}
