//! Extractor for the "recent topics" index page.
//!
//! The listing shows the most recently active threads, [`LISTING_PAGE_SIZE`](crate::forum::LISTING_PAGE_SIZE)
//! per page. Each entry is turned into a [`ThreadSummary`], the authors of the latest posts are collected
//! into a set.
use ahash::AHashSet;
use log::debug;
use scraper::{ElementRef, Html};

use crate::forum::error::ExtractorError;
use crate::forum::models::{ListingResult, ThreadSummary};
use crate::forum::ForumConfig;

use super::common::owned_field;
use super::fields::{skip_chars, stripped_text, text_field};
use super::markup::{self, find, find_all};
use super::Extractor;

/// Title given to every listing result.
pub const LISTING_TITLE: &str = "aktuelle Themen";

/// Length of the `Letzter Beitrag von` label in front of the author name, once whitespace is stripped.
pub const AUTHOR_PREFIX_CHARS: usize = 19;

/// Separates the author name from the date of the latest post.
pub const AUTHOR_DELIMITER: char = '«';

const LINE_BREAKS: &[&str] = &["\t", "\n"];

pub struct ListingExtractor<'a> {
    config: &'a ForumConfig,
    start: usize,
}

impl<'a> ListingExtractor<'a> {
    /// `start` is the topic offset of the page, it is passed through to the result as is.
    pub const fn new(config: &'a ForumConfig, start: usize) -> Self {
        Self { config, start }
    }

    /// URL of the listing page this extractor expects.
    pub fn url(&self) -> String {
        self.config.listing_url(self.start)
    }

    fn map_topic(&self, entry: ElementRef) -> ThreadSummary {
        let title_link = find(entry, markup::topic_title);
        let latest_line = find(entry, markup::latest_post_line);

        let thread_id = title_link
            .and_then(|a| a.value().attr("href"))
            .and_then(|href| self.config.query_param(href, "t"));

        ThreadSummary {
            title: text_field(title_link, &[]),
            thread_id: thread_id.and_then(owned_field),
            user_name: latest_line.and_then(author_name),
            latest_line: text_field(latest_line, LINE_BREAKS),
            source_line: text_field(find(entry, markup::source_line), LINE_BREAKS),
            views: text_field(find(entry, markup::view_count), &[]),
            posts: text_field(find(entry, markup::reply_count), &[]),
        }
    }
}

impl Extractor for ListingExtractor<'_> {
    type Output = ListingResult;

    fn extract(&self, html: &str) -> Result<ListingResult, ExtractorError> {
        let document = Html::parse_document(html);

        let topic_list = find(document.root_element(), markup::topic_list)
            .ok_or(ExtractorError::missing("topic list"))?;

        let mut threads = Vec::new();
        let mut users = AHashSet::new();

        for entry in find_all(topic_list, markup::topic_entry) {
            let summary = self.map_topic(entry);

            if let Some(name) = &summary.user_name {
                users.insert(name.clone());
            }
            threads.push(summary);
        }

        debug!("Found {} threads by {} users", threads.len(), users.len());

        Ok(ListingResult {
            thread_title: LISTING_TITLE.to_string(),
            curr_post: self.start,
            threads,
            users,
        })
    }
}

/// Pulls the author out of `Letzter Beitrag von <name> « <date>`.
fn author_name(latest_line: ElementRef) -> Option<String> {
    let stripped = stripped_text(latest_line);
    let after_label = skip_chars(&stripped, AUTHOR_PREFIX_CHARS);
    let name = after_label
        .split(AUTHOR_DELIMITER)
        .next()
        .unwrap_or_default();

    owned_field(name)
}

#[cfg(test)]
mod test {
    use super::*;

    fn topic(id: u32, author: &str) -> String {
        format!(
            r#"<li class="row bg1"><dl class="row-item topic_read">
                 <dt title="Keine ungelesenen Beiträge">
                   <div class="list-inner">
                     <a href="./viewtopic.php?t={id}&amp;sid=0123abcd" class="topictitle">Thema {id}</a>
                     <div class="responsive-show" style="display: none;">
                       Letzter Beitrag von <a href="./memberlist.php?mode=viewprofile&amp;u=2" class="username">{author}</a> « <a href="./viewtopic.php?p=1#p1">23 Okt 2025 16:26</a>
                     </div>
                     <div class="responsive-hide">
                       von <a class="username">Starter</a> » 20 Okt 2025 10:00 » in	Receiver
                     </div>
                   </div>
                 </dt>
                 <dd class="posts">12 <dfn>Antworten</dfn></dd>
                 <dd class="views">345 <dfn>Zugriffe</dfn></dd>
               </dl></li>"#
        )
    }

    fn listing(topics: &[String]) -> String {
        format!(
            r#"<html><head><title>openATV Forum</title></head><body>
               <ul class="topiclist topics collapsible">{}</ul>
               </body></html>"#,
            topics.concat()
        )
    }

    #[test]
    fn maps_topics() {
        let config = ForumConfig::default();
        let html = listing(&[topic(101, "Testomat"), topic(102, "Mr.Servo")]);

        let result = ListingExtractor::new(&config, 10).extract(&html).unwrap();

        assert_eq!(result.thread_title, "aktuelle Themen");
        assert_eq!(result.curr_post, 10);
        assert_eq!(result.threads.len(), 2);

        let first = &result.threads[0];
        assert_eq!(first.title.as_deref(), Some("Thema 101"));
        assert_eq!(first.thread_id.as_deref(), Some("101"));
        assert_eq!(first.user_name.as_deref(), Some("Testomat"));
        assert_eq!(first.posts.as_deref(), Some("12 Antworten"));
        assert_eq!(first.views.as_deref(), Some("345 Zugriffe"));

        let latest = first.latest_line.as_deref().unwrap();
        assert!(!latest.contains('\n') && !latest.contains('\t'));
        assert!(latest.contains("Testomat"));

        let source = first.source_line.as_deref().unwrap();
        assert!(!source.contains('\t'));
        assert!(source.contains("inReceiver"));

        assert_eq!(result.threads[1].thread_id.as_deref(), Some("102"));
    }

    #[test]
    fn deduplicates_authors() {
        let config = ForumConfig::default();
        let html = listing(&[
            topic(1, "Testomat"),
            topic(2, "Mr.Servo"),
            topic(3, "Testomat"),
        ]);

        let result = ListingExtractor::new(&config, 0).extract(&html).unwrap();

        assert_eq!(result.threads.len(), 3);
        assert_eq!(result.users.len(), 2);
        assert!(result.users.contains("Testomat"));
        assert!(result.users.contains("Mr.Servo"));
    }

    #[test]
    fn entry_without_author_block_is_incomplete() {
        let config = ForumConfig::default();
        let html = listing(&[String::from(
            r#"<li><dl><dt><a href="./viewtopic.php?t=7" class="topictitle">Ohne Autor</a></dt></dl></li>"#,
        )]);

        let result = ListingExtractor::new(&config, 0).extract(&html).unwrap();
        let entry = &result.threads[0];

        assert_eq!(entry.thread_id.as_deref(), Some("7"));
        assert_eq!(entry.user_name, None);
        assert_eq!(entry.latest_line, None);
        assert!(result.users.is_empty());

        let json = serde_json::to_value(entry).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys.len(), 2);
        assert!(json.get("userName").is_none());
        assert!(json.get("views").is_none());
    }

    #[test]
    fn missing_topic_list_is_reported() {
        let config = ForumConfig::default();

        let result = ListingExtractor::new(&config, 0)
            .extract("<html><body><p>Wartung</p></body></html>");

        assert!(matches!(
            result,
            Err(ExtractorError::MissingFragment {
                fragment: "topic list"
            })
        ));
    }

    #[test]
    fn author_after_fixed_label() {
        let doc = Html::parse_fragment(
            r#"<div class="responsive-show">Letzter Beitrag von  <a>Grüßaugust</a>  « 23 Okt 2025 16:26</div>"#,
        );
        let block = find(doc.root_element(), markup::latest_post_line).unwrap();

        assert_eq!(author_name(block).as_deref(), Some("Grüßaugust"));
    }
}
