//! Extractor for the full detail of a single post.
//!
//! The forum has no page for a single post: `viewtopic.php?p=<id>` answers with the thread page that
//! contains it. The extractor walks all posts of that page and maps the one with the requested id.
//! A page without that post is not an error, [`extract`](Extractor::extract) returns `Ok(None)` for it.
use log::{debug, warn};
use scraper::{ElementRef, Html};

use crate::forum::error::ExtractorError;
use crate::forum::models::PostDetail;
use crate::forum::ForumConfig;

use super::common::{self, owned_field, ProfileCounter};
use super::fields::{collapse_newlines, drop_last_chars, node_text, text_field};
use super::markup::{self, find, find_all};
use super::Extractor;

/// Length of the time part (`" 16:23"`) at the end of the registration date.
pub const JOINED_SUFFIX_CHARS: usize = 6;

pub struct PostExtractor<'a> {
    config: &'a ForumConfig,
    post_id: String,
}

impl<'a> PostExtractor<'a> {
    pub fn new(config: &'a ForumConfig, post_id: &str) -> Self {
        Self {
            config,
            post_id: post_id.trim().to_string(),
        }
    }

    /// URL of the thread page holding the requested post.
    pub fn url(&self) -> Option<String> {
        self.config.post_url(&self.post_id)
    }

    #[inline]
    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    fn map_post(&self, container: ElementRef) -> Result<PostDetail, ExtractorError> {
        let mut detail = PostDetail {
            post_id: self.post_id.clone(),
            online: common::online_flag(container),
            ..Default::default()
        };

        if let Some(profile) = find(container, markup::post_profile) {
            self.map_profile(profile, &mut detail);
        }

        let body =
            find(container, markup::post_body).ok_or(ExtractorError::missing("post body"))?;
        let content =
            find(body, markup::post_content).ok_or(ExtractorError::missing("post content"))?;

        detail.post_number = common::post_number(body);
        detail.post_time = common::post_time(body);
        detail.full_content = owned_field(collapse_newlines(&node_text(content)));
        detail.change_line = find(body, markup::edit_notice)
            .map(node_text)
            .and_then(|notice| owned_field(notice.trim()));

        Ok(detail)
    }

    fn map_profile(&self, profile: ElementRef, detail: &mut PostDetail) {
        detail.user_name = common::user_name(profile);
        detail.avatar_url = common::avatar_url(self.config, profile);

        if let Some(rank_image) =
            find(profile, markup::profile_rank).and_then(|rank| find(rank, markup::image))
        {
            detail.user_title = text_field(rank_image.value().attr("title"), &[]);
            detail.user_rank = rank_image
                .value()
                .attr("src")
                .and_then(|src| self.config.absolute_url(src));
        }

        detail.registered = find(profile, markup::profile_joined)
            .map(node_text)
            .and_then(|joined| owned_field(drop_last_chars(&joined, JOINED_SUFFIX_CHARS)));
        detail.residence = text_field(find(profile, markup::profile_location), &[]);

        let receivers: Vec<String> = find_all(profile, markup::profile_receiver)
            .filter_map(|receiver| text_field(Some(receiver), &[]))
            .collect();
        if !receivers.is_empty() {
            detail.receivers = Some(receivers);
        }

        detail.posts_counter = common::profile_counter(profile, ProfileCounter::Posts);
        detail.thx_given = common::profile_counter(profile, ProfileCounter::ThanksGiven);
        detail.thx_received = common::profile_counter(profile, ProfileCounter::ThanksReceived);
    }
}

impl Extractor for PostExtractor<'_> {
    type Output = Option<PostDetail>;

    fn extract(&self, html: &str) -> Result<Option<PostDetail>, ExtractorError> {
        if self.post_id.is_empty() {
            warn!("No post id given");
            return Ok(None);
        }

        let document = Html::parse_document(html);

        let found = find_all(document.root_element(), markup::post_container).find(|container| {
            common::post_id(*container).as_deref() == Some(self.post_id.as_str())
        });

        match found {
            Some(container) => {
                debug!("Found post {}", self.post_id);
                self.map_post(container).map(Some)
            }
            None => {
                warn!("Post {} is not on this page", self.post_id);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    const PAGE: &str = r#"<!DOCTYPE html>
<html><head><title>Vu+ Uno 4K SE Probleme - openATV Forum</title></head>
<body>
<div id="p1001" class="post has-profile bg2">
  <div class="inner">
    <dl class="postprofile" id="profile1001">
      <dt class="has-profile-rank has-avatar">
        <div class="avatar-container"><a href="./memberlist.php?mode=viewprofile&amp;u=5" class="avatar"><img class="avatar" src="./download/file.php?avatar=5_1600000000.png" alt="Benutzeravatar" /></a></div>
        <a href="./memberlist.php?mode=viewprofile&amp;u=5" style="color: #AA0000;" class="username-coloured">Testomat</a>
      </dt>
      <dd class="profile-rank">Moderator<br /><img src="./images/ranks/moderator.png" alt="Moderator" title="Moderator" /></dd>
      <dd class="profile-posts"><strong>Beiträge:</strong> <a href="./search.php?author_id=5&amp;sr=posts">4711</a></dd>
      <dd class="profile-posts" data-user-give-id="5"><strong>Hat sich bedankt:</strong> 12 Mal</dd>
      <dd class="profile-posts" data-user-receive-id="5"><strong>Danksagung erhalten:</strong> 345 Mal</dd>
      <dd class="profile-joined"><strong>Registriert:</strong> 12 Jan 2015 16:23</dd>
      <dd class="profile-custom-field profile-phpbb_location"><strong>Wohnort:</strong> Berlin</dd>
      <dd class="profile-custom-field profile-receiver_1"><strong>Receiver 1:</strong> Vu+ Uno 4K SE</dd>
      <dd class="profile-custom-field profile-receiver_2"><strong>Receiver 2:</strong> Gigablue UHD Quad 4K</dd>
    </dl>
    <div class="postbody">
      <div id="post_content1001">
        <p class="author post-number post-number-phpbb post-number-bold">
#1</p>
        <p class="author"><time datetime="2025-10-23T14:26:00+00:00">23 Okt 2025 16:26</time></p>
        <div class="content">Erste Zeile



Zweite Zeile





Dritte Zeile</div>
        <div class="notice">
          Zuletzt geändert von Testomat am 23 Okt 2025 16:30, insgesamt 1-mal geändert.
        </div>
      </div>
    </div>
  </div>
</div>
<div id="p1002" class="post has-profile bg1 online">
  <div class="inner">
    <dl class="postprofile" id="profile1002">
      <dt><span class="username">Gast</span></dt>
      <dd class="profile-posts"><strong>Beiträge:</strong> 3</dd>
    </dl>
    <div class="postbody">
      <div class="content">Kurze Antwort</div>
    </div>
  </div>
</div>
</body></html>"#;

    #[test]
    fn maps_full_post() {
        let config = ForumConfig::default();

        let post = PostExtractor::new(&config, "1001")
            .extract(PAGE)
            .unwrap()
            .expect("post should be found");

        assert_eq!(post.post_id, "1001");
        assert_eq!(post.user_name.as_deref(), Some("Testomat"));
        assert_eq!(
            post.avatar_url.as_deref(),
            Some("https://www.opena.tv/download/file.php?avatar=5_1600000000.png")
        );
        assert_eq!(post.user_title.as_deref(), Some("Moderator"));
        assert_eq!(
            post.user_rank.as_deref(),
            Some("https://www.opena.tv/images/ranks/moderator.png")
        );
        assert_eq!(post.registered.as_deref(), Some("Registriert: 12 Jan 2015"));
        assert_eq!(post.residence.as_deref(), Some("Wohnort: Berlin"));
        assert_eq!(
            post.receivers,
            Some(vec![
                String::from("Receiver 1: Vu+ Uno 4K SE"),
                String::from("Receiver 2: Gigablue UHD Quad 4K"),
            ])
        );
        assert_eq!(post.posts_counter.as_deref(), Some("Beiträge: 4711"));
        assert_eq!(post.thx_given.as_deref(), Some("Hat sich bedankt: 12 Mal"));
        assert_eq!(
            post.thx_received.as_deref(),
            Some("Danksagung erhalten: 345 Mal")
        );
        assert_eq!(post.post_number.as_deref(), Some("#1"));
        assert_eq!(post.post_time.as_deref(), Some("23 Okt 2025 16:26"));
        assert_eq!(post.online, None);
        assert_eq!(
            post.full_content.as_deref(),
            Some("Erste Zeile\n\nZweite Zeile\n\nDritte Zeile")
        );
        assert_eq!(
            post.change_line.as_deref(),
            Some("Zuletzt geändert von Testomat am 23 Okt 2025 16:30, insgesamt 1-mal geändert.")
        );
    }

    #[test]
    fn sparse_profile_leaves_keys_out() {
        let config = ForumConfig::default();

        let post = PostExtractor::new(&config, "1002")
            .extract(PAGE)
            .unwrap()
            .expect("post should be found");

        assert_eq!(post.user_name.as_deref(), Some("Gast"));
        assert_eq!(post.online.as_deref(), Some("online"));
        assert_eq!(post.posts_counter.as_deref(), Some("Beiträge: 3"));
        assert_eq!(post.thx_given, None);
        assert_eq!(post.thx_received, None);

        let json = serde_json::to_value(&post).unwrap();
        for key in [
            "avatarUrl",
            "userTitle",
            "userRank",
            "registered",
            "residence",
            "receivers",
            "thxGiven",
            "thxReceived",
            "postNumber",
            "postTime",
            "changeLine",
        ] {
            assert!(json.get(key).is_none(), "{key} should be left out");
        }
        assert_eq!(json["fullContent"], "Kurze Antwort");
    }

    #[test]
    fn empty_receivers_are_skipped() {
        let config = ForumConfig::default();
        let html = r#"<div id="p5" class="post has-profile bg1">
              <dl class="postprofile">
                <dd class="profile-custom-field profile-receiver_1"></dd>
                <dd class="profile-custom-field profile-receiver_2"><strong>Receiver 2:</strong> Dreambox</dd>
              </dl>
              <div class="postbody"><div class="content">Text</div></div>
            </div>"#;

        let post = PostExtractor::new(&config, "5").extract(html).unwrap().unwrap();

        assert_eq!(post.receivers, Some(vec![String::from("Receiver 2: Dreambox")]));
    }

    #[test]
    fn unknown_post_is_not_found() {
        let config = ForumConfig::default();

        let result = PostExtractor::new(&config, "999999").extract(PAGE);

        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn empty_post_id_is_not_found() {
        let config = ForumConfig::default();

        assert!(matches!(
            PostExtractor::new(&config, " ").extract(PAGE),
            Ok(None)
        ));
        assert_eq!(PostExtractor::new(&config, "").url(), None);
    }

    #[test]
    fn builds_post_url() {
        let config = ForumConfig::default();

        assert_eq!(
            PostExtractor::new(&config, "1001").url().as_deref(),
            Some("https://www.opena.tv/viewtopic.php?p=1001#p1001")
        );
    }
}
