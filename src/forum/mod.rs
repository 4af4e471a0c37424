//! Site description of the openATV forum and the URLs the parser talks to.
//!
//! # Forum config
//! A [`ForumConfig`] is an immutable value holding everything the fetcher and the extractors need to know
//! about the forum: its base URL, the user-agent sent with every request and the request timeouts.
//!
//! It is passed explicitly into every extractor, so there is no global state to keep in sync.
use std::time::Duration;

use log::debug;
use url::Url;

use self::error::ExtractorError;

pub mod error;
pub mod extractors;
pub mod fetch;
pub mod models;

/// Main address of the forum.
pub const DEFAULT_BASE_URL: &str = "https://www.opena.tv";

/// Address of the reader mirror, hex encoded so it doesn't show up in plain text.
///
/// The mirror answers the server status check and serves the same pages as the main site.
const READER_URL_HEX: &str = "687474703A2F2F7265616465722E6F70656E612E7476";

pub const USER_AGENT: &str = concat!("Rust Forum Parser/", env!("CARGO_PKG_VERSION"));

pub const CONNECT_TIMEOUT: Duration = Duration::from_millis(3050);
pub const READ_TIMEOUT: Duration = Duration::from_secs(6);

/// Posts shown on a single page of the recent topics listing.
pub const LISTING_PAGE_SIZE: usize = 5;
/// Posts shown on a single page of a thread.
pub const THREAD_PAGE_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ForumConfig {
    base_url: String,
    user_agent: String,
    connect_timeout: Duration,
    read_timeout: Duration,
}

impl Default for ForumConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: USER_AGENT.to_string(),
            connect_timeout: CONNECT_TIMEOUT,
            read_timeout: READ_TIMEOUT,
        }
    }
}

impl ForumConfig {
    /// Builds a config pointing to another installation of the same forum template.
    pub fn new(base_url: &str) -> Result<Self, ExtractorError> {
        let parsed = Url::parse(base_url)?;

        if parsed.host_str().is_none() {
            return Err(ExtractorError::InvalidBaseUrl {
                url: base_url.to_string(),
            });
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            ..Default::default()
        })
    }

    /// Derives the config of the reader mirror. The mirror is also the target of the server status check.
    pub fn reader(&self) -> Result<Self, ExtractorError> {
        let url = Self::status_url()?;
        debug!("Using reader mirror {}", url);

        Ok(Self {
            base_url: url,
            ..self.clone()
        })
    }

    /// Decodes the address used to check whether the forum is reachable.
    pub fn status_url() -> Result<String, ExtractorError> {
        let raw = hex::decode(READER_URL_HEX).map_err(|_| ExtractorError::InvalidMirrorAddress)?;
        String::from_utf8(raw).map_err(|_| ExtractorError::InvalidMirrorAddress)
    }

    #[inline]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[inline]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    #[inline]
    pub const fn connect_timeout(&self) -> Duration {
        self.connect_timeout
    }

    #[inline]
    pub const fn read_timeout(&self) -> Duration {
        self.read_timeout
    }

    #[inline]
    pub fn host(&self) -> Option<String> {
        Url::parse(&self.base_url)
            .ok()
            .and_then(|u| u.host_str().map(str::to_string))
    }

    /// URL of the recent topics index, starting at the `start` topic offset.
    pub fn listing_url(&self, start: usize) -> String {
        format!("{}/index.php?recent_topics_start={}", self.base_url, start)
    }

    /// URL of a thread page. Returns `None` if no thread id was given.
    pub fn thread_url(&self, thread_id: &str, start: usize) -> Option<String> {
        if thread_id.is_empty() {
            return None;
        }
        Some(format!(
            "{}/viewtopic.php?t={}&start={}",
            self.base_url, thread_id, start
        ))
    }

    /// URL of the thread page containing a specific post. Returns `None` if no post id was given.
    pub fn post_url(&self, post_id: &str) -> Option<String> {
        if post_id.is_empty() {
            return None;
        }
        Some(format!(
            "{}/viewtopic.php?p={}#p{}",
            self.base_url, post_id, post_id
        ))
    }

    /// Resolves a (usually relative) link found inside a page against the base URL.
    ///
    /// ```rust
    /// use forum_parser::ForumConfig;
    ///
    /// let config = ForumConfig::default();
    /// let avatar = config.absolute_url("./download/file.php?avatar=42_1700000000.png");
    ///
    /// assert_eq!(
    ///     avatar.as_deref(),
    ///     Some("https://www.opena.tv/download/file.php?avatar=42_1700000000.png")
    /// );
    /// ```
    pub fn absolute_url(&self, link: &str) -> Option<String> {
        let link = link.trim();
        if link.is_empty() {
            return None;
        }
        self.resolve(link).map(String::from)
    }

    /// Reads the value of a query parameter of a link found inside a page.
    pub fn query_param(&self, link: &str, key: &str) -> Option<String> {
        self.resolve(link)?
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    /// Removes the forum host (and the quotes and slashes around it) from a message meant for the user.
    pub fn redact(&self, message: &str) -> String {
        let mut out = message.to_string();
        if let Some(host) = self.host() {
            out = out.replace(&host, "");
        }
        out.replace(['\'', '"', '/'], "")
    }

    fn resolve(&self, link: &str) -> Option<Url> {
        // Without the trailing slash `join` would drop the last path segment of the base
        let base = Url::parse(&format!("{}/", self.base_url)).ok()?;
        base.join(link).ok()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn builds_forum_urls() {
        let config = ForumConfig::default();

        assert_eq!(
            config.listing_url(10),
            "https://www.opena.tv/index.php?recent_topics_start=10"
        );
        assert_eq!(
            config.thread_url("69626", 20).as_deref(),
            Some("https://www.opena.tv/viewtopic.php?t=69626&start=20")
        );
        assert_eq!(
            config.post_url("789012").as_deref(),
            Some("https://www.opena.tv/viewtopic.php?p=789012#p789012")
        );
        assert_eq!(config.thread_url("", 0), None);
        assert_eq!(config.post_url(""), None);
    }

    #[test]
    fn reader_mirror_is_decoded() {
        let reader = ForumConfig::default().reader().unwrap();

        assert_eq!(reader.base_url(), "http://reader.opena.tv");
        assert_eq!(reader.user_agent(), USER_AGENT);
        assert_eq!(
            reader.post_url("1").as_deref(),
            Some("http://reader.opena.tv/viewtopic.php?p=1#p1")
        );
    }

    #[test]
    fn reads_query_params() {
        let config = ForumConfig::default();

        assert_eq!(
            config
                .query_param("./viewtopic.php?t=69626&sid=0123abcd", "t")
                .as_deref(),
            Some("69626")
        );
        assert_eq!(
            config
                .query_param("./viewtopic.php?f=12&t=555", "t")
                .as_deref(),
            Some("555")
        );
        assert_eq!(config.query_param("./viewforum.php?f=12", "t"), None);
    }

    #[test]
    fn redacts_host_from_messages() {
        let config = ForumConfig::default();
        let msg = "error sending request for url (https://www.opena.tv/index.php): 'timed out'";

        let redacted = config.redact(msg);

        assert!(!redacted.contains("opena.tv"));
        assert!(!redacted.contains('/'));
        assert!(!redacted.contains('\''));
    }

    #[test]
    fn rejects_invalid_base_url() {
        assert!(ForumConfig::new("not a url").is_err());
        assert_eq!(
            ForumConfig::new("https://forum.example.org/").unwrap().base_url(),
            "https://forum.example.org"
        );
    }
}
