use thiserror::Error;

/// Enumerates the possible errors that can arise while fetching or parsing forum pages.
///
/// Missing optional fields are never reported here, those are just left out of the records.
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// The request could not be completed (connection refused, DNS failure, timeout...).
    /// The message has the forum host removed.
    #[error("Connection Error: {reason}")]
    ConnectionError { reason: String },

    /// The forum answered with a non-success HTTP status.
    #[error("Server returned status {status}: {reason}")]
    ServerStatus { status: u16, reason: String },

    /// A part of the page every valid document of this kind has is missing.
    /// `fragment` names the part that could not be found.
    #[error("Page is missing an essential fragment: {fragment}")]
    MissingFragment { fragment: &'static str },

    /// The configured base URL can't be used to build forum URLs.
    #[error("Invalid forum address: {url}")]
    InvalidBaseUrl { url: String },

    #[error("Failed to parse forum address")]
    UrlParseFail(#[from] url::ParseError),

    /// The stored address of the reader mirror could not be decoded.
    #[error("Invalid reader mirror address")]
    InvalidMirrorAddress,
}

impl ExtractorError {
    #[inline]
    pub const fn missing(fragment: &'static str) -> Self {
        Self::MissingFragment { fragment }
    }

    /// Whether the error came from the network rather than from the page contents.
    #[inline]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionError { .. } | Self::ServerStatus { .. }
        )
    }
}
