use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Everything that can go wrong between a URL and a parsed transcript.
///
/// Each variant carries the offending input where one exists. Network
/// failures are wrapped as [`Error::Http`] with the underlying reqwest
/// error intact.
#[derive(Debug, Error)]
pub enum Error {
    /// URL scheme is not http or https (or the input was not a URL at all).
    #[error("unsupported URL scheme: {0:?}")]
    UnsupportedScheme(String),

    /// URL host is not a known YouTube domain.
    #[error("unsupported URL host: {0:?}")]
    UnsupportedHost(String),

    /// A /watch URL without a `v` query parameter.
    #[error("no video id found in URL: {0}")]
    NoVideoIdFound(String),

    /// Candidate video id is not exactly 11 characters.
    #[error("invalid video id (expected 11 characters): {0:?}")]
    InvalidVideoIdLength(String),

    /// The watch page HTML contains no `ytInitialPlayerResponse` marker.
    #[error("ytInitialPlayerResponse not found in page HTML")]
    PlayerResponseNotFound,

    /// The embedded player response was present but did not decode as JSON.
    #[error("malformed ytInitialPlayerResponse: {0}")]
    MalformedPlayerResponse(#[from] serde_json::Error),

    /// No caption tracks listed, or the selected track has no fetch URL.
    #[error("no caption tracks available")]
    CaptionsNotFound,

    /// Caption track XML failed to parse.
    #[error("malformed transcript XML: {0}")]
    MalformedTranscript(String),

    /// Request failed with an HTTP status error, or retries were exhausted.
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}
