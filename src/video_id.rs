use url::Url;

use crate::error::{Error, Result};

const ALLOWED_HOSTS: &[&str] = &[
    "youtu.be",
    "m.youtube.com",
    "youtube.com",
    "www.youtube.com",
    "www.youtube-nocookie.com",
    "vid.plus",
];

/// Extract the 11-character video id from a YouTube URL.
///
/// Supports the usual URL shapes:
/// - `https://www.youtube.com/watch?v=VIDEO_ID`
/// - `https://youtu.be/VIDEO_ID`
/// - `https://m.youtube.com/watch?v=VIDEO_ID`
/// - `https://www.youtube-nocookie.com/watch?v=VIDEO_ID`
/// - `https://vid.plus/VIDEO_ID`
///
/// Only the length of the id is validated, not its character set.
pub fn parse_video_id(url: &str) -> Result<String> {
    let parsed = Url::parse(url).map_err(|_| Error::UnsupportedScheme(url.to_string()))?;

    let scheme = parsed.scheme();
    if scheme != "http" && scheme != "https" {
        return Err(Error::UnsupportedScheme(scheme.to_string()));
    }

    let host = parsed.host_str().unwrap_or("");
    if !ALLOWED_HOSTS.contains(&host) {
        return Err(Error::UnsupportedHost(host.to_string()));
    }

    let path = parsed.path();
    let video_id = if path.ends_with("/watch") {
        match parsed.query_pairs().find(|(key, _)| key == "v") {
            Some((_, value)) => value.into_owned(),
            None => return Err(Error::NoVideoIdFound(url.to_string())),
        }
    } else {
        // Last path segment, e.g. youtu.be/<id> or /some/extra/<id>
        path.trim_matches('/').rsplit('/').next().unwrap_or("").to_string()
    };

    if video_id.chars().count() != 11 {
        return Err(Error::InvalidVideoIdLength(video_id));
    }

    Ok(video_id)
}
