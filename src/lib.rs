pub mod captions;
pub mod config;
pub mod error;
pub mod fetch;
pub mod output;
pub mod transcript;
pub mod video_id;

use serde::Serialize;

pub use captions::{CaptionCatalog, CaptionTrack};
pub use error::{Error, Result};
pub use fetch::{Fetch, Fetcher, RetryPolicy};

pub const WATCH_URL: &str = "https://www.youtube.com/watch";

/// A single timed unit of transcript text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snippet {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

/// Fetch and parse the transcript for a video id.
///
/// Fetches the watch page, extracts the caption catalog, selects a track by
/// language preference, then fetches and parses that track's XML. Fails with
/// [`Error::CaptionsNotFound`] when the selected track has no fetch URL.
pub async fn get_transcript_from_video_id<S: AsRef<str>>(
    fetcher: &dyn Fetch,
    video_id: &str,
    language_codes: &[S],
) -> Result<Vec<Snippet>> {
    let html = fetcher.fetch(WATCH_URL, &[("v", video_id)]).await?;

    let catalog = captions::parse_captions(&html)?;
    let track = captions::select_caption_track(&catalog.caption_tracks, language_codes)?;

    let base_url = track.base_url.as_deref().ok_or(Error::CaptionsNotFound)?;
    let xml = fetcher.fetch(base_url, &[]).await?;

    transcript::parse_transcript(&xml)
}

/// Fetch and parse the transcript for a video page URL.
///
/// Resolves the video id from the URL first, then proceeds as
/// [`get_transcript_from_video_id`].
pub async fn get_transcript_from_url<S: AsRef<str>>(
    fetcher: &dyn Fetch,
    url: &str,
    language_codes: &[S],
) -> Result<Vec<Snippet>> {
    let video_id = video_id::parse_video_id(url)?;
    get_transcript_from_video_id(fetcher, &video_id, language_codes).await
}
