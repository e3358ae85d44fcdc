use serde::Deserialize;

use crate::error::{Error, Result};

const PLAYER_RESPONSE_MARKER: &str = "var ytInitialPlayerResponse =";
const SCRIPT_CLOSE_MARKER: &str = "</script>";
const HEAD_MARKER: &str = ";var head =";

#[derive(Debug, Deserialize)]
struct PlayerResponse {
    captions: Option<CaptionsData>,
}

#[derive(Debug, Deserialize)]
struct CaptionsData {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    player_captions_tracklist_renderer: Option<CaptionTracklistRenderer>,
}

#[derive(Debug, Deserialize)]
struct CaptionTracklistRenderer {
    #[serde(rename = "captionTracks")]
    caption_tracks: Option<Vec<CaptionTrack>>,
}

/// One caption track as advertised on the watch page.
///
/// `base_url` can be missing: the track is listed but not fetchable.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CaptionTrack {
    #[serde(rename = "baseUrl")]
    pub base_url: Option<String>,
    #[serde(rename = "languageCode")]
    pub language_code: String,
}

/// All caption tracks a video offers, in the order the page lists them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionCatalog {
    pub caption_tracks: Vec<CaptionTrack>,
}

/// Extract the caption track catalog from watch page HTML.
///
/// The page embeds a `ytInitialPlayerResponse` JSON object inside a script
/// tag; the object runs up to the closing script tag and is sometimes
/// followed by a `;var head =` statement that must be cut off before
/// decoding.
pub fn parse_captions(html: &str) -> Result<CaptionCatalog> {
    let start = html
        .find(PLAYER_RESPONSE_MARKER)
        .ok_or(Error::PlayerResponseNotFound)?;
    let mut data = &html[start + PLAYER_RESPONSE_MARKER.len()..];

    if let Some(end) = data.find(SCRIPT_CLOSE_MARKER) {
        data = &data[..end];
    }
    if let Some(end) = data.find(HEAD_MARKER) {
        data = &data[..end];
    }
    let data = data.trim().trim_matches(';');

    let response: PlayerResponse = serde_json::from_str(data)?;

    let caption_tracks = response
        .captions
        .and_then(|c| c.player_captions_tracklist_renderer)
        .and_then(|r| r.caption_tracks)
        .ok_or(Error::CaptionsNotFound)?;

    Ok(CaptionCatalog { caption_tracks })
}

/// Pick one caption track by language preference.
///
/// A single-track catalog wins unconditionally. Otherwise the first
/// preferred language with an exact match wins (`en` does not match
/// `en-US`), and if nothing matches the first listed track is the default.
pub fn select_caption_track<'a, S: AsRef<str>>(
    tracks: &'a [CaptionTrack],
    language_codes: &[S],
) -> Result<&'a CaptionTrack> {
    if tracks.is_empty() {
        return Err(Error::CaptionsNotFound);
    }
    if tracks.len() == 1 {
        return Ok(&tracks[0]);
    }

    for code in language_codes {
        if let Some(track) = tracks.iter().find(|t| t.language_code == code.as_ref()) {
            return Ok(track);
        }
    }

    Ok(&tracks[0])
}
