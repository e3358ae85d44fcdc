use eyre::Result;

use crate::Snippet;

/// Render snippets as plain text, one per line, no timestamps.
pub fn render_text(snippets: &[Snippet]) -> String {
    snippets.iter().map(|s| s.text.as_str()).collect::<Vec<_>>().join("\n")
}

/// Render snippets as a pretty-printed JSON array.
pub fn render_json(snippets: &[Snippet]) -> Result<String> {
    Ok(serde_json::to_string_pretty(snippets)?)
}

/// Render snippets as SRT subtitles.
pub fn render_srt(snippets: &[Snippet]) -> String {
    let mut out = String::new();
    for (i, snippet) in snippets.iter().enumerate() {
        let start = srt_timestamp(snippet.start);
        let end = srt_timestamp(snippet.start + snippet.duration);
        out.push_str(&format!("{}\n{start} --> {end}\n{}\n\n", i + 1, snippet.text));
    }
    out
}

fn srt_timestamp(seconds: f64) -> String {
    let total_millis = (seconds * 1000.0).round() as u64;
    let millis = total_millis % 1000;
    let total_secs = total_millis / 1000;
    let secs = total_secs % 60;
    let mins = (total_secs / 60) % 60;
    let hours = total_secs / 3600;
    format!("{hours:02}:{mins:02}:{secs:02},{millis:03}")
}
