use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::Snippet;
use crate::error::{Error, Result};

/// Parse caption track XML into ordered transcript snippets.
///
/// Walks the `<text>` child elements in document order. Elements without a
/// text node are skipped, as are elements whose text trims down to nothing.
/// The `start` attribute is required; `dur` defaults to 0.0 when absent.
/// Text is trimmed and HTML entities are decoded (caption XML frequently
/// double-escapes, e.g. `&amp;#39;`).
pub fn parse_transcript(xml: &str) -> Result<Vec<Snippet>> {
    let mut reader = Reader::from_str(xml);
    let mut snippets = Vec::new();
    // Raw (start, dur) attribute values of the currently open <text> element.
    let mut pending: Option<(Option<String>, Option<String>)> = None;
    let mut text: Option<String> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) if e.name().as_ref() == b"text" => {
                pending = Some(timing_attributes(e));
                text = None;
            }
            Ok(Event::Empty(ref e)) if e.name().as_ref() == b"text" => {
                // Self-closing element, no text node: skipped without
                // looking at its attributes.
            }
            Ok(Event::Text(ref t)) => {
                if pending.is_some() {
                    let raw = t
                        .unescape()
                        .map_err(|e| Error::MalformedTranscript(e.to_string()))?;
                    text.get_or_insert_with(String::new).push_str(&raw);
                }
            }
            Ok(Event::End(ref e)) if e.name().as_ref() == b"text" => {
                let Some((start_attr, dur_attr)) = pending.take() else {
                    continue;
                };
                let Some(raw) = text.take() else {
                    continue;
                };
                let decoded = html_escape::decode_html_entities(raw.trim()).to_string();
                if decoded.is_empty() {
                    continue;
                }

                let start_attr = start_attr.ok_or_else(|| {
                    Error::MalformedTranscript("text element missing start attribute".to_string())
                })?;
                let start = parse_seconds(&start_attr)?;
                let duration = match dur_attr {
                    Some(dur) => parse_seconds(&dur)?,
                    None => 0.0,
                };

                snippets.push(Snippet {
                    text: decoded,
                    start,
                    duration,
                });
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(Error::MalformedTranscript(e.to_string())),
            _ => {}
        }
    }

    Ok(snippets)
}

fn timing_attributes(element: &BytesStart<'_>) -> (Option<String>, Option<String>) {
    let mut start = None;
    let mut dur = None;
    for attr in element.attributes().flatten() {
        match attr.key.as_ref() {
            b"start" => start = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            b"dur" => dur = Some(String::from_utf8_lossy(&attr.value).into_owned()),
            _ => {}
        }
    }
    (start, dur)
}

fn parse_seconds(value: &str) -> Result<f64> {
    value
        .parse::<f64>()
        .map_err(|e| Error::MalformedTranscript(format!("bad timing attribute {value:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_transcript_basic() {
        let xml = r#"<transcript>
            <text start="0.0" dur="1.0">Hello</text>
            <text start="1.0" dur="2.0">World</text>
            <text start="3.0" dur="1.5">Testing</text>
        </transcript>"#;

        let snippets = parse_transcript(xml).unwrap();
        assert_eq!(snippets.len(), 3);
        assert_eq!(snippets[0].text, "Hello");
        assert!((snippets[0].start - 0.0).abs() < f64::EPSILON);
        assert!((snippets[0].duration - 1.0).abs() < f64::EPSILON);
        assert_eq!(snippets[1].text, "World");
        assert_eq!(snippets[2].text, "Testing");
        assert!((snippets[2].duration - 1.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_transcript_missing_dur_defaults_to_zero() {
        let xml = r#"<transcript>
            <text start="1.5">No duration specified</text>
            <text start="3.0" dur="2.0">With duration</text>
        </transcript>"#;

        let snippets = parse_transcript(xml).unwrap();
        assert_eq!(snippets.len(), 2);
        assert!((snippets[0].duration - 0.0).abs() < f64::EPSILON);
        assert!((snippets[1].duration - 2.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_transcript_skips_empty_elements() {
        let xml = r#"<transcript>
            <text start="0.0" dur="1.0">Valid text</text>
            <text start="1.0" dur="1.0"></text>
            <text start="1.5" dur="0.5"/>
            <text start="2.0" dur="1.0">Another valid text</text>
        </transcript>"#;

        let snippets = parse_transcript(xml).unwrap();
        assert_eq!(snippets.len(), 2);
        assert_eq!(snippets[0].text, "Valid text");
        assert_eq!(snippets[1].text, "Another valid text");
    }

    #[test]
    fn test_parse_transcript_skips_whitespace_only_text() {
        let xml = r#"<transcript>
            <text start="0.0" dur="1.0">   </text>
            <text start="1.0" dur="1.0">kept</text>
        </transcript>"#;

        let snippets = parse_transcript(xml).unwrap();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].text, "kept");
    }

    #[test]
    fn test_parse_transcript_decodes_entities() {
        let xml = r#"<transcript>
            <text start="0.0" dur="1.0">I &amp; you</text>
            <text start="1.0" dur="1.0">Less &lt; Greater &gt;</text>
            <text start="2.0" dur="1.0">Quote &quot;test&quot;</text>
        </transcript>"#;

        let snippets = parse_transcript(xml).unwrap();
        assert_eq!(snippets[0].text, "I & you");
        assert_eq!(snippets[1].text, "Less < Greater >");
        assert_eq!(snippets[2].text, "Quote \"test\"");
    }

    #[test]
    fn test_parse_transcript_decodes_double_escaped_entities() {
        let xml = r#"<transcript>
            <text start="0.0" dur="1.0">it&amp;#39;s a &amp;quot;test&amp;quot;</text>
        </transcript>"#;

        let snippets = parse_transcript(xml).unwrap();
        assert_eq!(snippets[0].text, "it's a \"test\"");
    }

    #[test]
    fn test_parse_transcript_trims_whitespace() {
        let xml = "<transcript><text start=\"0.0\" dur=\"1.0\">\n  padded  \n</text></transcript>";
        let snippets = parse_transcript(xml).unwrap();
        assert_eq!(snippets[0].text, "padded");
    }

    #[test]
    fn test_parse_transcript_missing_start_fails() {
        let xml = r#"<transcript><text dur="1.0">no start</text></transcript>"#;
        let err = parse_transcript(xml).unwrap_err();
        assert!(matches!(err, Error::MalformedTranscript(_)));
    }

    #[test]
    fn test_parse_transcript_unparseable_start_fails() {
        let xml = r#"<transcript><text start="abc" dur="1.0">bad</text></transcript>"#;
        let err = parse_transcript(xml).unwrap_err();
        assert!(matches!(err, Error::MalformedTranscript(_)));
    }

    #[test]
    fn test_parse_transcript_malformed_xml_fails() {
        let xml = r#"<transcript><text start="0.0" dur="1.0">x</wrong></transcript>"#;
        let result = parse_transcript(xml);
        assert!(matches!(result, Err(Error::MalformedTranscript(_))));
    }

    #[test]
    fn test_parse_transcript_bare_ampersand_fails() {
        let xml = r#"<transcript><text start="0.0" dur="1.0">a & b</text></transcript>"#;
        let result = parse_transcript(xml);
        assert!(matches!(result, Err(Error::MalformedTranscript(_))));
    }

    #[test]
    fn test_parse_transcript_empty_document() {
        let xml = r#"<?xml version="1.0" encoding="utf-8" ?><transcript></transcript>"#;
        let snippets = parse_transcript(xml).unwrap();
        assert!(snippets.is_empty());
    }
}
