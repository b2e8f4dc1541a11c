//! Speaker headers and answer attribution.
//!
//! A transcript names its speakers with a header: a line ending in the
//! speaker's name, immediately followed by a line that starts with a
//! `(hh:mm:ss)` marker. The speaker's words may follow the marker on the same
//! line or on the next one.
//!
//! ```text
//! Welcome to the show. Bob
//! (00:00:10) Thanks for having me.
//! ```
//!
//! Everything after the marker up to the next header's name belongs to that
//! speaker.

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Name reported when no speaker's text contains the answer.
pub const UNKNOWN_SPEAKER: &str = "Unknown Speaker";

static HEADER_MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*\([0-9]{2}:[0-9]{2}:[0-9]{2}\)").expect("valid regex"));

static LOOSE_MARKER_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*\([0-9]{1,2}:[0-9]{1,2}(:[0-9]{1,2})?\)").expect("valid regex")
});

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z][A-Za-z ]*$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HeaderError {
    /// A speaker name is followed by a timestamp that is not `hh:mm:ss`.
    #[error("line {line}: malformed header timestamp `{found}`")]
    MalformedTimestamp { line: usize, found: String },
}

/// Maps an answer to the speaker who said it.
pub trait Attribute: Send + Sync {
    fn attribute(&self, text: &str) -> String;
}

struct Header {
    name: String,
    /// Byte offset where the name starts.
    name_start: usize,
    /// Byte offset just past the marker.
    text_start: usize,
}

/// Speaker name to everything they said, in order of first appearance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpeakerIndex {
    speakers: IndexMap<String, String>,
}

impl SpeakerIndex {
    /// Parse the speaker headers of one transcript body.
    pub fn build(body: &str) -> Result<Self, HeaderError> {
        let headers = parse_headers(body)?;
        let mut index = Self::default();
        for (i, header) in headers.iter().enumerate() {
            let end = headers
                .get(i + 1)
                .map(|next| next.name_start)
                .unwrap_or(body.len());
            let text = body
                .get(header.text_start..end.max(header.text_start))
                .unwrap_or_default()
                .trim();
            index.append(&header.name, text);
        }
        Ok(index)
    }

    /// Fold another index into this one, appending text for known names.
    pub fn merge(&mut self, other: SpeakerIndex) {
        for (name, text) in other.speakers {
            self.append(&name, &text);
        }
    }

    fn append(&mut self, name: &str, text: &str) {
        match self.speakers.get_mut(name) {
            Some(existing) => {
                existing.push(' ');
                existing.push_str(text);
            }
            None => {
                self.speakers.insert(name.to_string(), text.to_string());
            }
        }
    }

    /// Text attributed to `name`.
    pub fn text(&self, name: &str) -> Option<&str> {
        self.speakers.get(name).map(String::as_str)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.speakers.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.speakers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.speakers.is_empty()
    }
}

impl Attribute for SpeakerIndex {
    /// First speaker whose text contains `text`, ignoring case.
    fn attribute(&self, text: &str) -> String {
        let needle = text.to_lowercase();
        self.speakers
            .iter()
            .find(|(_, said)| said.to_lowercase().contains(&needle))
            .map(|(name, _)| name.clone())
            .unwrap_or_else(|| UNKNOWN_SPEAKER.to_string())
    }
}

fn parse_headers(body: &str) -> Result<Vec<Header>, HeaderError> {
    let mut headers = Vec::new();
    let mut offset = 0;
    // (start offset, content) of the previous line
    let mut previous: Option<(usize, &str)> = None;
    for (number, raw) in body.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches(['\n', '\r']);
        if let Some((prev_start, prev)) = previous {
            if let Some(name) = NAME_RE.find(prev.trim_end()) {
                if let Some(marker) = HEADER_MARKER_RE.find(line) {
                    headers.push(Header {
                        name: name.as_str().trim().to_string(),
                        name_start: prev_start + name.start(),
                        text_start: offset + marker.end(),
                    });
                } else if let Some(marker) = LOOSE_MARKER_RE.find(line) {
                    return Err(HeaderError::MalformedTimestamp {
                        line: number + 1,
                        found: marker.as_str().trim().to_string(),
                    });
                }
            }
        }
        previous = Some((offset, line));
        offset += raw.len();
    }
    Ok(headers)
}
