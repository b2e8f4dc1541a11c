use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fixed-width `(hh:mm:ss)` marker.
pub(crate) static MARKER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\(([0-9]{2}):([0-9]{2}):([0-9]{2})\)").expect("valid regex"));

/// Wall-clock offset into a recording, written `hh:mm:ss`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timestamp {
    hours: u32,
    minutes: u32,
    seconds: u32,
}

impl Timestamp {
    /// Offset in whole seconds.
    ///
    /// ```
    /// use podcast_rs::Timestamp;
    /// let ts: Timestamp = "01:02:03".parse().unwrap();
    /// assert_eq!(ts.seconds(), 3723);
    /// ```
    pub fn seconds(&self) -> u32 {
        self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

/// Error returned when a string is not a fixed-width `hh:mm:ss` offset.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp `{0}`, expected hh:mm:ss")]
pub struct InvalidTimestamp(pub String);

impl FromStr for Timestamp {
    type Err = InvalidTimestamp;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split(':').collect();
        let well_formed = parts.len() == 3
            && parts
                .iter()
                .all(|p| p.len() == 2 && p.bytes().all(|b| b.is_ascii_digit()));
        if !well_formed {
            return Err(InvalidTimestamp(s.to_string()));
        }
        let num = |p: &str| p.parse::<u32>().map_err(|_| InvalidTimestamp(s.to_string()));
        Ok(Self {
            hours: num(parts[0])?,
            minutes: num(parts[1])?,
            seconds: num(parts[2])?,
        })
    }
}

impl TryFrom<String> for Timestamp {
    type Error = InvalidTimestamp;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timestamp> for String {
    fn from(ts: Timestamp) -> Self {
        ts.to_string()
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

/// Timestamp-keyed segments of one transcript in first-seen order.
pub type SegmentMap = IndexMap<Timestamp, String>;

/// Split `text` at every `(hh:mm:ss)` marker.
///
/// Each marker owns the trimmed text up to the next marker. Text before the
/// first marker is dropped. A repeated timestamp replaces the earlier text but
/// keeps its original position.
///
/// ```
/// use podcast_rs::segment::segment;
/// let map = segment("intro (00:00:01) hello (00:00:02) world");
/// let texts: Vec<&str> = map.values().map(String::as_str).collect();
/// assert_eq!(texts, vec!["hello", "world"]);
/// assert!(segment("no markers here").is_empty());
/// ```
pub fn segment(text: &str) -> SegmentMap {
    let mut map = SegmentMap::new();
    let markers: Vec<_> = MARKER_RE.captures_iter(text).collect();
    for (i, caps) in markers.iter().enumerate() {
        let Some(whole) = caps.get(0) else {
            continue;
        };
        let end = markers
            .get(i + 1)
            .and_then(|next| next.get(0))
            .map(|m| m.start())
            .unwrap_or(text.len());
        let ts = Timestamp {
            hours: caps[1].parse().unwrap_or_default(),
            minutes: caps[2].parse().unwrap_or_default(),
            seconds: caps[3].parse().unwrap_or_default(),
        };
        map.insert(ts, text[whole.end()..end].trim().to_string());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        s.parse().unwrap()
    }

    #[test]
    fn splits_on_markers_and_trims() {
        let map = segment("(00:00:05)\n  Welcome.  \n(00:00:10)\nThanks.\n");
        assert_eq!(map.len(), 2);
        assert_eq!(map[&ts("00:00:05")], "Welcome.");
        assert_eq!(map[&ts("00:00:10")], "Thanks.");
    }

    #[test]
    fn no_markers_yields_empty_map() {
        assert!(segment("Just talking, no timestamps at all.").is_empty());
        assert!(segment("").is_empty());
    }

    #[test]
    fn malformed_markers_are_not_recognised() {
        let map = segment("(0:00:05) lost (00:00:07) kept (00:0:09) also kept");
        assert_eq!(map.len(), 1);
        assert_eq!(map[&ts("00:00:07")], "kept (00:0:09) also kept");
    }

    #[test]
    fn repeated_timestamp_overwrites_in_place() {
        let map = segment("(00:00:01) a (00:00:02) b (00:00:01) c");
        let keys: Vec<String> = map.keys().map(ToString::to_string).collect();
        assert_eq!(keys, vec!["00:00:01", "00:00:02"]);
        assert_eq!(map[&ts("00:00:01")], "c");
    }

    #[test]
    fn trailing_marker_has_empty_text() {
        let map = segment("(00:00:01) a (00:00:02)");
        assert_eq!(map[&ts("00:00:02")], "");
    }

    #[test]
    fn non_ascii_digits_are_not_markers() {
        let map = segment("(00:00:00) real start (\u{660}\u{660}:\u{660}\u{661}:\u{660}\u{665}) arabic digits");
        assert_eq!(map.len(), 1);
        assert!(map[&ts("00:00:00")].starts_with("real start"));
    }

    #[test]
    fn timestamp_parsing_requires_fixed_width() {
        assert_eq!(ts("01:02:03").seconds(), 3723);
        assert!("1:02:03".parse::<Timestamp>().is_err());
        assert!("01:02".parse::<Timestamp>().is_err());
        assert!("aa:bb:cc".parse::<Timestamp>().is_err());
        assert_eq!(ts("99:59:59").to_string(), "99:59:59");
    }
}
