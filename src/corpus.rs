use crate::segment::{SegmentMap, segment};
use crate::speaker::SpeakerIndex;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// One loaded transcript file.
#[derive(Debug, Clone, PartialEq)]
pub struct Transcript {
    /// File name the transcript was read from.
    pub name: String,
    /// Recording URL taken from the first line.
    pub source_link: String,
    pub body: String,
    pub segments: SegmentMap,
}

impl Transcript {
    pub fn new(name: impl Into<String>, source_link: impl Into<String>, body: impl Into<String>) -> Self {
        let body = body.into();
        let segments = segment(&body);
        Self {
            name: name.into(),
            source_link: source_link.into(),
            body,
            segments,
        }
    }

    /// Split file contents into the link line and the body.
    ///
    /// Returns `None` for empty files.
    pub fn parse(name: impl Into<String>, contents: &str) -> Option<Self> {
        let mut lines = contents.lines();
        let link = lines.next()?.trim();
        let body = lines.collect::<Vec<_>>().join("\n");
        Some(Self::new(name, link, body))
    }
}

/// Every transcript plus the speaker index built from them.
#[derive(Debug, Clone, Default)]
pub struct Library {
    pub transcripts: Vec<Transcript>,
    pub speakers: SpeakerIndex,
}

impl Library {
    /// Index speakers across `transcripts` in order.
    ///
    /// A transcript with malformed speaker headers is logged and contributes
    /// no speakers; its segments are still searchable.
    pub fn new(transcripts: Vec<Transcript>) -> Self {
        let mut speakers = SpeakerIndex::default();
        for t in &transcripts {
            match SpeakerIndex::build(&t.body) {
                Ok(index) => speakers.merge(index),
                Err(e) => error!(transcript = %t.name, error = %e, "bad speaker header"),
            }
        }
        Self {
            transcripts,
            speakers,
        }
    }

    /// Read every `*.txt` file in `dir`, sorted by file name.
    ///
    /// A missing directory yields an empty library. Unreadable or empty files
    /// are skipped.
    pub async fn load<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let mut entries = match tokio::fs::read_dir(dir).await {
            Ok(e) => e,
            Err(e) => {
                error!(dir = %dir.display(), error = %e, "cannot read transcript directory");
                return Self::default();
            }
        };
        let mut paths = Vec::new();
        loop {
            match entries.next_entry().await {
                Ok(Some(entry)) => {
                    let path = entry.path();
                    if path.extension().is_some_and(|ext| ext == "txt") {
                        paths.push(path);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "error listing transcripts");
                    break;
                }
            }
        }
        paths.sort();

        let mut transcripts = Vec::with_capacity(paths.len());
        for path in paths {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let contents = match tokio::fs::read_to_string(&path).await {
                Ok(c) => c,
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unreadable transcript");
                    continue;
                }
            };
            match Transcript::parse(name, &contents) {
                Some(t) => {
                    debug!(transcript = %t.name, segments = t.segments.len(), "loaded transcript");
                    transcripts.push(t);
                }
                None => warn!(file = %path.display(), "skipping empty transcript"),
            }
        }
        let library = Self::new(transcripts);
        info!(
            transcripts = library.transcripts.len(),
            speakers = library.speakers.len(),
            "corpus loaded"
        );
        library
    }

    /// Segment maps in load order.
    pub fn segment_maps(&self) -> Vec<SegmentMap> {
        self.transcripts.iter().map(|t| t.segments.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_line_is_the_link() {
        let t = Transcript::parse("ep1.txt", "https://youtu.be/abc\nAlice\n(00:00:05)\nHi.").unwrap();
        assert_eq!(t.source_link, "https://youtu.be/abc");
        assert_eq!(t.body, "Alice\n(00:00:05)\nHi.");
        assert_eq!(t.segments.len(), 1);
    }

    #[test]
    fn empty_file_is_rejected() {
        assert!(Transcript::parse("empty.txt", "").is_none());
    }

    #[test]
    fn link_only_file_has_no_segments() {
        let t = Transcript::parse("x.txt", "https://x/y\n").unwrap();
        assert!(t.body.is_empty());
        assert!(t.segments.is_empty());
    }

    #[test]
    fn malformed_headers_only_drop_that_transcripts_speakers() {
        let lib = Library::new(vec![
            Transcript::new("a", "https://a", "Alice\n(0:05)\nHi."),
            Transcript::new("b", "https://b", "Bob\n(00:00:01)\nHello."),
        ]);
        assert_eq!(lib.speakers.names().collect::<Vec<_>>(), vec!["Bob"]);
        assert_eq!(lib.transcripts.len(), 2);
    }
}
