use podcast_rs::Library;
use tracing_test::traced_test;

#[traced_test]
#[tokio::test]
async fn loads_txt_files_in_name_order() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("2.txt"), "https://two\n(00:00:01) second").unwrap();
    std::fs::write(dir.path().join("1.txt"), "https://one\n(00:00:01) first").unwrap();
    std::fs::write(dir.path().join("notes.md"), "https://ignored\n(00:00:01) nope").unwrap();

    let library = Library::load(dir.path()).await;

    let links: Vec<&str> = library
        .transcripts
        .iter()
        .map(|t| t.source_link.as_str())
        .collect();
    assert_eq!(links, vec!["https://one", "https://two"]);
    assert!(logs_contain("corpus loaded"));
}

#[traced_test]
#[tokio::test]
async fn missing_directory_is_logged_and_empty() {
    let dir = tempfile::tempdir().unwrap();
    let library = Library::load(dir.path().join("absent")).await;
    assert!(library.transcripts.is_empty());
    assert!(library.speakers.is_empty());
    assert!(logs_contain("cannot read transcript directory"));
}

#[traced_test]
#[tokio::test]
async fn empty_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("empty.txt"), "").unwrap();
    std::fs::write(dir.path().join("ok.txt"), "https://ok\nAlice\n(00:00:01)\nHi.").unwrap();

    let library = Library::load(dir.path()).await;

    assert_eq!(library.transcripts.len(), 1);
    assert_eq!(library.speakers.text("Alice"), Some("Hi."));
    assert!(logs_contain("skipping empty transcript"));
}

#[traced_test]
#[tokio::test]
async fn malformed_speaker_header_is_logged() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("bad.txt"), "https://bad\nAlice\n(0:00:05)\nHi.").unwrap();

    let library = Library::load(dir.path()).await;

    assert_eq!(library.transcripts.len(), 1);
    assert!(library.speakers.is_empty());
    assert!(logs_contain("bad speaker header"));
}
