use podcast_rs::config::{build_model, load};
use std::path::PathBuf;

#[tokio::test]
async fn reads_toml_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("podcast.toml");
    std::fs::write(
        &path,
        r#"
transcripts = "episodes"
memory_limit = 3
neighbor_window = 1

[model]
provider = "http"
base_url = "http://localhost:9000/qa"
api_key = "hf_token"
timeout_secs = 5
"#,
    )
    .unwrap();

    let cfg = load(&path).await.unwrap();

    assert_eq!(cfg.transcripts, PathBuf::from("episodes"));
    assert_eq!(cfg.memory_limit, 3);
    assert_eq!(cfg.neighbor_window, 1);
    assert_eq!(cfg.model.provider, "http");
    assert_eq!(cfg.model.api_key.as_deref(), Some("hf_token"));
    assert_eq!(cfg.model.timeout_secs, 5);
    assert!(build_model(&cfg.model).is_ok());
}

#[tokio::test]
async fn partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("podcast.toml");
    std::fs::write(&path, "memory_limit = 2\n").unwrap();

    let cfg = load(&path).await.unwrap();

    assert_eq!(cfg.memory_limit, 2);
    assert_eq!(cfg.neighbor_window, 0);
    assert_eq!(cfg.model.provider, "mock");
}

#[tokio::test]
async fn missing_file_is_an_error() {
    assert!(load("/definitely/not/here.toml").await.is_err());
}
