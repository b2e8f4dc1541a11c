use crate::memory::DEFAULT_MEMORY_LIMIT;
use crate::qa::{AnswerModel, FirstSentence, HttpAnswerModel};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Question-answering backend settings.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ModelConfig {
    /// `"http"` for an inference endpoint or `"mock"` for the offline
    /// first-sentence model.
    pub provider: String,
    /// Endpoint receiving question-answering requests.
    pub base_url: Option<String>,
    /// Bearer token sent with each request.
    pub api_key: Option<String>,
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            provider: "mock".into(),
            base_url: None,
            api_key: None,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ChatConfig {
    /// Directory holding `*.txt` transcripts.
    pub transcripts: PathBuf,
    pub memory_limit: usize,
    /// Segments on each side of the best match passed to the model as context.
    pub neighbor_window: usize,
    pub model: ModelConfig,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            transcripts: PathBuf::from("data/transcripts"),
            memory_limit: DEFAULT_MEMORY_LIMIT,
            neighbor_window: 0,
            model: ModelConfig::default(),
        }
    }
}

/// Load a [`ChatConfig`] from a TOML file.
///
/// # Examples
///
/// ```no_run
/// # tokio_test::block_on(async {
/// let cfg = podcast_rs::config::load("podcast.toml").await.unwrap();
/// println!("{}", cfg.transcripts.display());
/// # });
/// ```
pub async fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<ChatConfig> {
    let text = tokio::fs::read_to_string(path).await?;
    Ok(toml::from_str(&text)?)
}

/// Instantiate the configured answer model.
pub fn build_model(cfg: &ModelConfig) -> anyhow::Result<Arc<dyn AnswerModel>> {
    match cfg.provider.as_str() {
        "mock" => Ok(Arc::new(FirstSentence)),
        "http" => {
            let url = cfg
                .base_url
                .clone()
                .ok_or_else(|| anyhow::anyhow!("http provider needs base_url"))?;
            Ok(Arc::new(HttpAnswerModel::new(
                url,
                cfg.api_key.clone(),
                Duration::from_secs(cfg.timeout_secs),
            )?))
        }
        other => anyhow::bail!("unsupported provider: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let cfg: ChatConfig = toml::from_str("").unwrap();
        assert_eq!(cfg, ChatConfig::default());
        assert_eq!(cfg.memory_limit, 5);
    }

    #[test]
    fn http_provider_requires_url() {
        let cfg = ModelConfig {
            provider: "http".into(),
            ..ModelConfig::default()
        };
        assert!(build_model(&cfg).is_err());
        let cfg = ModelConfig {
            provider: "carrier-pigeon".into(),
            ..ModelConfig::default()
        };
        assert!(build_model(&cfg).is_err());
        assert!(build_model(&ModelConfig::default()).is_ok());
    }
}
