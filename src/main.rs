use clap::Parser;
use daemon_common::{LogLevel, init_tracing};
use podcast_rs::{Chatbot, ConversationMemory, Library, config};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "podcast-ask", about = "Ask questions about podcast transcripts")]
struct Cli {
    /// Questions to ask, answered in order with shared memory
    #[arg(required = true)]
    questions: Vec<String>,

    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of transcript files, overrides the config
    #[arg(long)]
    transcripts: Option<PathBuf>,

    /// Neighbouring segments passed to the model, overrides the config
    #[arg(long)]
    neighbor_window: Option<usize>,

    /// Logging verbosity
    #[arg(long, default_value = "warn")]
    log_level: LogLevel,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level)?;

    let mut cfg = match &cli.config {
        Some(path) => config::load(path).await?,
        None => config::ChatConfig::default(),
    };
    if let Some(dir) = cli.transcripts {
        cfg.transcripts = dir;
    }
    if let Some(window) = cli.neighbor_window {
        cfg.neighbor_window = window;
    }

    let library = Library::load(&cfg.transcripts).await;
    let model = config::build_model(&cfg.model)?;
    let bot = Chatbot::new(library, model).with_neighbor_window(cfg.neighbor_window);
    let mut memory = ConversationMemory::new(cfg.memory_limit);

    for question in &cli.questions {
        let response = bot.ask(question, &mut memory).await?;
        println!("{}", serde_json::to_string(&response)?);
    }
    Ok(())
}
