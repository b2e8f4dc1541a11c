use chatd::ChatService;
use clap::Parser;
use daemon_common::{LogLevel, init_tracing, maybe_daemonize};
use podcast_rs::{Chatbot, ConversationMemory, Library, config};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "chatd", about = "Podcast question-answering HTTP daemon")]
struct Cli {
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of transcript files, overrides the config
    #[arg(long)]
    transcripts: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Logging verbosity
    #[arg(long, default_value = "info")]
    log_level: LogLevel,

    /// Run as a background daemon
    #[arg(short = 'd', long)]
    daemon: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level)?;

    maybe_daemonize(cli.daemon)?;

    let mut cfg = match &cli.config {
        Some(path) => config::load(path).await?,
        None => config::ChatConfig::default(),
    };
    if let Some(dir) = cli.transcripts {
        cfg.transcripts = dir;
    }

    let library = Library::load(&cfg.transcripts).await;
    let model = config::build_model(&cfg.model)?;
    let bot = Chatbot::new(library, model).with_neighbor_window(cfg.neighbor_window);
    let service = Arc::new(ChatService::new(bot, ConversationMemory::new(cfg.memory_limit)));

    let addr: SocketAddr = format!("{}:{}", cli.host, cli.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "chatd listening");
    axum::serve(listener, service.router()).await?;
    Ok(())
}
