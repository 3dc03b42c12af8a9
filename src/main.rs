use anyhow::Result;
use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use storyforge::ai::GeminiClient;
use storyforge::client::StoryClient;
use storyforge::models::Config;
use storyforge::orchestrator::ChapterOrchestrator;
use storyforge::server;
use storyforge::terminal::StoryDesk;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "storyforge")]
#[command(about = "Co-write stories chapter by chapter with an LLM")]
struct CliArgs {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the chapter generation server (default).
    Serve {
        /// Address to bind, overrides STORYFORGE_BIND.
        #[arg(long, value_name = "ADDR")]
        bind: Option<SocketAddr>,
    },
    /// Write a story interactively against a running server.
    Write {
        /// Base URL of the chapter generation server.
        #[arg(long, default_value = "http://127.0.0.1:3000")]
        server: String,
        /// Directory that downloaded stories are written to.
        #[arg(long, value_name = "DIR", default_value = ".")]
        out_dir: PathBuf,
    },
}

async fn serve(bind: Option<SocketAddr>) -> Result<()> {
    let config = Config::from_env()?;
    let provider = GeminiClient::from_config(&config);
    info!("Generation provider: Gemini (model: {})", provider.model());

    let orchestrator = ChapterOrchestrator::new(Arc::new(provider))
        .with_context_chapters(config.context_chapters);

    let addr = bind.unwrap_or(config.bind_addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    server::serve(listener, server::router(orchestrator)).await?;
    Ok(())
}

async fn write(server: String, out_dir: PathBuf) -> Result<()> {
    let mut desk = StoryDesk::new(StoryClient::new(&server), out_dir, std::io::stdout());
    desk.run(tokio::io::BufReader::new(tokio::io::stdin())).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "storyforge=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = CliArgs::parse();

    let outcome = match args.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => {
            info!("Starting storyforge server");
            serve(bind).await
        }
        Command::Write { server, out_dir } => write(server, out_dir).await,
    };

    if let Err(e) = outcome {
        error!("storyforge failed: {}", e);
        std::process::exit(1);
    }
    Ok(())
}
