use closest_symbol::config::Config;
use closest_symbol::host::FileHost;
use closest_symbol::mcp::server::{McpContext, McpServer};
use closest_symbol::navigator::{Navigator, cursor_from_one_based};
use closest_symbol::symbols::SymbolParser;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "closest-symbol", version, about)]
struct Cli {
    /// Path to the JSON config file (default: ./config.json)
    #[arg(long, global = true, default_value = "")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Jump to a line number or to the closest matching line in the enclosing function
    Jump {
        file: PathBuf,
        /// Cursor line (1-based)
        #[arg(long)]
        line: u32,
        /// Cursor column (1-based)
        #[arg(long, default_value_t = 1)]
        column: u32,
        /// Pattern or line number; read from stdin when omitted
        #[arg(long)]
        input: Option<String>,
    },
    /// Print the symbol tree of a file
    Symbols { file: PathBuf },
    /// Serve the navigator as MCP tools on stdio
    Serve,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // 1. Load config
    let config = Config::load(&cli.config)?;
    config.validate().context("invalid configuration")?;

    // 2. Init symbol parser
    let parser = Arc::new(
        SymbolParser::with_languages(&config.languages)
            .context("Failed to initialize symbol parser")?,
    );

    match cli.command {
        Command::Jump {
            file,
            line,
            column,
            input,
        } => {
            let input = match input {
                Some(text) => Some(text),
                None => read_prompt().await?,
            };
            let cursor = cursor_from_one_based(line, column);
            let host = FileHost::open(&file, cursor, input, parser)?;

            let outcome = Navigator::new(&host, config.navigation.clone())
                .run()
                .await?;
            debug!(?outcome, "navigation finished");

            if let Some(request) = host.last_navigation().await {
                println!("{}", serde_json::to_string_pretty(&request)?);
            }
        }
        Command::Symbols { file } => {
            let symbols = parser
                .parse_file(&file)
                .with_context(|| format!("failed to read symbols of {}", file.display()))?;
            println!("{}", serde_json::to_string_pretty(&symbols)?);
        }
        Command::Serve => {
            info!("Starting closest-symbol MCP Server...");
            let ctx = McpContext {
                config: Arc::new(config),
                parser,
            };
            McpServer::new(ctx).start().await?;
        }
    }

    Ok(())
}

/// One line from stdin; `None` on EOF.
async fn read_prompt() -> Result<Option<String>> {
    let mut line = String::new();
    let read = BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await
        .context("failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
}
