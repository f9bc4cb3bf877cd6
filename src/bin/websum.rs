//! CLI binary for websum.
//!
//! A thin shim over the library crate: maps CLI flags to a
//! `SummarizeConfig` and either runs one summarization to stdout/PDF or
//! starts the interactive web front end.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use websum::{render_pdf_to_path, run_server, summarize, SummarizeConfig};

#[derive(Parser)]
#[command(
    name = "websum",
    version,
    about = "Summarize web pages with a locally hosted LLM",
    after_help = "Examples:\n  \
        websum summarize https://example.com/article\n  \
        websum summarize https://example.com/article -o summary.pdf\n  \
        websum serve --port 8080"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize one URL and print the result (or write a PDF)
    Summarize {
        /// URL of the page to summarize
        url: String,

        /// Write the summary as a PDF to this path instead of printing it
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        model: ModelArgs,
    },

    /// Run the interactive web front end
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind
        #[arg(long, default_value_t = 8080)]
        port: u16,

        #[command(flatten)]
        model: ModelArgs,
    },
}

/// Flags shared by both subcommands, mapped onto the config builder.
#[derive(Args)]
struct ModelArgs {
    /// Ollama model identifier
    #[arg(long, env = "WEBSUM_MODEL", default_value = "llama3:instruct")]
    model: String,

    /// Base URL of the Ollama server
    #[arg(
        long,
        env = "WEBSUM_OLLAMA_URL",
        default_value = "http://localhost:11434"
    )]
    ollama_url: String,

    /// Maximum words per chunk
    #[arg(long, default_value_t = 500)]
    chunk_words: usize,

    /// Page-fetch timeout in seconds
    #[arg(long, default_value_t = 10)]
    fetch_timeout: u64,

    /// Per-chunk generation timeout in seconds
    #[arg(long, default_value_t = 120)]
    api_timeout: u64,
}

impl ModelArgs {
    fn into_config(self) -> Result<SummarizeConfig> {
        SummarizeConfig::builder()
            .model(self.model)
            .ollama_base_url(self.ollama_url)
            .max_chunk_words(self.chunk_words)
            .fetch_timeout_secs(self.fetch_timeout)
            .api_timeout_secs(self.api_timeout)
            .build()
            .context("invalid configuration")
    }
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("websum=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Summarize { url, output, model } => {
            let config = model.into_config()?;
            let result = summarize(&url, &config)
                .await
                .with_context(|| format!("failed to summarize {url}"))?;

            match output {
                Some(path) => {
                    render_pdf_to_path(&result.summary, &path)?;
                    eprintln!("Wrote {}", path.display());
                }
                None => println!("{}", result.summary),
            }

            eprintln!(
                "chunks: {} ok / {} failed, {} source words, {} ms total",
                result.stats.summarized_chunks,
                result.stats.failed_chunks,
                result.stats.source_words,
                result.stats.total_duration_ms
            );
            Ok(())
        }

        Command::Serve { host, port, model } => {
            let config = model.into_config()?;
            run_server(&host, port, config)
                .await
                .context("server failed")
        }
    }
}
