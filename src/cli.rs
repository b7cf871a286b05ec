// src/cli.rs
use crate::core::ConfigManager;
use crate::linkedin_analysis::{extract_jobs, JobEntry, ProfileCrawler, UuidGenerator};
use crate::web::start_web_server;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "quickcv")]
#[command(about = "Extract job history from professional profile text")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(long, global = true, default_value = "config.yaml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Command {
    /// Start the HTTP API
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Extract jobs from a text file, or stdin when no file is given
    Extract { file: Option<PathBuf> },
    /// Fetch a profile through the crawling API and extract its jobs
    Fetch { url: String },
}

pub async fn handle_command(cli: Cli) -> Result<()> {
    let mut config = ConfigManager::load(&cli.config)?;

    match cli.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            start_web_server(config).await
        }

        Command::Extract { file } => {
            let text = read_input(file.as_ref()).await?;
            let jobs = extract_jobs(&text);
            info!("Extracted {} jobs", jobs.len());
            print_jobs(&jobs)
        }

        Command::Fetch { url } => {
            let crawler = ProfileCrawler::new(&config.crawler)?;
            let jobs = crawler.fetch_jobs(&url, &mut UuidGenerator).await;
            print_jobs(&jobs)
        }
    }
}

async fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read profile text from stdin")?;
            Ok(text)
        }
    }
}

fn print_jobs(jobs: &[JobEntry]) -> Result<()> {
    let json = serde_json::to_string_pretty(jobs).context("Failed to serialize jobs")?;
    println!("{}", json);
    Ok(())
}
