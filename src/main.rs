use anyhow::Result;
use clap::Parser;
use quickcv::cli::{handle_command, Cli};

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so `extract` and `fetch` can print JSON on stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("quickcv=info,rocket::server=off")),
        )
        .init();

    let cli = Cli::parse();
    handle_command(cli).await
}
