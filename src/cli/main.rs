//! demo-seeder binary entry point

use clap::{Parser, Subcommand};
use demo_seeder::cli::commands::{generate, upload};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "demo-seeder",
    version,
    about = "Synthesize demo catalogue datasets and push them to index/object-store backends"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a random demo dataset and upload it to the document index
    GenerateDemo,
    /// Upload study/data-object metadata files into a CDMI container
    UploadMetadata {
        /// Provider host (IP address or domain)
        provider: String,
        /// Space name supported by the provider
        space: String,
        /// Access token
        token: String,
        /// Maximum number of files to upload per source directory
        limit: usize,
        /// Destination directory in the space; removed and recreated
        directory: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::GenerateDemo => generate::handle_generate().await,
        Command::UploadMetadata {
            provider,
            space,
            token,
            limit,
            directory,
        } => upload::handle_upload(provider, space, token, limit, directory).await,
    }
}
