//! ASR CLI - Command line tool for array space growth reporting.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "asr-cli",
    version,
    about = "Storage array 90-day space growth reporting"
)]
struct Cli {
    #[command(subcommand)]
    command: asr_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    asr_cmd::run(cli.command).await
}
