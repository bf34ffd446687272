mod platform;

use std::path::PathBuf;

use clap::Parser;

/// Operator console for the crawler's crawl targets and scheduler.
#[derive(Debug, Parser)]
#[command(name = "crawler_admin", version)]
struct Cli {
    /// RON config file; defaults apply when it does not exist.
    #[arg(long, default_value = platform::config::DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Overrides `base_url` from the config file.
    #[arg(long)]
    base_url: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    platform::run_app(&cli.config, cli.base_url)
}
