use std::path::PathBuf;

use clap::{
    CommandFactory, Parser,
    builder::{
        Styles,
        styling::{AnsiColor, Effects},
    },
};
use clap_complete::{Shell, generate};

use spotstats::{cli, config, error, warning};

fn styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::White.on_default() | Effects::BOLD)
        .usage(AnsiColor::White.on_default() | Effects::BOLD)
        .literal(AnsiColor::BrightBlue.on_default())
        .placeholder(AnsiColor::BrightGreen.on_default())
}

/// Run without arguments to refresh the token, collect the stats and
/// rewrite the output file.
#[derive(Parser, Debug, Clone)]
#[clap(
  version = env!("CARGO_PKG_VERSION"),
  name=env!("CARGO_PKG_NAME"),
  bin_name=env!("CARGO_PKG_NAME"),
  about=env!("CARGO_PKG_DESCRIPTION"),
  styles=styles(),
)]
struct Cli {
    /// Credential cache file (overrides SPOTSTATS_CACHE_FILE)
    #[clap(long)]
    cache_file: Option<PathBuf>,

    /// Output file (overrides SPOTSTATS_OUTPUT_FILE)
    #[clap(long)]
    output: Option<PathBuf>,

    /// Print shell completions and exit
    #[clap(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return;
    }

    if let Err(e) = config::load_env().await {
        warning!("Cannot load .env file. Err: {}", e);
    }

    let mut settings = config::Settings::from_env();
    if let Some(path) = cli.cache_file {
        settings = settings.with_cache_file(path);
    }
    if let Some(path) = cli.output {
        settings = settings.with_output_file(path);
    }

    if let Err(e) = cli::update(&settings).await {
        error!("Update failed. Err: {}", e);
    }
}
