//! ccloud - browse the CCloud movie and series catalog
//!
//! # Usage
//!
//! ```bash
//! ccloud init --api-key <KEY>
//! ccloud movies --sort imdb --pages 2
//! ccloud search "dark" --json
//! ccloud info 42
//! ```

use clap::Parser;
use tracing_subscriber::EnvFilter;

use ccloud_browse::cli::{Cli, Command, ExitCode, Output};
use ccloud_browse::commands::{self, Context};

#[tokio::main]
async fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let exit_code = run_cli(cli).await;
    exit_code.into()
}

/// Log to stderr. RUST_LOG wins over `--verbose`.
fn init_logging(verbose: bool) {
    let default = if verbose { "ccloud_browse=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Run CLI command and return exit code
async fn run_cli(cli: Cli) -> ExitCode {
    let output = Output::new(&cli);

    // init creates the file, so there is nothing to load yet
    if let Command::Init(cmd) = &cli.command {
        return commands::init_cmd(cmd, cli.config.as_deref(), &output);
    }

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
    };

    let ctx = match Context::from_config(&config) {
        Ok(ctx) => ctx,
        Err(e) => return output.error(format!("{:#}", e), ExitCode::InvalidArgs),
    };

    match cli.command {
        Command::Movies(cmd) => commands::movies_cmd(cmd, &ctx, &output).await,
        Command::Series(cmd) => commands::series_cmd(cmd, &ctx, &output).await,
        Command::Country(cmd) => commands::country_cmd(cmd, &ctx, &output).await,
        Command::Search(cmd) => commands::search_cmd(cmd, &ctx, &output).await,
        Command::Info(cmd) => commands::info_cmd(cmd, &ctx, &output).await,
        Command::Home(cmd) => commands::home_cmd(cmd, &ctx, &output).await,
        Command::Genres => commands::genres_cmd(&ctx, &output).await,
        Command::Countries => commands::countries_cmd(&ctx, &output).await,
        Command::Init(_) => ExitCode::Success,
    }
}
