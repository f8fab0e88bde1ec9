use std::io::{self, Write};

use anyhow::{Context, Result};
use clap::Parser;

use lah::cli::Cli;
use lah::{list, Config};

/// Environment variable holding the log filter, e.g. `LAH_LOG=debug`.
const LOG_ENV: &str = "LAH_LOG";

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::new().filter_or(LOG_ENV, default))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.no_color {
        console::set_colors_enabled(false);
    }

    let mut config = Config::load().context("failed to load configuration")?;
    cli.apply(&mut config);

    let listing = list(&cli.options(), &config)?;
    if let Some(text) = listing.output() {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text).context("failed to write output")?;
    }
    Ok(())
}
