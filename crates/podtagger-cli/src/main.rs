mod cli;
mod logging;

use std::{io, process::ExitCode};

use clap::Parser;
use podtagger_core::{ConsoleReport, Tagger, TaggerConfig};
use podtagger_paths::PodtaggerPaths;
use tracing::{error, info};

use crate::cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "run aborted");
            println!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let paths = PodtaggerPaths::new()?;
    logging::init(&paths, cli.verbose)?;
    info!(version = env!("CARGO_PKG_VERSION"), "podtagger starting");

    let config = TaggerConfig::load(cli.config_file.as_deref(), &paths)?;
    config.validate()?;
    logging::prune(&paths, config.log_retention_days);

    let tagger = Tagger::new(&config, cli.remove_source_file);
    let mut console = ConsoleReport::new(io::stdout().lock());
    tagger.run_source(&config.source_dir, &mut console)?;
    Ok(())
}
