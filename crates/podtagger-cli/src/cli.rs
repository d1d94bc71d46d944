use std::path::PathBuf;

use clap::Parser;

/// Re-tag podcast MP3 files so media players group and order them by release date.
#[derive(Parser, Debug)]
#[command(name = "podtagger", version)]
pub struct Cli {
    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Move each source file to the backup directory once it has been processed
    #[arg(short, long, alias = "remove-source_file")]
    pub remove_source_file: bool,

    /// Configuration file to use instead of the user configuration
    #[arg(short, long, value_name = "PATH", alias = "config_file")]
    pub config_file: Option<PathBuf>,
}
