use std::path::PathBuf;

use thiserror::Error;

/// Errores que afectan a un único fichero. Nunca abortan la ejecución completa:
/// el controlador los captura, mueve el original a rechazos y sigue.
#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("{} - invalid file-name format", .0.display())]
    InvalidFilenameFormat(PathBuf),

    #[error("Invalid release date: {0}")]
    InvalidReleaseDate(String),

    #[error("{} is not a valid MP3", .0.display())]
    UnreadableAudio(PathBuf),

    #[error("recovery tool `{0}` not found")]
    MissingRecoveryTool(String),

    #[error("recovery tool `{tool}` failed: {reason}")]
    RecoveryFailed { tool: String, reason: String },

    #[error("audio error: {0}")]
    Audio(#[from] lofty::error::LoftyError),

    #[error("ID3 error: {0}")]
    Tag(#[from] id3::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Paths(#[from] podtagger_paths::Error),
}

/// Errores fatales para toda la ejecución; se detectan antes de tocar ningún fichero.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("File/directory not found: '{}'", .0.display())]
    ConfigDirectoryMissing(PathBuf),

    #[error("File/directory not found: '{}'", .0.display())]
    ConfigFileMissing(PathBuf),

    #[error("Configuration parse error: {0}")]
    Parse(#[from] config::ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Paths(#[from] podtagger_paths::Error),
}
