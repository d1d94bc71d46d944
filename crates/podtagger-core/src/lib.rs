mod config;
mod descriptor;
mod error;
mod layout;
mod lifecycle;
mod recovery;
mod report;
mod scan;

pub mod parsing;
pub mod tagging;
pub mod traits;

pub use config::{DEFAULT_CONFIG, TaggerConfig, TaggerConfigBuilder};
pub use descriptor::FileDescriptor;
pub use error::{ConfigError, ProcessError};
pub use layout::{Layout, SCRATCH_FILE_NAME, STAGING_FILE_NAME};
pub use lifecycle::{FileOutcome, Tagger};
pub use recovery::FfmpegRecovery;
pub use report::{ConsoleReport, FailedFile, LINE_LENGTH, RunReport, short_name};
pub use scan::scan_source;
