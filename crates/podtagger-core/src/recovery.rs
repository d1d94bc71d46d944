use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};

use podtagger_paths::fs_utils;
use tracing::{debug, info, warn};

use crate::{error::ProcessError, traits::Recovery};

pub const DEFAULT_TOOL: &str = "ffmpeg";

/// Recodifica el fichero de trabajo con `ffmpeg -y -i <staged> <scratch>`.
#[derive(Debug, Clone)]
pub struct FfmpegRecovery {
    program: PathBuf,
    scratch: PathBuf,
}

impl FfmpegRecovery {
    pub fn new(scratch: impl Into<PathBuf>) -> Self {
        Self::with_program(DEFAULT_TOOL, scratch)
    }

    /// Igual que [`FfmpegRecovery::new`] pero con otro ejecutable.
    pub fn with_program(program: impl Into<PathBuf>, scratch: impl Into<PathBuf>) -> Self {
        FfmpegRecovery {
            program: program.into(),
            scratch: scratch.into(),
        }
    }

    fn tool_name(&self) -> String {
        self.program.display().to_string()
    }

    fn try_recover(&self, staged: &Path) -> Result<(), ProcessError> {
        let output = Command::new(&self.program)
            .arg("-y")
            .arg("-i")
            .arg(staged)
            .arg(&self.scratch)
            .output()
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotFound => ProcessError::MissingRecoveryTool(self.tool_name()),
                _ => ProcessError::Io(e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_line = stderr.lines().last().unwrap_or_default().trim().to_string();
            return Err(ProcessError::RecoveryFailed {
                tool: self.tool_name(),
                reason: format!("{} {}", output.status, last_line).trim_end().to_string(),
            });
        }
        if !self.scratch.is_file() {
            return Err(ProcessError::RecoveryFailed {
                tool: self.tool_name(),
                reason: format!("no output written to {}", self.scratch.display()),
            });
        }

        fs_utils::move_file(&self.scratch, staged)?;
        Ok(())
    }
}

impl Recovery for FfmpegRecovery {
    fn recover(&self, staged: &Path) -> bool {
        info!(file = %staged.display(), tool = %self.tool_name(), "trying to recover audio stream");
        match self.try_recover(staged) {
            Ok(()) => {
                info!(file = %staged.display(), "audio stream recovered");
                true
            }
            Err(e) => {
                match &e {
                    ProcessError::MissingRecoveryTool(_) => info!(error = %e, "recovery skipped"),
                    _ => info!(file = %staged.display(), error = %e, "recovery failed"),
                }
                match fs_utils::remove_if_exists(&self.scratch) {
                    Ok(removed) => debug!(removed, "scratch file cleaned up"),
                    Err(cleanup) => warn!(error = %cleanup, "could not remove scratch file"),
                }
                false
            }
        }
    }
}
