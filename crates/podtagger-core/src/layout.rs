use std::path::{Path, PathBuf};

use crate::descriptor::FileDescriptor;

/// Nombre del único fichero de trabajo compartido por toda la ejecución.
pub const STAGING_FILE_NAME: &str = "temp.mp3";

/// Salida de la herramienta de recuperación, antes de sustituir al fichero de trabajo.
pub const SCRATCH_FILE_NAME: &str = "temp-recover.mp3";

/// Raíces de salida configuradas. Todas las rutas se derivan de forma pura
/// a partir de ellas y de un [`FileDescriptor`]; nada toca el disco.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    dest_root: PathBuf,
    backup_root: PathBuf,
    reject_root: PathBuf,
}

impl Layout {
    pub fn new(dest_root: impl Into<PathBuf>, backup_root: impl Into<PathBuf>, reject_root: impl Into<PathBuf>) -> Self {
        Layout {
            dest_root: dest_root.into(),
            backup_root: backup_root.into(),
            reject_root: reject_root.into(),
        }
    }

    pub fn staging_path(&self) -> PathBuf {
        self.dest_root.join(STAGING_FILE_NAME)
    }

    pub fn scratch_path(&self) -> PathBuf {
        self.dest_root.join(SCRATCH_FILE_NAME)
    }

    /// `true` si `path` es (por nombre) el fichero de trabajo, esté donde esté.
    pub fn is_staging_slot(path: &Path) -> bool {
        path.file_name().is_some_and(|n| n == STAGING_FILE_NAME)
    }

    /// `dest/<album>/YYMMDD-titulo.mp3`
    pub fn final_path(&self, file: &FileDescriptor) -> PathBuf {
        self.dest_root.join(file.album_name()).join(file.compact_file_name())
    }

    /// `backup/<album>/pod_20YY-MM-DD-titulo.mp3`
    pub fn backup_path(&self, file: &FileDescriptor) -> PathBuf {
        self.backup_root.join(file.album_name()).join(file.expanded_file_name())
    }

    /// `reject/<album>/pod_20YY-MM-DD-titulo.mp3`
    pub fn reject_path(&self, file: &FileDescriptor) -> PathBuf {
        self.reject_root.join(file.album_name()).join(file.expanded_file_name())
    }
}
