use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use derive_builder::Builder;
use podtagger_paths::{PodtaggerPaths, expand_home};
use serde::Deserialize;
use tracing::{debug, info};

use crate::{error::ConfigError, layout::Layout};

/// Configuración por defecto, incluida en el binario.
pub const DEFAULT_CONFIG: &str = include_str!("../data/podtagger.ini");

/// Sección del INI que contiene nuestras claves.
const SECTION: &str = "podtagger";

/// Tal como viene del INI, antes de expandir `~`.
#[derive(Debug, Deserialize)]
struct RawConfig {
    source_dir: String,
    dest_dir: String,
    backup_dir: String,
    reject_dir: String,
    log_retention_days: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Builder)]
#[builder(setter(into))]
pub struct TaggerConfig {
    /// Carpeta de descargas: `source_dir/<album>/<fichero>.mp3`
    pub source_dir: PathBuf,
    pub dest_dir: PathBuf,
    pub backup_dir: PathBuf,
    pub reject_dir: PathBuf,
    /// Días que se conservan los ficheros de log
    #[builder(default = "7")]
    pub log_retention_days: u32,
}

impl From<RawConfig> for TaggerConfig {
    fn from(raw: RawConfig) -> Self {
        TaggerConfig {
            source_dir: expand_home(&raw.source_dir),
            dest_dir: expand_home(&raw.dest_dir),
            backup_dir: expand_home(&raw.backup_dir),
            reject_dir: expand_home(&raw.reject_dir),
            log_retention_days: raw.log_retention_days,
        }
    }
}

impl TaggerConfig {
    /// Carga la configuración de la forma en que lo hace la CLI:
    /// - con `explicit`, solo ese fichero (que debe existir);
    /// - sin él, los valores por defecto sobreescritos por el fichero del usuario,
    ///   que se crea a partir de los valores por defecto si aún no existe.
    pub fn load(explicit: Option<&Path>, paths: &PodtaggerPaths) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) => Self::from_file(path),
            None => {
                paths.install_default_config(DEFAULT_CONFIG)?;
                Self::from_user_file(&paths.config_file)
            }
        }
    }

    /// Lee únicamente `path`.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConfigError::ConfigFileMissing(path.to_path_buf()));
        }

        let cfg = Config::builder()
            .add_source(File::new(&path.to_string_lossy(), FileFormat::Ini))
            .build()?;
        let raw = cfg.get::<RawConfig>(SECTION)?;
        debug!(path = %path.display(), "configuration loaded");
        Ok(raw.into())
    }

    /// Valores por defecto y, encima, `user_file` si existe.
    pub fn from_user_file(user_file: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let user_file = user_file.as_ref();
        let cfg = Config::builder()
            .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Ini))
            .add_source(File::new(&user_file.to_string_lossy(), FileFormat::Ini).required(false))
            .build()?;
        let raw = cfg.get::<RawConfig>(SECTION)?;
        debug!(path = %user_file.display(), "configuration loaded over defaults");
        Ok(raw.into())
    }

    /// Las cuatro raíces deben existir y ser directorios.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for dir in [&self.source_dir, &self.dest_dir, &self.backup_dir, &self.reject_dir] {
            if !dir.is_dir() {
                return Err(ConfigError::ConfigDirectoryMissing(dir.clone()));
            }
        }
        info!(source = %self.source_dir.display(), dest = %self.dest_dir.display(), "configuration validated");
        Ok(())
    }

    pub fn layout(&self) -> Layout {
        Layout::new(&self.dest_dir, &self.backup_dir, &self.reject_dir)
    }
}
