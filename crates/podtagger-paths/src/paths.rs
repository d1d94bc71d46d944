use std::{env, fs, path::PathBuf};

use directories::{BaseDirs, ProjectDirs};
use tracing::info;

use crate::{errors::Error, fs_utils};

/// Nombre de la ENV var para override de ruta base (modo “portable”)
const ENV_BASE_DIR: &str = "PODTAGGER_BASE_DIR";

/// Nombre del fichero de configuración del usuario
pub const CONFIG_FILE_NAME: &str = "podtagger.ini";

/// Prefijo de los ficheros de log diarios
pub const LOG_FILE_PREFIX: &str = "podtagger-";

/// Contenedor de las rutas propias de la aplicación
#[derive(Debug, Clone)]
pub struct PodtaggerPaths {
    // config_dir
    pub config_dir: PathBuf,
    pub config_file: PathBuf,

    // data_dir
    pub data_dir: PathBuf,
    pub logs_dir: PathBuf,
}

impl PodtaggerPaths {
    pub fn new() -> Result<Self, Error> {
        let (config_dir, data_dir) = if let Ok(base) = env::var(ENV_BASE_DIR) {
            let b = PathBuf::from(base);
            (b.join("config"), b.join("data"))
        } else {
            let proj = ProjectDirs::from("net", "dmlane", "podtagger").ok_or(Error::NoHome)?;
            (proj.config_dir().to_path_buf(), proj.data_dir().to_path_buf())
        };

        let paths = PodtaggerPaths {
            config_file: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
            logs_dir: data_dir.join("logs"),
            data_dir,
        };

        paths.ensure_structure()?;
        paths.validate_structure()?;

        Ok(paths)
    }

    /// Ruta del fichero de log para un día concreto (`YYYY-MM-DD`).
    pub fn log_file(&self, day: &str) -> PathBuf {
        self.logs_dir.join(format!("{LOG_FILE_PREFIX}{day}.log"))
    }

    /// Escribe `contents` como configuración de usuario si todavía no existe.
    /// Devuelve `true` si se creó el fichero.
    pub fn install_default_config(&self, contents: &str) -> Result<bool, Error> {
        if self.config_file.exists() {
            return Ok(false);
        }
        fs_utils::ensure_parent(&self.config_file)?;
        fs::write(&self.config_file, contents)?;
        info!(path = %self.config_file.display(), "created user configuration from defaults");
        Ok(true)
    }
}

impl PodtaggerPaths {
    /// Se asegura de que los dirs básicos existen.
    pub fn ensure_structure(&self) -> Result<(), Error> {
        fs_utils::ensure_dir(&self.config_dir)?;
        fs_utils::ensure_dir(&self.data_dir)?;
        fs_utils::ensure_dir(&self.logs_dir)?;
        Ok(())
    }

    /// Valida que cada ruta existe Y es escribible. Si falta, la intenta crear.
    pub fn validate_structure(&self) -> Result<(), Error> {
        for dir in [&self.config_dir, &self.data_dir, &self.logs_dir] {
            if !dir.exists() {
                fs_utils::ensure_dir(dir)?;
            }
            fs_utils::check_writable(dir)?;
        }
        Ok(())
    }
}

/// Expande un `~` inicial al directorio personal del usuario.
pub fn expand_home(raw: &str) -> PathBuf {
    let home = || BaseDirs::new().map(|b| b.home_dir().to_path_buf());

    if raw == "~" {
        return home().unwrap_or_else(|| PathBuf::from(raw));
    }
    match raw.strip_prefix("~/") {
        Some(rest) => match home() {
            Some(h) => h.join(rest),
            None => PathBuf::from(raw),
        },
        None => PathBuf::from(raw),
    }
}

