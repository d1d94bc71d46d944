use std::{
    fs::{self, FileTimes, OpenOptions},
    path::Path,
    time::{Duration, SystemTime},
};

use tracing::{Level, debug, instrument, warn};

use crate::errors::Error;

/// Asegura que la carpeta `path` existe (creándola recursivamente si hace falta).
#[instrument(level = Level::TRACE, err)]
pub fn ensure_dir(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path)?;
    Ok(())
}

/// Asegura que la carpeta padre de `path` existe.
pub fn ensure_parent(path: &Path) -> Result<(), Error> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_dir(parent),
        _ => Ok(()),
    }
}

/// Verifica que `path` es escribible (tiene permisos adecuados).
#[instrument(level = Level::TRACE, err)]
pub fn check_writable(path: &Path) -> Result<(), Error> {
    let meta = fs::metadata(path)?;
    // en Unix basta con que el owner tenga permisos de escritura:
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if meta.permissions().mode() & 0o200 == 0 {
            return Err(Error::NotWritable(path.to_path_buf()));
        }
    }
    #[cfg(not(unix))]
    {
        if meta.permissions().readonly() {
            return Err(Error::NotWritable(path.to_path_buf()));
        }
    }
    Ok(())
}

/// Copia `from` a `to` (contenido y bits de permisos), creando la carpeta destino.
#[instrument(level = Level::TRACE, err)]
pub fn copy_file(from: &Path, to: &Path) -> Result<(), Error> {
    ensure_parent(to)?;
    fs::copy(from, to)?;
    Ok(())
}

/// Mueve `from` a `to`, creando la carpeta destino.
///
/// Intenta primero un `rename`; si falla (p. ej. distinto sistema de ficheros)
/// cae a copiar + borrar el original.
#[instrument(level = Level::TRACE, err)]
pub fn move_file(from: &Path, to: &Path) -> Result<(), Error> {
    ensure_parent(to)?;
    match fs::rename(from, to) {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            debug!(%rename_err, "rename failed, falling back to copy + remove");
            fs::copy(from, to)?;
            fs::remove_file(from)?;
            Ok(())
        }
    }
}

/// Copia permisos y fechas de acceso/modificación de `from` sobre `to`.
#[instrument(level = Level::TRACE, err)]
pub fn copy_attributes(from: &Path, to: &Path) -> Result<(), Error> {
    let meta = fs::metadata(from)?;
    fs::set_permissions(to, meta.permissions())?;

    let mut times = FileTimes::new().set_modified(meta.modified()?);
    if let Ok(accessed) = meta.accessed() {
        times = times.set_accessed(accessed);
    }
    OpenOptions::new().write(true).open(to)?.set_times(times)?;
    Ok(())
}

/// Borra `path` si existe. Devuelve `true` si había algo que borrar.
pub fn remove_if_exists(path: &Path) -> Result<bool, Error> {
    if path.is_file() {
        fs::remove_file(path)?;
        return Ok(true);
    }
    Ok(false)
}

/// Borra de `dir` los ficheros `<prefix>*.<ext>` modificados hace más de `max_age`.
/// Devuelve cuántos se borraron.
#[instrument(level = Level::DEBUG, err)]
pub fn prune_older_than(dir: &Path, prefix: &str, ext: &str, max_age: Duration) -> Result<usize, Error> {
    let Some(cutoff) = SystemTime::now().checked_sub(max_age) else {
        return Ok(0);
    };

    let mut removed = 0;
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(prefix) && n.ends_with(&format!(".{ext}")));
        if !matches || !path.is_file() {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if modified < cutoff {
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => warn!(%e, path = %path.display(), "could not remove old log file"),
            }
        }
    }
    Ok(removed)
}
