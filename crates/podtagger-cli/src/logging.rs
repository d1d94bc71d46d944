use std::{fs::OpenOptions, io, sync::Mutex, time::Duration};

use anyhow::Context;
use chrono::Local;
use podtagger_paths::{LOG_FILE_PREFIX, PodtaggerPaths, fs_utils};
use tracing::{debug, level_filters::LevelFilter, warn};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Filtro de la salida por stderr: `RUST_LOG` si está definido, si no `warn` (o `debug` con `--verbose`).
fn stderr_filter(verbose: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(if verbose { "debug" } else { "warn" }))
}

/// Instala el subscriber global: stderr y un fichero diario en `logs_dir`.
pub fn init(paths: &PodtaggerPaths, verbose: bool) -> anyhow::Result<()> {
    let day = Local::now().format("%Y-%m-%d").to_string();
    let log_path = paths.log_file(&day);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("cannot open log file {}", log_path.display()))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_filter(stderr_filter(verbose)))
        .with(
            fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .with_filter(LevelFilter::INFO),
        )
        .try_init()?;

    debug!(path = %log_path.display(), "logging initialised");
    Ok(())
}

/// Borra los logs con más de `retention_days` días. Un fallo aquí no detiene la ejecución.
pub fn prune(paths: &PodtaggerPaths, retention_days: u32) {
    let max_age = Duration::from_secs(u64::from(retention_days) * SECONDS_PER_DAY);
    match fs_utils::prune_older_than(&paths.logs_dir, LOG_FILE_PREFIX, "log", max_age) {
        Ok(removed) => debug!(removed, retention_days, "old log files pruned"),
        Err(e) => warn!(error = %e, "could not prune old log files"),
    }
}
