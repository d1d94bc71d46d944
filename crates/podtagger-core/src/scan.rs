use std::path::{Path, PathBuf};

use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

fn is_mp3(entry: &DirEntry) -> bool {
    entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "mp3")
}

/// Devuelve, ordenados, los ficheros `source_dir/*/*.mp3`.
///
/// Exactamente dos niveles; los nombres que empiezan por `.` se ignoran y los
/// enlaces simbólicos se siguen, igual que haría un glob de la shell.
pub fn scan_source(source_dir: &Path) -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = WalkDir::new(source_dir)
        .follow_links(true)
        .min_depth(1)
        .max_depth(2)
        .into_iter()
        .filter_entry(|e| !is_hidden(e))
        .filter_map(|entry| match entry {
            Ok(e) => Some(e),
            Err(err) => {
                warn!(error = %err, "skipping unreadable entry");
                None
            }
        })
        .filter(|e| e.depth() == 2 && is_mp3(e))
        .map(DirEntry::into_path)
        .collect();

    files.sort();
    debug!(count = files.len(), source = %source_dir.display(), "scan finished");
    files
}
