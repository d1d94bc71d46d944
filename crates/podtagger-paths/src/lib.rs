//! Crate `podtagger_paths`: rutas de la aplicación y utilidades de ficheros

mod errors;
pub mod fs_utils;
mod paths;

pub use errors::Error;
pub use paths::{CONFIG_FILE_NAME, LOG_FILE_PREFIX, PodtaggerPaths, expand_home};
