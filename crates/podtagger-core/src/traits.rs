use std::path::Path;

use crate::{
    error::ProcessError,
    tagging::{TagField, TagVersion},
};

/// Acceso al fichero de audio y a su contenedor de etiquetas.
pub trait TagCodec {
    type Tags: TagStore;

    /// Comprueba que el flujo de audio se puede abrir.
    fn open_audio(&self, path: &Path) -> Result<(), ProcessError>;

    /// `Ok(None)` si el fichero no tiene contenedor de etiquetas.
    fn open_tags(&self, path: &Path) -> Result<Option<Self::Tags>, ProcessError>;

    fn empty_tags(&self) -> Self::Tags;
}

/// Etiquetas cargadas en memoria de un único fichero.
pub trait TagStore {
    fn value(&self, field: TagField) -> Option<String>;
    fn assign(&mut self, field: TagField, value: &str);
    fn version(&self) -> TagVersion;
    fn save(&self, path: &Path) -> Result<(), ProcessError>;
}

/// Reparación de un fichero cuyo audio no se pudo abrir.
pub trait Recovery {
    /// Intenta sustituir `staged` por una copia reparada. Nunca propaga errores.
    fn recover(&self, staged: &Path) -> bool;
}
