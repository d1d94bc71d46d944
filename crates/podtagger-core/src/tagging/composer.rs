use std::path::Path;

use tracing::{debug, info};

use crate::{
    descriptor::FileDescriptor,
    error::ProcessError,
    parsing::normalize_title,
    tagging::{TagField, TagVersion},
    traits::{Recovery, TagCodec, TagStore},
};

pub const GENRE: &str = "Podcast";

/// Resultado de etiquetar un fichero de trabajo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagOutcome {
    Saved,
    Unchanged,
}

/// Decide qué campos hay que escribir en el fichero de trabajo y los escribe.
pub struct TagComposer<'a, C, R> {
    codec: &'a C,
    recovery: &'a R,
}

/// Estado de un único fichero; se crea y se descarta en cada llamada.
struct TagContext<T> {
    tags: T,
    dirty: bool,
}

impl<T: TagStore> TagContext<T> {
    /// Escribe `value` solo si el campo falta o tiene otro valor.
    fn set(&mut self, field: TagField, value: &str) {
        let current = self.tags.value(field);
        if current.as_deref() == Some(value) {
            return;
        }
        debug!(%field, old = ?current, new = value, "updating tag");
        self.tags.assign(field, value);
        self.dirty = true;
    }

    /// Escribe `value` solo si el campo no existe; cualquier valor previo se respeta.
    fn set_if_absent(&mut self, field: TagField, value: &str) {
        if self.tags.value(field).is_none() {
            self.set(field, value);
        }
    }
}

impl<'a, C, R> TagComposer<'a, C, R>
where
    C: TagCodec,
    R: Recovery,
{
    pub fn new(codec: &'a C, recovery: &'a R) -> Self {
        TagComposer { codec, recovery }
    }

    pub fn compose(&self, file: &FileDescriptor, staged: &Path) -> Result<TagOutcome, ProcessError> {
        let release_day = file.release_day()?;
        let mut dirty = false;

        if let Err(e) = self.codec.open_audio(staged) {
            info!(file = %file.input_path().display(), error = %e, "audio stream unreadable, trying recovery");
            if !self.recovery.recover(staged) {
                return Err(ProcessError::UnreadableAudio(file.input_path().to_path_buf()));
            }
            dirty = true;
        }

        let mut ctx = match self.codec.open_tags(staged)? {
            Some(tags) => TagContext { tags, dirty },
            None => TagContext {
                tags: self.codec.empty_tags(),
                dirty: true,
            },
        };

        let version = ctx.tags.version();
        if version < TagVersion::REQUIRED {
            debug!(%version, "tag container will be upgraded");
            ctx.dirty = true;
        }

        let title = match ctx.tags.value(TagField::Title) {
            Some(existing) => normalize_title(&existing),
            None => file.title_base().to_string(),
        };

        ctx.set(TagField::Genre, GENRE);
        ctx.set(TagField::Title, &format!("{}-{}", file.release_date(), title));
        ctx.set_if_absent(TagField::RecordingYear, &file.release_year());
        ctx.set(
            TagField::ReleaseDate,
            &release_day.format("%Y-%m-%dT00:00:00").to_string(),
        );
        ctx.set(TagField::Album, file.album_name());

        if !ctx.dirty {
            return Ok(TagOutcome::Unchanged);
        }
        if let Err(e) = ctx.tags.save(staged) {
            info!(file = %file.input_path().display(), error = %e, "could not save tags");
            return Err(e);
        }
        Ok(TagOutcome::Saved)
    }
}
