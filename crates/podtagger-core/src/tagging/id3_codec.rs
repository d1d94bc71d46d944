use std::{fs::File, path::Path};

use id3::{ErrorKind, Tag, TagLike, Version};
use lofty::{config::ParseOptions, file::AudioFile, mpeg::MpegFile};
use tracing::{Level, instrument, trace};

use crate::{
    error::ProcessError,
    tagging::{TagField, TagVersion},
    traits::{TagCodec, TagStore},
};

/// Frames de fecha de ID3v2.3 que no existen en v2.4.
const V23_DATE_FRAMES: &[&str] = &["TYER", "TDAT", "TIME", "TRDA"];

/// `lofty` valida el flujo MPEG; `id3` lee y escribe los frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct Id3Codec;

impl TagCodec for Id3Codec {
    type Tags = Id3Tags;

    #[instrument(level = Level::TRACE, skip(self), err(level = Level::DEBUG))]
    fn open_audio(&self, path: &Path) -> Result<(), ProcessError> {
        let mut file = File::open(path)?;
        let mpeg = MpegFile::read_from(&mut file, ParseOptions::new())?;
        trace!(duration = ?mpeg.properties().duration(), "audio stream opened");
        Ok(())
    }

    #[instrument(level = Level::TRACE, skip(self), err(level = Level::DEBUG))]
    fn open_tags(&self, path: &Path) -> Result<Option<Id3Tags>, ProcessError> {
        match Tag::read_from_path(path) {
            Ok(tag) => Ok(Some(Id3Tags::from_read(tag))),
            Err(e) if matches!(e.kind, ErrorKind::NoTag) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn empty_tags(&self) -> Id3Tags {
        Id3Tags { tag: Tag::new() }
    }
}

#[derive(Debug, Clone)]
pub struct Id3Tags {
    tag: Tag,
}

impl Id3Tags {
    /// En etiquetas anteriores a v2.4 el año está en `TYER`; se lleva a `TDRC`
    /// para que el resto del código solo vea frames v2.4.
    fn from_read(mut tag: Tag) -> Self {
        if tag.version() != Version::Id3v24 && tag.get("TDRC").is_none() {
            let year = tag.get("TYER").and_then(|f| f.content().text()).map(str::to_string);
            if let Some(year) = year {
                tag.set_text("TDRC", year);
            }
        }
        Id3Tags { tag }
    }
}

impl TagStore for Id3Tags {
    fn value(&self, field: TagField) -> Option<String> {
        self.tag
            .get(field.frame_id())
            .and_then(|frame| frame.content().text())
            .map(str::to_string)
    }

    fn assign(&mut self, field: TagField, value: &str) {
        self.tag.set_text(field.frame_id(), value);
    }

    fn version(&self) -> TagVersion {
        match self.tag.version() {
            Version::Id3v22 => TagVersion(2, 2, 0),
            Version::Id3v23 => TagVersion(2, 3, 0),
            Version::Id3v24 => TagVersion(2, 4, 0),
        }
    }

    fn save(&self, path: &Path) -> Result<(), ProcessError> {
        let mut tag = self.tag.clone();
        for id in V23_DATE_FRAMES {
            tag.remove(*id);
        }
        tag.write_to_path(path, Version::Id3v24)?;
        Ok(())
    }
}
