mod composer;
mod id3_codec;

use std::fmt;

pub use composer::{TagComposer, TagOutcome};
pub use id3_codec::{Id3Codec, Id3Tags};

/// Campos de etiqueta que conocemos, con su identificador de frame ID3v2.4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagField {
    /// Definido pero nunca escrito.
    OriginalArtist,
    Genre,
    Title,
    RecordingYear,
    ReleaseDate,
    Album,
}

impl TagField {
    pub const ALL: &'static [TagField] = &[
        TagField::OriginalArtist,
        TagField::Genre,
        TagField::Title,
        TagField::RecordingYear,
        TagField::ReleaseDate,
        TagField::Album,
    ];

    pub fn frame_id(&self) -> &'static str {
        match self {
            TagField::OriginalArtist => "TOPE",
            TagField::Genre => "TCON",
            TagField::Title => "TIT2",
            TagField::RecordingYear => "TDRC",
            TagField::ReleaseDate => "TDRL",
            TagField::Album => "TALB",
        }
    }
}

impl fmt::Display for TagField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.frame_id())
    }
}

/// Versión del contenedor de etiquetas: `(mayor, menor, revisión)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TagVersion(pub u8, pub u8, pub u8);

impl TagVersion {
    /// Cualquier versión inferior se reescribe.
    pub const REQUIRED: TagVersion = TagVersion(2, 4, 0);
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.0, self.1, self.2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn versions_order_by_components() {
        assert!(TagVersion(2, 3, 0) < TagVersion::REQUIRED);
        assert!(TagVersion(2, 2, 9) < TagVersion::REQUIRED);
        assert!(TagVersion(2, 4, 1) > TagVersion::REQUIRED);
        assert_eq!(TagVersion::REQUIRED.to_string(), "2.4.0");
    }

    #[test]
    fn frame_ids() {
        let ids: Vec<_> = TagField::ALL.iter().map(TagField::frame_id).collect();
        assert_eq!(ids, ["TOPE", "TCON", "TIT2", "TDRC", "TDRL", "TALB"]);
    }
}
