#![allow(dead_code)]

use std::{
    fs,
    path::{Path, PathBuf},
};

use podtagger_core::{FfmpegRecovery, Layout, Tagger, TaggerConfig, TaggerConfigBuilder, tagging::Id3Codec};

/// MPEG-1 Layer III, 128 kbps, 44.1 kHz, joint stereo, sin padding.
const FRAME_HEADER: [u8; 4] = [0xFF, 0xFB, 0x90, 0x64];
const FRAME_LEN: usize = 417;
const FRAMES: usize = 20;

/// Flujo MPEG mínimo: cabeceras válidas seguidas de silencio.
pub fn mp3_bytes() -> Vec<u8> {
    let mut frame = vec![0u8; FRAME_LEN];
    frame[..4].copy_from_slice(&FRAME_HEADER);
    frame.repeat(FRAMES)
}

pub fn write_mp3(path: &Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, mp3_bytes()).unwrap();
}

pub fn write_text(path: &Path, body: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, body).unwrap();
}

/// Árbol de trabajo en un directorio temporal: `src`, `dest`, `backup`, `reject`.
pub struct Sandbox {
    pub root: PathBuf,
    pub config: TaggerConfig,
}

impl Sandbox {
    pub fn new(root: &Path) -> Self {
        for dir in ["src", "dest", "backup", "reject"] {
            fs::create_dir_all(root.join(dir)).unwrap();
        }
        let config = TaggerConfigBuilder::default()
            .source_dir(root.join("src"))
            .dest_dir(root.join("dest"))
            .backup_dir(root.join("backup"))
            .reject_dir(root.join("reject"))
            .build()
            .unwrap();
        config.validate().unwrap();
        Sandbox {
            root: root.to_path_buf(),
            config,
        }
    }

    pub fn src(&self, rel: &str) -> PathBuf {
        self.config.source_dir.join(rel)
    }

    pub fn dest(&self, rel: &str) -> PathBuf {
        self.config.dest_dir.join(rel)
    }

    pub fn backup(&self, rel: &str) -> PathBuf {
        self.config.backup_dir.join(rel)
    }

    pub fn reject(&self, rel: &str) -> PathBuf {
        self.config.reject_dir.join(rel)
    }

    /// Sin `ffmpeg` real: la recuperación siempre falla de forma determinista.
    pub fn tagger(&self, remove_source: bool) -> Tagger<Id3Codec, FfmpegRecovery> {
        let layout: Layout = self.config.layout();
        let recovery = FfmpegRecovery::with_program(self.root.join("no-ffmpeg"), layout.scratch_path());
        Tagger::with_parts(layout, remove_source, Id3Codec, recovery)
    }
}

/// Lee un frame de texto con `id3`, sin pasar por el código bajo prueba.
pub fn frame_text(path: &Path, id: &str) -> Option<String> {
    use id3::TagLike;

    let tag = id3::Tag::read_from_path(path).ok()?;
    tag.get(id).and_then(|f| f.content().text()).map(str::to_string)
}
