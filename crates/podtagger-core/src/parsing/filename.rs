use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// `pod_2024-01-30-titulo.mp3` (también `pod_24-01-30-...`)
static PREFIXED_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^pod_(?:[0-9]{2})?([0-9]{2})-([0-9]{2})-([0-9]{2})-(.*)\.mp3$").unwrap());

/// `240130-titulo.mp3`
static COMPACT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([0-9]{2})([0-9]{2})([0-9]{2})-(.*)\.mp3$").unwrap());

/// Formatos de nombre de fichero reconocidos, en orden de prueba.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilenamePattern {
    Prefixed,
    Compact,
}

/// Lo que se extrae del nombre del fichero (sin el álbum).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedName {
    /// Siempre `YYMMDD`
    pub release_date: String,
    pub title_base: String,
}

impl FilenamePattern {
    pub const ALL: &'static [FilenamePattern] = &[FilenamePattern::Prefixed, FilenamePattern::Compact];

    fn regex(&self) -> &'static Regex {
        match self {
            FilenamePattern::Prefixed => &PREFIXED_REGEX,
            FilenamePattern::Compact => &COMPACT_REGEX,
        }
    }

    /// Intenta casar el nombre completo del fichero con este formato.
    pub fn parse(&self, file_name: &str) -> Option<ParsedName> {
        self.regex().captures(file_name).map(|caps| ParsedName {
            release_date: format!("{}{}{}", group(&caps, 1), group(&caps, 2), group(&caps, 3)),
            title_base: group(&caps, 4).to_string(),
        })
    }
}

fn group<'h>(caps: &Captures<'h>, i: usize) -> &'h str {
    caps.get(i).map_or("", |m| m.as_str())
}

/// Prueba cada formato en orden y devuelve el primero que case.
pub fn parse_file_name(file_name: &str) -> Option<(FilenamePattern, ParsedName)> {
    FilenamePattern::ALL
        .iter()
        .find_map(|pattern| pattern.parse(file_name).map(|parsed| (*pattern, parsed)))
}
