use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::{error::ProcessError, parsing::parse_file_name};

/// Identidad de un fichero de entrada, derivada de su ruta.
///
/// Se construye una vez por fichero y no cambia. Que `release_date` sea una
/// fecha real se comprueba aparte con [`FileDescriptor::release_day`], para que
/// un fichero con fecha imposible aún tenga rutas de rechazo.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    input_path: PathBuf,
    album_name: String,
    release_date: String,
    title_base: String,
}

impl FileDescriptor {
    /// Analiza `<album>/<fichero>.mp3`; falla si el nombre no sigue ningún formato conocido.
    pub fn parse(path: impl Into<PathBuf>) -> Result<Self, ProcessError> {
        let input_path = path.into();
        let invalid = || ProcessError::InvalidFilenameFormat(input_path.clone());

        let file_name = input_path.file_name().and_then(|n| n.to_str()).ok_or_else(invalid)?;
        let album_name = input_path
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
            .filter(|n| !n.is_empty())
            .ok_or_else(invalid)?;
        let (_, parsed) = parse_file_name(file_name).ok_or_else(invalid)?;

        Ok(FileDescriptor {
            album_name: album_name.to_string(),
            release_date: parsed.release_date,
            title_base: parsed.title_base,
            input_path,
        })
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn album_name(&self) -> &str {
        &self.album_name
    }

    /// `YYMMDD`
    pub fn release_date(&self) -> &str {
        &self.release_date
    }

    pub fn title_base(&self) -> &str {
        &self.title_base
    }

    /// `20YY`
    pub fn release_year(&self) -> String {
        format!("20{}", &self.release_date[..2])
    }

    /// `20YY-MM-DD`
    pub fn expanded_date(&self) -> String {
        format!(
            "20{}-{}-{}",
            &self.release_date[..2],
            &self.release_date[2..4],
            &self.release_date[4..]
        )
    }

    /// Nombre del fichero final: `YYMMDD-titulo.mp3`
    pub fn compact_file_name(&self) -> String {
        format!("{}-{}.mp3", self.release_date, self.title_base)
    }

    /// Nombre en copias y rechazos: `pod_20YY-MM-DD-titulo.mp3`
    pub fn expanded_file_name(&self) -> String {
        format!("pod_{}-{}.mp3", self.expanded_date(), self.title_base)
    }

    /// Fecha de publicación, con el año de dos dígitos leído como `2000 + YY`.
    pub fn release_day(&self) -> Result<NaiveDate, ProcessError> {
        let invalid = || ProcessError::InvalidReleaseDate(self.release_date.clone());
        let field = |range: std::ops::Range<usize>| self.release_date[range].parse::<u32>().map_err(|_| invalid());

        let year = 2000 + field(0..2)? as i32;
        NaiveDate::from_ymd_opt(year, field(2..4)?, field(4..6)?).ok_or_else(invalid)
    }
}
