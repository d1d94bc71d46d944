use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

/// Ancho máximo de la línea `Processing file ...`.
pub const LINE_LENGTH: usize = 90;

const ELLIPSIS: &str = "....";

/// `album/fichero` a partir de la ruta completa.
pub fn short_name(path: &Path) -> String {
    let file = path.file_name().map(|n| n.to_string_lossy()).unwrap_or_default();
    match path.parent().and_then(Path::file_name) {
        Some(album) => format!("{}/{}", album.to_string_lossy(), file),
        None => file.into_owned(),
    }
}

/// Recorta a [`LINE_LENGTH`] caracteres, sustituyendo el final por `....`.
fn fit_line(name: &str) -> String {
    if name.chars().count() <= LINE_LENGTH {
        return name.to_string();
    }
    let kept: String = name.chars().take(LINE_LENGTH - ELLIPSIS.len()).collect();
    format!("{kept}{ELLIPSIS}")
}

#[derive(Debug)]
pub struct FailedFile {
    pub path: PathBuf,
    pub message: String,
}

/// Totales de una ejecución.
#[derive(Debug, Default)]
pub struct RunReport {
    pub good: usize,
    pub bad: Vec<FailedFile>,
}

impl RunReport {
    pub fn bad_count(&self) -> usize {
        self.bad.len()
    }
}

/// Salida por consola de una ejecución. Es la interfaz de usuario, no el log.
pub struct ConsoleReport<W> {
    out: W,
}

impl<W: Write> ConsoleReport<W> {
    pub fn new(out: W) -> Self {
        ConsoleReport { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn processing(&mut self, path: &Path) -> io::Result<()> {
        write!(self.out, "Processing file {}", fit_line(&short_name(path)))?;
        self.out.flush()
    }

    pub fn ok(&mut self) -> io::Result<()> {
        writeln!(self.out, " - OK")
    }

    pub fn rejected(&mut self, message: &str) -> io::Result<()> {
        write!(self.out, "\n    moved to reject ??????????\n    ({message})\n")
    }

    pub fn unparsable(&mut self, message: &str) -> io::Result<()> {
        write!(self.out, "\n    ({message})\n")
    }

    pub fn ignored(&mut self, path: &Path) -> io::Result<()> {
        writeln!(self.out, "Ignoring temporary file {}", fit_line(&short_name(path)))
    }

    pub fn nothing_found(&mut self, source_dir: &Path) -> io::Result<()> {
        writeln!(self.out, "No files found in {}", source_dir.display())
    }

    pub fn summary(&mut self, report: &RunReport) -> io::Result<()> {
        write!(self.out, "Processed {} good files", report.good)?;
        if report.bad.is_empty() {
            writeln!(self.out)?;
        } else {
            writeln!(self.out, " {} bad files.", report.bad_count())?;
            writeln!(self.out, "Bad files:")?;
            for failed in &report.bad {
                writeln!(self.out, "    {} ({})", failed.path.display(), failed.message)?;
            }
        }
        writeln!(self.out, "End of run ++++++++++")?;
        self.out.flush()
    }
}
