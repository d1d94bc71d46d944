use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use podtagger_paths::fs_utils;
use tracing::{debug, info, warn};

use crate::{
    config::TaggerConfig,
    descriptor::FileDescriptor,
    error::ProcessError,
    layout::Layout,
    recovery::FfmpegRecovery,
    report::{ConsoleReport, FailedFile, RunReport},
    scan::scan_source,
    tagging::{Id3Codec, TagComposer, TagOutcome},
    traits::{Recovery, TagCodec},
};

/// Qué pasó con un fichero que no falló.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    /// Está en su sitio final con las etiquetas correctas.
    Committed(TagOutcome),
    /// Era el propio fichero de trabajo; no se toca.
    Skipped,
}

/// Procesa los ficheros de uno en uno: copia al fichero de trabajo, etiqueta
/// y lo lleva a su sitio final, o mueve el original a rechazos si algo falla.
pub struct Tagger<C = Id3Codec, R = FfmpegRecovery> {
    layout: Layout,
    remove_source: bool,
    codec: C,
    recovery: R,
}

impl Tagger {
    pub fn new(config: &TaggerConfig, remove_source: bool) -> Self {
        let layout = config.layout();
        let recovery = FfmpegRecovery::new(layout.scratch_path());
        Tagger::with_parts(layout, remove_source, Id3Codec, recovery)
    }
}

impl<C, R> Tagger<C, R>
where
    C: TagCodec,
    R: Recovery,
{
    pub fn with_parts(layout: Layout, remove_source: bool, codec: C, recovery: R) -> Self {
        Tagger {
            layout,
            remove_source,
            codec,
            recovery,
        }
    }

    /// Procesa un único fichero.
    ///
    /// Un nombre que no se puede interpretar falla sin tocar nada. Cualquier
    /// fallo posterior deja el original en rechazos y borra el fichero de trabajo.
    pub fn process_file(&self, path: &Path) -> Result<FileOutcome, ProcessError> {
        if Layout::is_staging_slot(path) {
            return Ok(FileOutcome::Skipped);
        }

        let file = FileDescriptor::parse(path)?;
        match self.stage_and_commit(&file) {
            Ok(outcome) => {
                info!(from = %path.display(), to = %self.layout.final_path(&file).display(), ?outcome, "file committed");
                Ok(FileOutcome::Committed(outcome))
            }
            Err(e) => Err(self.reject(&file, e)),
        }
    }

    fn stage_and_commit(&self, file: &FileDescriptor) -> Result<TagOutcome, ProcessError> {
        let staged = self.layout.staging_path();
        let final_path = self.layout.final_path(file);

        fs_utils::ensure_parent(&final_path)?;
        fs_utils::copy_file(file.input_path(), &staged)?;
        debug!(staged = %staged.display(), "file staged");

        let outcome = TagComposer::new(&self.codec, &self.recovery).compose(file, &staged)?;

        fs_utils::move_file(&staged, &final_path)?;
        fs_utils::copy_attributes(file.input_path(), &final_path)?;

        if self.remove_source {
            let backup = self.layout.backup_path(file);
            fs_utils::move_file(file.input_path(), &backup)?;
            debug!(backup = %backup.display(), "original moved to backup");
        }
        Ok(outcome)
    }

    /// Mueve el original a rechazos y limpia. Devuelve siempre el error original.
    fn reject(&self, file: &FileDescriptor, error: ProcessError) -> ProcessError {
        let reject = self.layout.reject_path(file);
        info!(file = %file.input_path().display(), reject = %reject.display(), %error, "file rejected");

        if let Err(e) = fs_utils::move_file(file.input_path(), &reject) {
            warn!(error = %e, "could not move file to rejects");
        }
        if let Err(e) = fs_utils::remove_if_exists(&self.layout.staging_path()) {
            warn!(error = %e, "could not remove staging file");
        }
        error
    }

    /// Procesa `files` en orden, informando por `out`, y escribe el resumen final.
    pub fn run<W: Write>(&self, files: &[PathBuf], out: &mut ConsoleReport<W>) -> io::Result<RunReport> {
        let mut report = RunReport::default();

        for path in files {
            if Layout::is_staging_slot(path) {
                out.ignored(path)?;
                continue;
            }

            out.processing(path)?;
            match self.process_file(path) {
                Ok(_) => {
                    out.ok()?;
                    report.good += 1;
                }
                Err(e) => {
                    let message = e.to_string();
                    match e {
                        ProcessError::InvalidFilenameFormat(_) => out.unparsable(&message)?,
                        _ => out.rejected(&message)?,
                    }
                    report.bad.push(FailedFile {
                        path: path.clone(),
                        message,
                    });
                }
            }
        }

        out.summary(&report)?;
        info!(good = report.good, bad = report.bad_count(), "run finished");
        Ok(report)
    }

    /// Escanea `source_dir` y procesa lo encontrado.
    pub fn run_source<W: Write>(&self, source_dir: &Path, out: &mut ConsoleReport<W>) -> io::Result<RunReport> {
        let files = scan_source(source_dir);
        if files.is_empty() {
            out.nothing_found(source_dir)?;
            return Ok(RunReport::default());
        }
        self.run(&files, out)
    }
}
