//! Implementation of `brgo translate`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::keywords::KeywordTable;
use crate::translate::{
    DirectoryOptions, DirectoryReport, DirectoryTranslator, FileTranslator, TranslateError,
    TranslationJob,
};
use crate::util::fs::{absolute, normalize_path};

/// Suffix appended to a directory name for its default output directory.
const DIRECTORY_OUTPUT_SUFFIX: &str = "-go";

/// Options for the translate command.
#[derive(Debug, Clone, Default)]
pub struct TranslateOptions {
    /// Output file or directory (defaults next to the input)
    pub output: Option<PathBuf>,

    /// Directory translation settings
    pub directory: DirectoryOptions,
}

/// What a translation produced.
#[derive(Debug, Clone)]
pub enum TranslateOutcome {
    File {
        input: PathBuf,
        output: PathBuf,
        lines: usize,
    },
    Directory(DirectoryReport),
}

/// Progress notifications emitted while translating a directory.
#[derive(Debug)]
pub enum TranslateEvent<'a> {
    /// Discovery finished; `files` will be written, `skipped` were left out.
    Planned { files: usize, skipped: usize },
    /// One file was written.
    Translated(&'a TranslationJob),
}

/// Translate a file or a directory tree.
pub fn translate<F>(
    table: &KeywordTable,
    input: &Path,
    opts: &TranslateOptions,
    mut on_event: F,
) -> Result<TranslateOutcome>
where
    F: FnMut(TranslateEvent<'_>),
{
    let metadata = fs::metadata(input).map_err(|e| TranslateError::io("open", input, e))?;

    if metadata.is_dir() {
        let output = opts
            .output
            .clone()
            .unwrap_or_else(|| default_directory_output(input));

        let translator = DirectoryTranslator::new(table, opts.directory.clone());
        let plan = translator.plan(input, &output)?;
        on_event(TranslateEvent::Planned {
            files: plan.jobs.len(),
            skipped: plan.skipped.len(),
        });

        let report = translator.execute(plan, |job| on_event(TranslateEvent::Translated(job)))?;
        return Ok(TranslateOutcome::Directory(report));
    }

    let output = opts
        .output
        .clone()
        .unwrap_or_else(|| default_file_output(input, &opts.directory.target_extension));

    if normalize_path(&absolute(input)) == normalize_path(&absolute(&output)) {
        bail!(
            "refusing to overwrite `{}` with its own translation\n\
             hint: pass `-o` to choose another output path",
            input.display()
        );
    }

    let lines = FileTranslator::new(table).translate_file(input, &output)?;
    Ok(TranslateOutcome::File {
        input: input.to_path_buf(),
        output,
        lines,
    })
}

/// `<input>` with its extension replaced by `target_extension`.
pub fn default_file_output(input: &Path, target_extension: &str) -> PathBuf {
    input.with_extension(target_extension)
}

/// `<input>-go`, next to the input directory.
pub fn default_directory_output(input: &Path) -> PathBuf {
    let input = normalize_path(&absolute(input));
    let name = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "brgo".to_string());
    input.with_file_name(format!("{}{}", name, DIRECTORY_OUTPUT_SUFFIX))
}
