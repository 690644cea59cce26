//! Translation error types.

use std::io;
use std::path::{Path, PathBuf};

use miette::Diagnostic;
use thiserror::Error;

/// Error raised while translating a file or directory.
#[derive(Debug, Error, Diagnostic)]
pub enum TranslateError {
    #[error("`{}` does not exist", .path.display())]
    #[diagnostic(code(brgo::translate::not_found))]
    NotFound { path: PathBuf },

    #[error("failed to {action} `{}`", .path.display())]
    #[diagnostic(code(brgo::translate::io))]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("`{}` is not a directory", .path.display())]
    #[diagnostic(
        code(brgo::translate::not_a_directory),
        help("Pass a `.brgo` file to translate a single file")
    )]
    NotADirectory { path: PathBuf },

    #[error(
        "`{}` and `{}` would both be written to `{}`",
        .first.display(),
        .second.display(),
        .output.display()
    )]
    #[diagnostic(
        code(brgo::translate::output_collision),
        help("Rename one of the files, or translate with `--layout package` or `--layout mirror`")
    )]
    OutputCollision {
        output: PathBuf,
        first: PathBuf,
        second: PathBuf,
    },
}

impl TranslateError {
    /// Wrap an I/O failure, mapping a missing path to [`TranslateError::NotFound`].
    pub fn io(action: &'static str, path: impl AsRef<Path>, source: io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        if source.kind() == io::ErrorKind::NotFound && action == "open" {
            TranslateError::NotFound { path }
        } else {
            TranslateError::Io {
                action,
                path,
                source,
            }
        }
    }

    /// The path the failing operation was working on.
    pub fn path(&self) -> &Path {
        match self {
            TranslateError::NotFound { path }
            | TranslateError::Io { path, .. }
            | TranslateError::NotADirectory { path } => path,
            TranslateError::OutputCollision { output, .. } => output,
        }
    }
}
