//! Streaming file translation.

use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::core::keywords::KeywordTable;
use crate::translate::errors::TranslateError;
use crate::translate::line::LineTranslator;

/// Streams a source file through a [`LineTranslator`].
#[derive(Debug, Clone, Copy)]
pub struct FileTranslator<'t> {
    line: LineTranslator<'t>,
}

/// Which side of a stream failed.
enum StreamError {
    Read(io::Error),
    Write(io::Error),
}

impl<'t> FileTranslator<'t> {
    pub fn new(table: &'t KeywordTable) -> Self {
        FileTranslator {
            line: LineTranslator::new(table),
        }
    }

    /// Translate `input` into `output`, creating parent directories.
    ///
    /// Returns the number of lines written. On failure the output file may
    /// be left partially written.
    pub fn translate_file(&self, input: &Path, output: &Path) -> Result<usize, TranslateError> {
        let reader = File::open(input)
            .map(BufReader::new)
            .map_err(|e| TranslateError::io("open", input, e))?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .map_err(|e| TranslateError::io("create directory", parent, e))?;
        }

        let file = File::create(output).map_err(|e| TranslateError::io("create", output, e))?;

        let count = self
            .stream(reader, BufWriter::new(file))
            .map_err(|e| match e {
                StreamError::Read(e) => TranslateError::io("read", input, e),
                StreamError::Write(e) => TranslateError::io("write", output, e),
            })?;

        tracing::debug!(
            "translated {} -> {} ({} lines)",
            input.display(),
            output.display(),
            count
        );
        Ok(count)
    }

    /// Translate every line of `input` into `output`.
    ///
    /// Each line is written with a single `\n`; `\r\n` endings become `\n`.
    pub fn translate_stream<R: BufRead, W: Write>(&self, input: R, output: W) -> io::Result<usize> {
        self.stream(input, output).map_err(|e| match e {
            StreamError::Read(e) | StreamError::Write(e) => e,
        })
    }

    fn stream<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<usize, StreamError> {
        let mut line = Vec::new();
        let mut translated = Vec::new();
        let mut count = 0;

        loop {
            line.clear();
            if input.read_until(b'\n', &mut line).map_err(StreamError::Read)? == 0 {
                break;
            }
            strip_line_ending(&mut line);

            translated.clear();
            self.line.translate_into(&line, &mut translated);
            translated.push(b'\n');
            output.write_all(&translated).map_err(StreamError::Write)?;
            count += 1;
        }

        output.flush().map_err(StreamError::Write)?;
        Ok(count)
    }
}

fn strip_line_ending(line: &mut Vec<u8>) {
    if line.last() == Some(&b'\n') {
        line.pop();
        if line.last() == Some(&b'\r') {
            line.pop();
        }
    }
}
