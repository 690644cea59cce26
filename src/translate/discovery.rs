//! Discovery pass for directory translation.
//!
//! Walks the input root, records each source file's declared package, and
//! collects import paths that point outside the project. Nothing is
//! translated here.

use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use walkdir::{DirEntry, WalkDir};

use crate::core::syntax::{package_decl, ImportScanner};
use crate::translate::errors::TranslateError;
use crate::util::fs::{has_extension, relative_path};

/// A source file found under the input root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Path as found by the walk.
    pub path: PathBuf,
    /// Path relative to the input root.
    pub relative: PathBuf,
    /// First declared package, if any.
    pub package: Option<String>,
}

/// Result of scanning an input tree.
#[derive(Debug, Clone, Default)]
pub struct Discovery {
    /// Every source file, in walk order (sorted by file name per directory).
    pub files: Vec<SourceFile>,
    /// External import paths, sorted.
    pub external_imports: BTreeSet<String>,
}

impl Discovery {
    /// Files grouped by declared package.
    pub fn package_groups(&self) -> BTreeMap<&str, Vec<&SourceFile>> {
        let mut groups: BTreeMap<&str, Vec<&SourceFile>> = BTreeMap::new();
        for file in &self.files {
            if let Some(package) = file.package.as_deref() {
                groups.entry(package).or_default().push(file);
            }
        }
        groups
    }

    /// Files with no package declaration.
    pub fn unpackaged(&self) -> impl Iterator<Item = &SourceFile> {
        self.files.iter().filter(|f| f.package.is_none())
    }
}

/// What the discovery pass looks for.
#[derive(Debug, Clone)]
pub struct DiscoverOptions<'a> {
    /// Source extension without the dot.
    pub source_extension: &'a str,
    /// Import path prefixes treated as external.
    pub external_prefixes: &'a [String],
}

/// Scan `root` for source files.
pub fn discover(root: &Path, opts: &DiscoverOptions<'_>) -> Result<Discovery, TranslateError> {
    let mut discovery = Discovery::default();

    let walker = WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden_dir(e));

    for entry in walker {
        let entry = entry.map_err(|err| {
            let path = err.path().unwrap_or(root).to_path_buf();
            let source = err
                .into_io_error()
                .unwrap_or_else(|| io::Error::new(io::ErrorKind::Other, "filesystem loop"));
            TranslateError::io("read directory", path, source)
        })?;

        if !entry.file_type().is_file() || !has_extension(entry.path(), opts.source_extension) {
            continue;
        }

        let path = entry.into_path();
        let package = scan_file(&path, opts, &mut discovery.external_imports)?;
        tracing::debug!("found {} (package: {:?})", path.display(), package);

        discovery.files.push(SourceFile {
            relative: relative_path(root, &path),
            path,
            package,
        });
    }

    Ok(discovery)
}

/// Read a file's lines, returning its first package declaration and
/// adding any external imports to `imports`.
fn scan_file(
    path: &Path,
    opts: &DiscoverOptions<'_>,
    imports: &mut BTreeSet<String>,
) -> Result<Option<String>, TranslateError> {
    let mut reader = File::open(path)
        .map(BufReader::new)
        .map_err(|e| TranslateError::io("open", path, e))?;

    let mut package = None;
    let mut scanner = ImportScanner::new();
    let mut line = Vec::new();

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|e| TranslateError::io("read", path, e))?;
        if read == 0 {
            break;
        }

        if package.is_none() {
            package = package_decl(&line).map(|decl| decl.name.to_string());
        }

        for import in scanner.scan_line(&line) {
            if is_external(import, opts.external_prefixes) {
                imports.insert(import.to_string());
            }
        }
    }

    Ok(package)
}

fn is_external(import: &str, prefixes: &[String]) -> bool {
    prefixes.iter().any(|prefix| import.starts_with(prefix.as_str()))
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.file_type().is_dir()
        && entry
            .file_name()
            .to_str()
            .map(|name| name.starts_with('.'))
            .unwrap_or(false)
}
