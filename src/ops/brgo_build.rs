//! Implementation of `brgo build` and `brgo run`.
//!
//! Both translate into a scoped temporary directory and hand the result to
//! the Go toolchain. The temporary directory is removed when the operation
//! returns, whether it succeeded or not.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tempfile::TempDir;

use crate::core::keywords::KeywordTable;
use crate::translate::{
    DirectoryOptions, DirectoryReport, DirectoryTranslator, FileTranslator, TranslateError,
};
use crate::util::fs::{absolute, normalize_path, relative_path};
use crate::util::process::{find_go, ProcessBuilder};

/// Prefix of every temporary directory brgo creates.
pub const TEMP_PREFIX: &str = "brgo_";

/// Subdirectory of the temporary directory holding translated sources.
const SOURCE_DIR: &str = "src";

/// Subdirectory of the temporary directory holding `brgo run` executables.
const BIN_DIR: &str = "bin";

/// Canonical name of the entry-point package.
const MAIN_PACKAGE: &str = "main";

/// Options for the build and run commands.
#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    /// Output binary (defaults to the input path without extension)
    pub output: Option<PathBuf>,

    /// Parent directory for the temporary translation
    pub temp_dir: Option<PathBuf>,

    /// Explicit `go` binary
    pub go: Option<PathBuf>,

    /// Directory translation settings
    pub directory: DirectoryOptions,
}

/// Result of a successful build.
#[derive(Debug, Clone)]
pub struct BuildResult {
    /// The compiled executable.
    pub binary: PathBuf,

    /// Number of source files translated.
    pub translated: usize,
}

/// Sources translated into a temporary directory, ready for `go build`.
struct Staged {
    /// Directory `go build` runs in.
    work_dir: PathBuf,
    /// Package or file argument passed to `go build`.
    target: String,
    translated: usize,
}

/// Build `input` into an executable.
pub fn build(table: &KeywordTable, input: &Path, opts: &BuildOptions) -> Result<BuildResult> {
    let go = locate_go(opts)?;
    let tmp = temp_dir(opts)?;

    let binary = absolute(
        &opts
            .output
            .clone()
            .unwrap_or_else(|| default_binary_path(input)),
    );

    let staged = stage(table, input, &tmp.path().join(SOURCE_DIR), &opts.directory)?;
    compile(&go, &staged, &binary)?;

    Ok(BuildResult {
        binary,
        translated: staged.translated,
    })
}

/// Build `input` into a temporary executable and run it with `args`.
///
/// Returns the program's exit code. Standard streams are inherited.
pub fn run(table: &KeywordTable, input: &Path, args: &[String], opts: &BuildOptions) -> Result<i32> {
    let go = locate_go(opts)?;
    let tmp = temp_dir(opts)?;

    let staged = stage(table, input, &tmp.path().join(SOURCE_DIR), &opts.directory)?;
    let bin_dir = tmp.path().join(BIN_DIR);
    fs::create_dir_all(&bin_dir)
        .with_context(|| format!("failed to create `{}`", bin_dir.display()))?;
    let binary = bin_dir.join(binary_name(input));
    compile(&go, &staged, &binary)?;

    let status = ProcessBuilder::new(&binary).args(args).status()?;
    tracing::debug!("{} exited with {}", binary.display(), status);

    // A signal-terminated child has no code; report it as a plain failure.
    Ok(status.code().unwrap_or(1))
}

/// Default output for `brgo build`: the input without its extension for a
/// file, the directory's own name inside it for a directory.
pub fn default_binary_path(input: &Path) -> PathBuf {
    if input.is_dir() {
        input.join(binary_name(input))
    } else {
        input.with_extension(std::env::consts::EXE_EXTENSION)
    }
}

/// Report the Go toolchain in use: its path and `go version` output.
pub fn toolchain_version(configured: Option<&Path>) -> Result<(PathBuf, String)> {
    let go = find_go(configured).context("no Go toolchain found")?;
    let output = ProcessBuilder::new(&go).arg("version").exec_and_check()?;
    let version = String::from_utf8_lossy(&output.stdout).trim().to_string();
    Ok((go, version))
}

fn locate_go(opts: &BuildOptions) -> Result<PathBuf> {
    match find_go(opts.go.as_deref()) {
        Some(go) => {
            tracing::debug!("using Go toolchain at {}", go.display());
            Ok(go)
        }
        None => bail!(
            "no Go toolchain found\n\
             hint: install Go, set `BRGO_GO`, or configure `[toolchain] go` in brgo.toml"
        ),
    }
}

fn temp_dir(opts: &BuildOptions) -> Result<TempDir> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(TEMP_PREFIX);

    let tmp = match &opts.temp_dir {
        Some(parent) => {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create `{}`", parent.display()))?;
            builder.tempdir_in(parent)
        }
        None => builder.tempdir(),
    }
    .context("failed to create temporary directory")?;

    tracing::debug!("staging in {}", tmp.path().display());
    Ok(tmp)
}

/// Translate `input` under `tmp` and work out what to hand to `go build`.
fn stage(table: &KeywordTable, input: &Path, tmp: &Path, opts: &DirectoryOptions) -> Result<Staged> {
    let metadata = fs::metadata(input).map_err(|e| TranslateError::io("open", input, e))?;

    if !metadata.is_dir() {
        let file_name = Path::new(input.file_name().unwrap_or(input.as_os_str()))
            .with_extension(&opts.target_extension);
        let output = tmp.join(&file_name);
        FileTranslator::new(table).translate_file(input, &output)?;

        return Ok(Staged {
            work_dir: tmp.to_path_buf(),
            target: file_name.to_string_lossy().into_owned(),
            translated: 1,
        });
    }

    // The output root is named after the input so in-project imports such
    // as `importa "projeto/util"` resolve against the generated module.
    let module_root = tmp.join(input_name(input));
    let report = DirectoryTranslator::new(table, opts.clone()).translate_directory(input, &module_root)?;
    let target = main_package_dir(table, &report, &module_root)?;

    Ok(Staged {
        work_dir: module_root,
        target,
        translated: report.translated.len(),
    })
}

/// `./<dir>` of the first translated file whose package is the entry point.
fn main_package_dir(table: &KeywordTable, report: &DirectoryReport, root: &Path) -> Result<String> {
    let job = report
        .translated
        .iter()
        .find(|job| {
            job.package
                .as_deref()
                .map(|p| p == MAIN_PACKAGE || table.translate(p) == Some(MAIN_PACKAGE))
                .unwrap_or(false)
        })
        .with_context(|| {
            let reverse = table.reverse();
            let name = reverse.translate(MAIN_PACKAGE).unwrap_or(MAIN_PACKAGE);
            format!("no `{}` package found in the translated sources", name)
        })?;

    let dir = job.output.parent().unwrap_or(root);
    let rel = relative_path(root, dir);
    if rel.as_os_str().is_empty() {
        Ok(".".to_string())
    } else {
        Ok(format!("./{}", rel.to_string_lossy().replace('\\', "/")))
    }
}

fn compile(go: &Path, staged: &Staged, binary: &Path) -> Result<()> {
    let cmd = ProcessBuilder::new(go)
        .args(["build", "-o"])
        .arg(binary)
        .arg(&staged.target)
        .env("GOWORK", "off")
        .cwd(&staged.work_dir);

    tracing::debug!("running `{}` in {}", cmd.display_command(), staged.work_dir.display());
    let status = cmd.status()?;
    if !status.success() {
        bail!("`{}` failed with {}", cmd.display_command(), status);
    }
    Ok(())
}

/// Last component of `input`, resolving `.` and `..` first.
fn input_name(input: &Path) -> String {
    let input = normalize_path(&absolute(input));
    input
        .file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "brgo".to_string())
}

/// File or directory name without extension, used to name executables.
fn binary_name(input: &Path) -> String {
    let name = input_name(input);
    let stem = Path::new(&name)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or(name);

    if std::env::consts::EXE_EXTENSION.is_empty() {
        stem
    } else {
        format!("{}.{}", stem, std::env::consts::EXE_EXTENSION)
    }
}
