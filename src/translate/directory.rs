//! Directory translation: discovery, output planning, emission, manifest.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::keywords::KeywordTable;
use crate::core::manifest::{GoModule, DEFAULT_GO_VERSION, MANIFEST_FILE_NAME};
use crate::translate::discovery::{discover, DiscoverOptions, Discovery, SourceFile};
use crate::translate::errors::TranslateError;
use crate::translate::file::FileTranslator;
use crate::translate::layout::OutputLayout;

/// Default source extension.
pub const SOURCE_EXTENSION: &str = "brgo";

/// Default canonical extension.
pub const TARGET_EXTENSION: &str = "go";

/// Default external-ecosystem import prefix.
pub const DEFAULT_EXTERNAL_PREFIX: &str = "github.com/";

/// Options for directory translation.
#[derive(Debug, Clone)]
pub struct DirectoryOptions {
    /// Output layout policy
    pub layout: OutputLayout,

    /// Source extension, without the dot
    pub source_extension: String,

    /// Extension for translated files, without the dot
    pub target_extension: String,

    /// Import path prefixes that become manifest requirements
    pub external_prefixes: Vec<String>,

    /// Minimum toolchain version for the manifest
    pub go_version: String,
}

impl Default for DirectoryOptions {
    fn default() -> Self {
        DirectoryOptions {
            layout: OutputLayout::default(),
            source_extension: SOURCE_EXTENSION.to_string(),
            target_extension: TARGET_EXTENSION.to_string(),
            external_prefixes: vec![DEFAULT_EXTERNAL_PREFIX.to_string()],
            go_version: DEFAULT_GO_VERSION.to_string(),
        }
    }
}

/// A single file translation scheduled by a [`TranslationPlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationJob {
    pub input: PathBuf,
    pub output: PathBuf,
    pub package: Option<String>,
}

/// Everything decided before any output is written.
#[derive(Debug, Clone)]
pub struct TranslationPlan {
    pub output_root: PathBuf,
    pub jobs: Vec<TranslationJob>,
    /// Source files the layout could not place.
    pub skipped: Vec<PathBuf>,
    pub manifest: GoModule,
}

impl TranslationPlan {
    /// Where the manifest will be written.
    pub fn manifest_path(&self) -> PathBuf {
        self.output_root.join(MANIFEST_FILE_NAME)
    }
}

/// Outcome of a successful directory translation.
#[derive(Debug, Clone)]
pub struct DirectoryReport {
    /// Translated files, in emission order.
    pub translated: Vec<TranslationJob>,
    /// Source files left out of the output.
    pub skipped: Vec<PathBuf>,
    /// Declared packages, sorted.
    pub packages: Vec<String>,
    /// Manifest requirements, sorted.
    pub external_imports: Vec<String>,
    /// Path of the written manifest.
    pub manifest: PathBuf,
}

/// Output placement state while a plan is built.
struct Planner<'p> {
    layout: OutputLayout,
    output_root: &'p Path,
    target_extension: &'p str,
    jobs: Vec<TranslationJob>,
    skipped: Vec<PathBuf>,
    /// Output path -> the input that claimed it first.
    claimed: HashMap<PathBuf, PathBuf>,
}

impl Planner<'_> {
    fn place(&mut self, file: &SourceFile) -> Result<(), TranslateError> {
        let Some(output) = self.layout.output_path(
            self.output_root,
            &file.relative,
            file.package.as_deref(),
            self.target_extension,
        ) else {
            tracing::warn!("skipping {}: no package declaration", file.path.display());
            self.skipped.push(file.path.clone());
            return Ok(());
        };

        if let Some(first) = self.claimed.insert(output.clone(), file.path.clone()) {
            return Err(TranslateError::OutputCollision {
                output,
                first,
                second: file.path.clone(),
            });
        }

        self.jobs.push(TranslationJob {
            input: file.path.clone(),
            output,
            package: file.package.clone(),
        });
        Ok(())
    }
}

/// Translates a whole source tree and writes its manifest.
#[derive(Debug, Clone)]
pub struct DirectoryTranslator<'t> {
    files: FileTranslator<'t>,
    options: DirectoryOptions,
}

impl<'t> DirectoryTranslator<'t> {
    pub fn new(table: &'t KeywordTable, options: DirectoryOptions) -> Self {
        DirectoryTranslator {
            files: FileTranslator::new(table),
            options,
        }
    }

    /// Discover sources and compute every output path.
    ///
    /// Fails if two inputs would be written to the same output.
    pub fn plan(&self, input_root: &Path, output_root: &Path) -> Result<TranslationPlan, TranslateError> {
        let metadata =
            fs::metadata(input_root).map_err(|e| TranslateError::io("open", input_root, e))?;
        if !metadata.is_dir() {
            return Err(TranslateError::NotADirectory {
                path: input_root.to_path_buf(),
            });
        }

        let discovery = discover(
            input_root,
            &DiscoverOptions {
                source_extension: &self.options.source_extension,
                external_prefixes: &self.options.external_prefixes,
            },
        )?;

        self.plan_from(discovery, output_root)
    }

    fn plan_from(&self, discovery: Discovery, output_root: &Path) -> Result<TranslationPlan, TranslateError> {
        let mut manifest = GoModule::for_output_root(output_root, self.options.go_version.as_str());
        for import in &discovery.external_imports {
            manifest.require(import.as_str());
        }

        let mut planner = Planner {
            layout: self.options.layout,
            output_root,
            target_extension: &self.options.target_extension,
            jobs: Vec::new(),
            skipped: Vec::new(),
            claimed: HashMap::new(),
        };

        for (package, files) in discovery.package_groups() {
            tracing::debug!("package {}: {} files", package, files.len());
            for file in files {
                planner.place(file)?;
            }
        }
        for file in discovery.unpackaged() {
            planner.place(file)?;
        }

        let Planner { jobs, skipped, .. } = planner;

        Ok(TranslationPlan {
            output_root: output_root.to_path_buf(),
            jobs,
            skipped,
            manifest,
        })
    }

    /// Run a plan, calling `on_file` after each file is written.
    pub fn execute<F>(&self, plan: TranslationPlan, mut on_file: F) -> Result<DirectoryReport, TranslateError>
    where
        F: FnMut(&TranslationJob),
    {
        for job in &plan.jobs {
            self.files.translate_file(&job.input, &job.output)?;
            on_file(job);
        }

        let manifest_path = plan.manifest_path();
        fs::create_dir_all(&plan.output_root)
            .map_err(|e| TranslateError::io("create directory", &plan.output_root, e))?;
        fs::write(&manifest_path, plan.manifest.render())
            .map_err(|e| TranslateError::io("create", &manifest_path, e))?;
        tracing::debug!(
            "wrote {} ({} requirements)",
            manifest_path.display(),
            plan.manifest.requires.len()
        );

        let mut packages: Vec<String> = plan.jobs.iter().filter_map(|j| j.package.clone()).collect();
        packages.sort();
        packages.dedup();

        Ok(DirectoryReport {
            translated: plan.jobs,
            skipped: plan.skipped,
            packages,
            external_imports: plan.manifest.requires.into_iter().collect(),
            manifest: manifest_path,
        })
    }

    /// Translate every source file under `input_root` into `output_root`.
    pub fn translate_directory(
        &self,
        input_root: &Path,
        output_root: &Path,
    ) -> Result<DirectoryReport, TranslateError> {
        let plan = self.plan(input_root, output_root)?;
        self.execute(plan, |_| {})
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sources, ProjectFixture};
    use tempfile::TempDir;

    fn translator(layout: OutputLayout) -> DirectoryTranslator<'static> {
        DirectoryTranslator::new(
            KeywordTable::pt_br(),
            DirectoryOptions {
                layout,
                ..DirectoryOptions::default()
            },
        )
    }

    #[test]
    fn test_same_package_from_different_dirs() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("a/x.brgo", sources::package("util"))
            .with_source("b/y.brgo", sources::package("util"))
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("meumodulo");

        let report = translator(OutputLayout::ByPackage)
            .translate_directory(&input, &output)
            .unwrap();

        assert!(output.join("util/a/x.go").exists());
        assert!(output.join("util/b/y.go").exists());
        assert_eq!(report.packages, vec!["util"]);
        assert_eq!(report.translated.len(), 2);

        let manifest = fs::read_to_string(output.join("go.mod")).unwrap();
        assert!(manifest.starts_with("module meumodulo\n"));
        assert!(!manifest.contains("require"));
    }

    #[test]
    fn test_translated_content() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("main.brgo", sources::hello_world())
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");

        translator(OutputLayout::ByPackage)
            .translate_directory(&input, &output)
            .unwrap();

        let go = fs::read_to_string(output.join("principal/main.go")).unwrap();
        assert!(go.starts_with("package main\n"));
        assert!(go.contains("func main() {"));
        assert!(go.contains("fmt.Println(\"olá, mundo\")"));
    }

    #[test]
    fn test_file_without_package_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("solto.brgo", "func f() {}\n")
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");

        let report = translator(OutputLayout::ByPackage)
            .translate_directory(&input, &output)
            .unwrap();

        assert!(report.translated.is_empty());
        assert_eq!(report.skipped, vec![input.join("solto.brgo")]);
        let written: Vec<_> = fs::read_dir(&output)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(written, vec![std::ffi::OsString::from("go.mod")]);
    }

    #[test]
    fn test_external_imports_in_manifest() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("main.brgo", sources::main_with_import("github.com/x/y"))
            .with_source("outro.brgo", sources::main_with_import("github.com/a/b"))
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");

        let report = translator(OutputLayout::ByPackage)
            .translate_directory(&input, &output)
            .unwrap();

        assert_eq!(report.external_imports, vec!["github.com/a/b", "github.com/x/y"]);
        assert_eq!(
            fs::read_to_string(output.join("go.mod")).unwrap(),
            "module saida\n\ngo 1.18\n\nrequire (\n\tgithub.com/a/b v0.0.0\n\tgithub.com/x/y v0.0.0\n)\n"
        );
    }

    #[test]
    fn test_same_file_name_in_one_package_keeps_both() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("a/x.brgo", sources::package("util"))
            .with_source("b/x.brgo", sources::package("util"))
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");

        let report = translator(OutputLayout::ByPackage)
            .translate_directory(&input, &output)
            .unwrap();

        assert_eq!(report.translated.len(), 2);
        assert!(output.join("util/a/x.go").exists());
        assert!(output.join("util/b/x.go").exists());
        assert!(!output.join("util/x.go").exists());
    }

    #[test]
    fn test_flat_layout() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("a/x.brgo", sources::package("util"))
            .with_source("b/y.brgo", sources::package("util"))
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");

        translator(OutputLayout::Flat)
            .translate_directory(&input, &output)
            .unwrap();

        assert!(output.join("util/x.go").exists());
        assert!(output.join("util/y.go").exists());
    }

    #[test]
    fn test_flat_collision_fails_before_writing() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("a/x.brgo", sources::package("util"))
            .with_source("b/x.brgo", sources::package("util"))
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");

        let err = translator(OutputLayout::Flat)
            .translate_directory(&input, &output)
            .unwrap_err();

        match err {
            TranslateError::OutputCollision { output: out, first, second } => {
                assert_eq!(out, output.join("util/x.go"));
                assert_eq!(first, input.join("a/x.brgo"));
                assert_eq!(second, input.join("b/x.brgo"));
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_mirror_layout() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("a/x.brgo", sources::package("util"))
            .with_source("b/x.brgo", sources::package("util"))
            .with_source("solto.brgo", "retorna\n")
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");

        let report = translator(OutputLayout::Mirror)
            .translate_directory(&input, &output)
            .unwrap();

        assert!(report.skipped.is_empty());
        assert!(output.join("a/x.go").exists());
        assert!(output.join("b/x.go").exists());
        assert_eq!(fs::read_to_string(output.join("solto.go")).unwrap(), "return\n");
        assert!(output.join("go.mod").exists());
    }

    #[test]
    fn test_missing_input_root() {
        let tmp = TempDir::new().unwrap();
        let err = translator(OutputLayout::ByPackage)
            .translate_directory(&tmp.path().join("nada"), &tmp.path().join("saida"))
            .unwrap_err();
        assert!(matches!(err, TranslateError::NotFound { .. }));
    }

    #[test]
    fn test_input_root_must_be_directory() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("x.brgo");
        fs::write(&file, "pacote x\n").unwrap();

        let err = translator(OutputLayout::ByPackage)
            .translate_directory(&file, &tmp.path().join("saida"))
            .unwrap_err();
        assert!(matches!(err, TranslateError::NotADirectory { .. }));
    }

    #[test]
    fn test_manifest_failure_fails_translation() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("x.brgo", sources::package("util"))
            .write_to(tmp.path())
            .unwrap();
        let output = tmp.path().join("saida");
        fs::create_dir_all(output.join("go.mod")).unwrap();

        let err = translator(OutputLayout::ByPackage)
            .translate_directory(&input, &output)
            .unwrap_err();

        assert!(matches!(err, TranslateError::Io { action: "create", .. }));
        assert!(output.join("util/x.go").exists());
    }

    #[test]
    fn test_emission_follows_package_groups() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("a.brgo", sources::package("zeta"))
            .with_source("b.brgo", sources::package("alfa"))
            .with_source("c.brgo", sources::package("zeta"))
            .write_to(tmp.path())
            .unwrap();

        let plan = translator(OutputLayout::ByPackage)
            .plan(&input, &tmp.path().join("saida"))
            .unwrap();

        let order: Vec<_> = plan
            .jobs
            .iter()
            .map(|job| job.input.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(order, vec!["b.brgo", "a.brgo", "c.brgo"]);
    }

    #[test]
    fn test_latin1_source_is_translated() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada").write_to(tmp.path()).unwrap();
        fs::write(input.join("x.brgo"), b"pacote util\n// ol\xE1\nse verdadeiro {}\n").unwrap();
        let output = tmp.path().join("saida");

        let report = translator(OutputLayout::ByPackage)
            .translate_directory(&input, &output)
            .unwrap();

        assert_eq!(report.packages, vec!["util"]);
        assert_eq!(
            fs::read(output.join("util/x.go")).unwrap(),
            b"package util\n// ol\xE1\nif true {}\n".to_vec()
        );
        assert!(output.join("go.mod").exists());
    }

    #[test]
    fn test_progress_callback() {
        let tmp = TempDir::new().unwrap();
        let input = ProjectFixture::new("entrada")
            .with_source("a.brgo", sources::package("a"))
            .with_source("b.brgo", sources::package("b"))
            .write_to(tmp.path())
            .unwrap();
        let translator = translator(OutputLayout::ByPackage);
        let plan = translator.plan(&input, &tmp.path().join("saida")).unwrap();

        let mut seen = Vec::new();
        translator
            .execute(plan, |job| seen.push(job.package.clone().unwrap()))
            .unwrap();

        assert_eq!(seen, vec!["a", "b"]);
    }
}
