//! Test fixtures for common translation scenarios.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Fixture for a source tree.
#[derive(Debug, Clone)]
pub struct ProjectFixture {
    /// Directory name created under the base path.
    pub name: String,
    /// Files (path relative to project root -> content).
    pub sources: BTreeMap<PathBuf, String>,
}

impl ProjectFixture {
    /// Create a new empty project fixture.
    pub fn new(name: impl Into<String>) -> Self {
        ProjectFixture {
            name: name.into(),
            sources: BTreeMap::new(),
        }
    }

    /// Create a single-file hello world program.
    pub fn hello(name: impl Into<String>) -> Self {
        ProjectFixture::new(name).with_source("main.brgo", sources::hello_world())
    }

    /// Add a file.
    pub fn with_source(mut self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        self.sources.insert(path.into(), content.into());
        self
    }

    /// Write this fixture under `base_path`, returning the project root.
    pub fn write_to(&self, base_path: &Path) -> std::io::Result<PathBuf> {
        let project_path = base_path.join(&self.name);
        std::fs::create_dir_all(&project_path)?;

        for (rel_path, content) in &self.sources {
            let full_path = project_path.join(rel_path);
            if let Some(parent) = full_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&full_path, content)?;
        }

        Ok(project_path)
    }
}

/// Common source file templates.
pub mod sources {
    /// A program printing a greeting through `fmt`.
    pub fn hello_world() -> &'static str {
        r#"pacote principal

importa "fmt"

func principal() {
	fmt.Println("olá, mundo")
}
"#
    }

    /// A library file declaring `name`.
    pub fn package(name: &str) -> String {
        format!(
            r#"pacote {name}

func Dobro(x int) int {{
	retorna x * 2
}}
"#
        )
    }

    /// A main package importing `import_path`.
    pub fn main_with_import(import_path: &str) -> String {
        format!(
            r#"pacote principal

importa (
	"fmt"
	"{import_path}"
)

func principal() {{
	se verdadeiro {{
		fmt.Println("se")
	}}
}}
"#
        )
    }
}
