//! `go.mod` manifest synthesis.
//!
//! Directory mode emits one manifest at the output root naming the module
//! after the root directory and requiring every external import found
//! while scanning the sources.

use std::collections::BTreeSet;
use std::path::Path;

use crate::util::fs::normalize_path;

/// File name of the generated manifest.
pub const MANIFEST_FILE_NAME: &str = "go.mod";

/// Minimum toolchain version written when none is configured.
pub const DEFAULT_GO_VERSION: &str = "1.18";

/// Version written for every requirement.
pub const PLACEHOLDER_VERSION: &str = "v0.0.0";

/// Module name used when the output root has no usable final segment.
const FALLBACK_MODULE_NAME: &str = "main";

/// An in-memory `go.mod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoModule {
    /// Module path (the `module` line)
    pub module: String,

    /// Minimum toolchain version (the `go` line)
    pub go_version: String,

    /// External import paths, kept sorted for stable output
    pub requires: BTreeSet<String>,
}

impl GoModule {
    pub fn new(module: impl Into<String>, go_version: impl Into<String>) -> Self {
        GoModule {
            module: module.into(),
            go_version: go_version.into(),
            requires: BTreeSet::new(),
        }
    }

    /// Create a module named after the final segment of `root`.
    pub fn for_output_root(root: &Path, go_version: impl Into<String>) -> Self {
        GoModule::new(module_name_for(root), go_version)
    }

    /// Add a requirement; duplicates are ignored.
    pub fn require(&mut self, import_path: impl Into<String>) {
        self.requires.insert(import_path.into());
    }

    /// Render the manifest text.
    pub fn render(&self) -> String {
        let mut out = format!("module {}\n\ngo {}\n", self.module, self.go_version);

        if !self.requires.is_empty() {
            out.push_str("\nrequire (\n");
            for path in &self.requires {
                out.push_str(&format!("\t{} {}\n", path, PLACEHOLDER_VERSION));
            }
            out.push_str(")\n");
        }

        out
    }
}

/// Derive a module name from the final path segment of `root`.
///
/// Relative roots like `.` are resolved first so the name reflects the
/// actual directory.
pub fn module_name_for(root: &Path) -> String {
    root.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .or_else(|| {
            normalize_path(root)
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
        })
        .unwrap_or_else(|| FALLBACK_MODULE_NAME.to_string())
}
