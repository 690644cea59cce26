//! Output layout policies for directory translation.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Where a translated file lands under the output root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputLayout {
    /// `<out>/<declared package>/<path relative to the input root>`.
    /// Files without a package declaration are skipped.
    #[default]
    ByPackage,
    /// `<out>/<declared package>/<file name>`, one flat directory per
    /// package as the Go toolchain expects. Files without a package
    /// declaration are skipped; same-named files of one package collide.
    Flat,
    /// `<out>/<path relative to the input root>`.
    Mirror,
}

impl OutputLayout {
    /// Compute the output path for a source file.
    ///
    /// `relative` is the file's path relative to the input root. Returns
    /// `None` when the layout cannot place the file.
    pub fn output_path(
        &self,
        output_root: &Path,
        relative: &Path,
        package: Option<&str>,
        target_extension: &str,
    ) -> Option<PathBuf> {
        match self {
            OutputLayout::ByPackage => Some(
                output_root
                    .join(package?)
                    .join(relative.with_extension(target_extension)),
            ),
            OutputLayout::Flat => {
                let package = package?;
                let file_name = relative.file_name()?;
                Some(
                    output_root
                        .join(package)
                        .join(Path::new(file_name).with_extension(target_extension)),
                )
            }
            OutputLayout::Mirror => {
                Some(output_root.join(relative.with_extension(target_extension)))
            }
        }
    }
}

impl FromStr for OutputLayout {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "package" | "by-package" => Ok(OutputLayout::ByPackage),
            "flat" => Ok(OutputLayout::Flat),
            "mirror" => Ok(OutputLayout::Mirror),
            _ => Err(format!(
                "invalid layout '{}'; expected 'package', 'flat', or 'mirror'",
                s
            )),
        }
    }
}

impl fmt::Display for OutputLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLayout::ByPackage => write!(f, "package"),
            OutputLayout::Flat => write!(f, "flat"),
            OutputLayout::Mirror => write!(f, "mirror"),
        }
    }
}
