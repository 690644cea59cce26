//! The translation engine.
//!
//! [`LineTranslator`] rewrites one line, [`FileTranslator`] streams a file
//! through it, and [`DirectoryTranslator`] regroups a source tree according
//! to an [`OutputLayout`] and writes the module manifest.

pub mod directory;
pub mod discovery;
pub mod errors;
pub mod file;
pub mod layout;
pub mod line;

pub use directory::{
    DirectoryOptions, DirectoryReport, DirectoryTranslator, TranslationJob, TranslationPlan,
};
pub use discovery::{Discovery, SourceFile};
pub use errors::TranslateError;
pub use file::FileTranslator;
pub use layout::OutputLayout;
pub use line::LineTranslator;
