//! brgo - translate Portuguese-keyword Go sources into standard Go
//!
//! This crate provides the translation engine (keyword table, lexer, line,
//! file and directory translators), the `go.mod` generator, and the
//! operations behind the `brgo` command-line tool.

pub mod core;
pub mod ops;
pub mod translate;
pub mod util;

/// Test utilities for brgo unit tests.
///
/// Only compiled for tests. Provides fixtures that write `.brgo` source
/// trees to disk.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{keywords::KeywordTable, manifest::GoModule};
pub use translate::{
    DirectoryTranslator, FileTranslator, LineTranslator, OutputLayout, TranslateError,
};
pub use util::context::GlobalContext;
