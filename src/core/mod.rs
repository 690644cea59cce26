//! Core data structures for brgo.
//!
//! This module contains the pieces the translators are built from:
//! - The localized keyword table
//! - The single-line span lexer
//! - Package and import declaration detection
//! - The generated module manifest

pub mod keywords;
pub mod lexer;
pub mod manifest;
pub mod syntax;

pub use keywords::KeywordTable;
pub use lexer::{Lexer, Span, SpanKind};
pub use manifest::GoModule;
pub use syntax::{package_decl, ImportScanner, PackageDecl};
