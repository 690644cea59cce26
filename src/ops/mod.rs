//! High-level operations.
//!
//! This module contains the implementation of brgo commands. Everything
//! that touches the Go toolchain lives here, outside the translation engine.

pub mod brgo_build;
pub mod brgo_translate;

pub use brgo_build::{build, run, toolchain_version, BuildOptions, BuildResult};
pub use brgo_translate::{translate, TranslateEvent, TranslateOptions, TranslateOutcome};
