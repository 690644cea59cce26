//! Command implementations

pub mod build;
pub mod completions;
pub mod keywords;
pub mod run;
pub mod toolchain;
pub mod translate;
