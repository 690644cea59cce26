//! Test utilities for brgo unit tests.
//!
//! Provides fixtures that write small `.brgo` source trees to disk.
//!
//! # Example
//!
//! ```rust,ignore
//! use brgo::test_support::{sources, ProjectFixture};
//!
//! #[test]
//! fn test_example() {
//!     let tmp = tempfile::TempDir::new().unwrap();
//!     let root = ProjectFixture::new("app")
//!         .with_source("main.brgo", sources::hello_world())
//!         .write_to(tmp.path())
//!         .unwrap();
//!     // Translate `root`...
//! }
//! ```

pub mod fixtures;

// Re-export fixtures for convenience
pub use fixtures::*;
