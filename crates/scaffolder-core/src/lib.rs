//! Scaffolder Core - library behind the `pkgsmith` npm package scaffolder
//!
//! This library turns a set of answers about a new npm package into the files
//! that make it up, writes them, and runs the install and follow-up tasks.
//!
//! # Architecture
//!
//! The library is organized into layers:
//!
//! - **Layer 1: Model and generators** - [`config::ProjectConfig`], name validation and
//!   pure per-file generators collected by [`generators::plan`]
//! - **Layer 2: Resolution and I/O** - the question decision tree in [`resolver`],
//!   registry lookups, the profile store, the materializer and subprocesses
//! - **Layer 3: CLI/TUI Interface** - Optional cliclack-based prompts (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based TUI prompts module
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use scaffolder_core::{generators, materialize, resolver::{Answers, Flags}};
//!
//! let config = Answers::from_flags(&Flags::default())
//!     .finalize("sample-lib".into(), Default::default(), PackageManager::Npm);
//! let files = generators::plan(&config, &Default::default())?;
//! materialize::write_project(Path::new("sample-lib"), &files).await?;
//! ```

pub mod config;
pub mod error;
pub mod generators;
pub mod materialize;
pub mod profile;
pub mod registry;
pub mod resolver;
pub mod runtime;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export main types for convenience
pub use config::{Language, Metadata, ModuleFormat, PackageManager, ProjectConfig, TestRunner};
pub use error::{exit_code, ScaffoldError};
pub use generators::{plan, GeneratedFile};
pub use resolver::{Answers, Flags};

#[cfg(feature = "tui")]
pub use tui::run;

/// User agent sent with registry requests
pub const USER_AGENT: &str = concat!("pkgsmith/", env!("CARGO_PKG_VERSION"));
