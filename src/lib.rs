//! # json-toolkit
//!
//! Batch transformations and keyword search over a JSON array of objects.
//!
//! ## Quick Start
//!
//! ```no_run
//! use json_toolkit::config::Settings;
//! use json_toolkit::keywords::KeywordSource;
//! use json_toolkit::session::{Operation, Session};
//! use std::path::Path;
//!
//! # fn example() -> json_toolkit::error::Result<()> {
//! let mut session = Session::open(Path::new("records.json"), Settings::default())?;
//!
//! // Keep the first record per `_id`; the session now holds the result.
//! session.execute(Operation::RemoveDuplicates { output: "unique.json".into() })?;
//!
//! // Search the deduplicated records.
//! let outcome = session.execute(Operation::KeywordMatch {
//!     keywords: KeywordSource::Inline("alpha, beta".to_owned()),
//!     output: "matched.json".into(),
//!     stats: Some("stats.csv".into()),
//! })?;
//! println!("{outcome}");
//! # Ok(())
//! # }
//! ```
//!
//! ## Core Modules
//!
//! - [`dataset`]: record model, JSON load/save, search text
//! - [`transform`]: serial numbering, attribute deletion, count, deduplication
//! - [`collect`]: distinct values per field as JSON or CSV artifacts
//! - [`keywords`]: keyword matching and statistics
//! - [`session`]: command objects and the session that runs them
//! - [`interactive`]: the menu-driven prompt loop
//! - [`config`], [`error`], [`logging`]: settings, error types, logger setup
//!
//! ## Ownership
//!
//! Operations borrow a [`dataset::Dataset`] and return a new one. Only the
//! [`session::Session`] decides to replace the dataset it holds, and it does
//! so after the result has been written.

#![warn(clippy::all, rust_2018_idioms)]

pub mod collect;
pub mod config;
pub mod dataset;
pub mod error;
pub mod interactive;
pub mod keywords;
pub mod logging;
pub mod session;
pub mod transform;
