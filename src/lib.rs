// Only allow lints that are either transitive-dependency noise or
// genuinely opinionated style choices that don't indicate real issues.
#![allow(
    // Transitive dependency version mismatches we can't control
    clippy::multiple_crate_versions,
    // module_name_repetitions is pure style preference (e.g. docgen::FunctionDescriptor)
    clippy::module_name_repetitions
)]

//! # Docreflow
//!
//! Cursor-driven reformatting of Python comments and docstrings.
//!
//! Given a cursor in a source buffer, docreflow finds the surrounding
//! comment run, documentation string or function signature and replaces it
//! with re-flowed or generated text:
//! - Comment runs and docstrings wrapped at a fixed width (79 by default)
//! - Field lists (`:param x:`) kept glued to their first word
//! - Docstring skeletons generated from a signature and its `raise`s
//!
//! ## Architecture
//!
//! Every command is a pipeline of plain values:
//! find a region → parse it → render replacement text → apply one edit.
//! Nothing is stored between commands; the buffer is always re-read.
//!
//! ## Modules
//!
//! - [`host`]: The buffer interface commands run against
//! - [`editor`]: In-memory rope buffer implementing it
//! - [`boundary`]: Comment, docstring and signature boundary scans
//! - [`reflow`]: Paragraph parsing and fixed-width wrapping
//! - [`docgen`]: Parameter/exception extraction and doc skeletons
//! - [`command`]: Command dispatch and edit planning
//! - [`config`]: Saved default flags

pub mod boundary;
pub mod command;
pub mod config;
pub mod docgen;
pub mod editor;
pub mod error;
pub mod host;
pub mod reflow;
pub mod region;

pub use error::{Error, Result};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::command::{plan, run, Command, Edit, Options};
    pub use crate::editor::EditorBuffer;
    pub use crate::host::{Host, ScopeLabel};
    pub use crate::region::{Offset, Region};
}
