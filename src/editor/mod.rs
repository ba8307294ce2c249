//! In-memory editing surface.
//!
//! Provides a rope-backed text buffer with a cursor/selection and a lexical
//! scope scan, implementing [`crate::host::Host`].

mod buffer;
pub mod scope;

pub use buffer::{Cursor, EditorBuffer};
