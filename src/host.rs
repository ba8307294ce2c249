//! The editing surface the formatter runs against.
//!
//! The formatter never owns a buffer. It asks a [`Host`] for lines, text and
//! lexical scope, computes one replacement, and hands it back through
//! [`Host::apply_edit`]. [`crate::editor::EditorBuffer`] is the in-memory
//! implementation used by the binary and the tests.

use serde::{Deserialize, Serialize};

use crate::region::{Offset, Region};

/// Lexical classification of a buffer offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScopeLabel {
    /// Inside a block documentation string.
    DocString,
    /// Inside a line comment.
    LineComment,
    /// Anywhere else.
    Code,
}

impl ScopeLabel {
    /// Classify a raw scope path such as
    /// `source.python string.quoted.docstring.multi.python`.
    ///
    /// Hosts that only expose dotted scope names go through here so the rest
    /// of the crate can match on the enum.
    pub fn from_scope_path(path: &str) -> Self {
        let is_doc = path.split_whitespace().any(|scope| {
            scope.starts_with("comment.block.documentation")
                || scope.starts_with("string.quoted.docstring")
                || (scope.starts_with("string.quoted") && scope.contains(".block"))
        });
        if is_doc {
            return Self::DocString;
        }
        if path
            .split_whitespace()
            .any(|scope| scope.starts_with("comment.line"))
        {
            return Self::LineComment;
        }
        Self::Code
    }
}

/// Buffer access the formatter needs from its host.
///
/// Offsets are character indices. Implementations guarantee that
/// [`Host::line_at`] returns a region excluding the line terminator.
pub trait Host {
    /// Total buffer length in characters.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The line containing `offset`, without its terminator.
    fn line_at(&self, offset: Offset) -> Region;

    fn text_in_region(&self, region: Region) -> String;

    fn scope_at(&self, offset: Offset) -> ScopeLabel;

    /// Full extent of the string or comment token at `offset`, if any.
    fn scope_extent(&self, offset: Offset) -> Option<Region>;

    /// The current selection; zero-width when only a cursor is placed.
    fn selection(&self) -> Region;

    fn selection_start(&self) -> Offset {
        self.selection().begin
    }

    /// Replace `region` with `text` in one step.
    fn apply_edit(&mut self, region: Region, text: &str);

    fn apply_insert(&mut self, offset: Offset, text: &str) {
        self.apply_edit(Region::point(offset), text);
    }
}
