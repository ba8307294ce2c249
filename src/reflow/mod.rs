//! Text re-flow engine.
//!
//! This module handles:
//! - Splitting block text into paragraphs and field sections
//! - Greedy fixed-width wrapping with first/continuation indents
//! - Rebuilding documentation strings and comment runs

mod paragraph;
mod render;
mod wrap;

pub use paragraph::{
    label_len, split_paragraphs, split_sections, Paragraph, Section, FIELD_MARKER,
    FIELD_SEPARATOR, LABEL_LOOKAHEAD,
};
pub(crate) use render::COMMENT_LINE;
pub use render::{render_comment, render_docstring, render_paragraph};
pub use wrap::{fill, wrap};

/// Default wrap width in columns.
pub const DEFAULT_WIDTH: usize = 79;

/// The whitespace prefix of `line`.
pub fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}
