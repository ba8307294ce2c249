use ropey::Rope;

use super::scope::{self, ScopeSpan};
use crate::host::{Host, ScopeLabel};
use crate::region::{Offset, Region};

/// Cursor position in the editor buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column, in characters within the line.
    pub col: usize,
}

impl Cursor {
    /// Create a cursor at line 0, column 0.
    pub const fn new() -> Self {
        Self { line: 0, col: 0 }
    }

    /// Create a cursor at a specific position.
    pub const fn at(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl Default for Cursor {
    fn default() -> Self {
        Self::new()
    }
}

/// A text buffer backed by a rope data structure.
///
/// Holds the cursor, an optional selection anchor, and the lexical scope
/// spans of the current text. Scopes are rescanned after every edit so a
/// query never sees stale classification.
pub struct EditorBuffer {
    rope: Rope,
    cursor: Cursor,
    anchor: Option<Cursor>,
    scopes: Vec<ScopeSpan>,
    dirty: bool,
}

impl EditorBuffer {
    /// Create a new buffer from a string.
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            cursor: Cursor::new(),
            anchor: None,
            scopes: scope::scan(text),
            dirty: false,
        }
    }

    /// The current cursor position.
    pub const fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Whether the buffer has been modified since creation or last save.
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Total number of lines in the buffer.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Get the content of a line (without trailing newline).
    pub fn line_text(&self, line_idx: usize) -> Option<String> {
        if line_idx >= self.rope.len_lines() {
            return None;
        }
        let s = self.rope.line(line_idx).to_string();
        Some(s.trim_end_matches('\n').trim_end_matches('\r').to_string())
    }

    /// Length of a line in characters (without trailing newline).
    pub fn line_len(&self, line_idx: usize) -> usize {
        self.line_text(line_idx).map_or(0, |s| s.chars().count())
    }

    /// The full text content of the buffer.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Move the cursor to a line and column, clamped to the buffer, and drop
    /// any selection.
    pub fn move_to(&mut self, line: usize, col: usize) {
        self.anchor = None;
        self.cursor = self.clamp(line, col);
    }

    /// Extend a selection from the current cursor to a line and column.
    pub fn select_to(&mut self, line: usize, col: usize) {
        if self.anchor.is_none() {
            self.anchor = Some(self.cursor);
        }
        self.cursor = self.clamp(line, col);
    }

    // --- Private helpers ---

    fn clamp(&self, line: usize, col: usize) -> Cursor {
        let line = line.min(self.line_count().saturating_sub(1));
        Cursor::at(line, col.min(self.line_len(line)))
    }

    fn char_idx(&self, cursor: Cursor) -> Offset {
        self.rope.line_to_char(cursor.line) + cursor.col
    }

    fn cursor_from_char(&self, offset: Offset) -> Cursor {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        Cursor::at(line, offset - self.rope.line_to_char(line))
    }

    fn span_at(&self, offset: Offset) -> Option<&ScopeSpan> {
        self.scopes.iter().find(|span| span.holds(offset))
    }
}

impl Host for EditorBuffer {
    fn len(&self) -> usize {
        self.rope.len_chars()
    }

    fn line_at(&self, offset: Offset) -> Region {
        let line_idx = self.rope.char_to_line(offset.min(self.rope.len_chars()));
        let start = self.rope.line_to_char(line_idx);
        Region::new(start, start + self.line_len(line_idx))
    }

    fn text_in_region(&self, region: Region) -> String {
        let len = self.rope.len_chars();
        self.rope
            .slice(region.begin.min(len)..region.end.min(len))
            .to_string()
    }

    fn scope_at(&self, offset: Offset) -> ScopeLabel {
        self.span_at(offset).map_or(ScopeLabel::Code, |span| span.label)
    }

    fn scope_extent(&self, offset: Offset) -> Option<Region> {
        self.span_at(offset).map(|span| span.region)
    }

    fn selection(&self) -> Region {
        let head = self.char_idx(self.cursor);
        let anchor = self.anchor.map_or(head, |a| self.char_idx(a));
        Region::new(anchor, head)
    }

    fn apply_edit(&mut self, region: Region, text: &str) {
        let len = self.rope.len_chars();
        let begin = region.begin.min(len);
        let end = region.end.min(len);
        self.rope.remove(begin..end);
        self.rope.insert(begin, text);
        self.scopes = scope::scan(&self.rope.to_string());
        self.anchor = None;
        self.cursor = self.cursor_from_char(begin + text.chars().count());
        self.dirty = true;
    }
}

impl std::fmt::Debug for EditorBuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EditorBuffer")
            .field(
                "rope",
                &format_args!("Rope({} lines)", self.rope.len_lines()),
            )
            .field("cursor", &self.cursor)
            .field("anchor", &self.anchor)
            .field("scopes", &self.scopes.len())
            .field("dirty", &self.dirty)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Construction and basic queries ---

    #[test]
    fn test_empty_buffer_has_one_line() {
        let buf = EditorBuffer::from_text("");
        assert_eq!(buf.line_count(), 1);
        assert_eq!(buf.line_text(0), Some(String::new()));
        assert!(buf.is_empty());
    }

    #[test]
    fn test_from_text_trailing_newline() {
        let buf = EditorBuffer::from_text("hello\n");
        assert_eq!(buf.line_count(), 2);
        assert_eq!(buf.line_text(0), Some("hello".to_string()));
        assert_eq!(buf.line_text(1), Some(String::new()));
    }

    #[test]
    fn test_line_text_out_of_bounds_returns_none() {
        let buf = EditorBuffer::from_text("hello");
        assert_eq!(buf.line_text(1), None);
    }

    #[test]
    fn test_line_len_counts_chars() {
        let buf = EditorBuffer::from_text("café\nhi");
        assert_eq!(buf.line_len(0), 4);
        assert_eq!(buf.line_len(1), 2);
    }

    // --- Host: lines and regions ---

    #[test]
    fn test_line_at_excludes_terminator() {
        let buf = EditorBuffer::from_text("one\ntwo\nthree");
        assert_eq!(buf.line_at(0), Region::new(0, 3));
        assert_eq!(buf.line_at(3), Region::new(0, 3));
        assert_eq!(buf.line_at(4), Region::new(4, 7));
        assert_eq!(buf.line_at(13), Region::new(8, 13));
    }

    #[test]
    fn test_line_at_crlf_excludes_carriage_return() {
        let buf = EditorBuffer::from_text("ab\r\ncd");
        assert_eq!(buf.line_at(0), Region::new(0, 2));
        assert_eq!(buf.text_in_region(buf.line_at(5)), "cd");
    }

    #[test]
    fn test_line_at_past_end_clamps() {
        let buf = EditorBuffer::from_text("ab\ncd");
        assert_eq!(buf.line_at(100), Region::new(3, 5));
    }

    #[test]
    fn test_text_in_region() {
        let buf = EditorBuffer::from_text("hello world");
        assert_eq!(buf.text_in_region(Region::new(6, 11)), "world");
        assert_eq!(buf.text_in_region(Region::new(6, 99)), "world");
    }

    // --- Cursor and selection ---

    #[test]
    fn test_cursor_starts_at_origin() {
        let buf = EditorBuffer::from_text("hello\nworld");
        assert_eq!(buf.cursor(), Cursor::at(0, 0));
        assert_eq!(buf.selection(), Region::point(0));
    }

    #[test]
    fn test_move_to_clamps() {
        let mut buf = EditorBuffer::from_text("hello\nhi");
        buf.move_to(100, 100);
        assert_eq!(buf.cursor(), Cursor::at(1, 2));
        assert_eq!(buf.selection_start(), 8);
    }

    #[test]
    fn test_select_to_builds_ordered_region() {
        let mut buf = EditorBuffer::from_text("hello\nworld");
        buf.move_to(1, 3);
        buf.select_to(0, 1);
        assert_eq!(buf.selection(), Region::new(1, 9));
        assert_eq!(buf.selection_start(), 1);
    }

    // --- Scopes ---

    #[test]
    fn test_scope_at_comment_and_code() {
        let buf = EditorBuffer::from_text("x = 1  # note\n");
        assert_eq!(buf.scope_at(0), ScopeLabel::Code);
        assert_eq!(buf.scope_at(9), ScopeLabel::LineComment);
        assert_eq!(buf.scope_at(13), ScopeLabel::LineComment);
    }

    #[test]
    fn test_scope_extent_of_docstring() {
        let text = "def f():\n    \"\"\"Doc.\"\"\"\n";
        let buf = EditorBuffer::from_text(text);
        assert_eq!(buf.scope_at(17), ScopeLabel::DocString);
        assert_eq!(buf.scope_extent(17), Some(Region::new(13, 23)));
        assert_eq!(buf.scope_extent(2), None);
    }

    // --- Edits ---

    #[test]
    fn test_apply_edit_replaces_and_marks_dirty() {
        let mut buf = EditorBuffer::from_text("hello world");
        buf.apply_edit(Region::new(6, 11), "there");
        assert_eq!(buf.text(), "hello there");
        assert!(buf.is_dirty());
        assert_eq!(buf.cursor(), Cursor::at(0, 11));
    }

    #[test]
    fn test_apply_insert_moves_cursor_past_text() {
        let mut buf = EditorBuffer::from_text("ab");
        buf.apply_insert(1, "x\ny");
        assert_eq!(buf.text(), "ax\nyb");
        assert_eq!(buf.cursor(), Cursor::at(1, 1));
    }

    #[test]
    fn test_apply_edit_rescans_scopes() {
        let mut buf = EditorBuffer::from_text("x = 1\n");
        assert_eq!(buf.scope_at(2), ScopeLabel::Code);
        buf.apply_edit(Region::new(0, 5), "# x = 1");
        assert_eq!(buf.scope_at(2), ScopeLabel::LineComment);
    }
}
