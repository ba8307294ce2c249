//! Lexical scope scan for Python-style sources.
//!
//! Walks the buffer once and records where `#` comments and triple-quoted
//! strings live. Single-line quoted strings are skipped so a `#` or a quote
//! inside them is not misread. Anything not covered by a span is code.

use crate::host::ScopeLabel;
use crate::region::{Offset, Region};

/// One comment or documentation-string token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeSpan {
    pub label: ScopeLabel,
    pub region: Region,
    /// False for a triple-quoted string that runs off the end of the buffer.
    pub closed: bool,
}

impl ScopeSpan {
    /// Whether the cursor at `offset` is inside this token.
    ///
    /// A comment still owns the offset at its line end, so a cursor parked
    /// after the last character counts. A closed string does not own the
    /// offset just past its closing quotes.
    pub const fn holds(&self, offset: Offset) -> bool {
        match self.label {
            ScopeLabel::LineComment => self.region.contains(offset),
            _ if self.closed => self.region.begin <= offset && offset < self.region.end,
            _ => self.region.contains(offset),
        }
    }
}

/// Scan `text` into comment and documentation-string spans, in order.
pub fn scan(text: &str) -> Vec<ScopeSpan> {
    let chars: Vec<char> = text.chars().collect();
    let mut spans = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        match chars[i] {
            '#' => {
                let end = chars[i..]
                    .iter()
                    .position(|&c| c == '\n')
                    .map_or(chars.len(), |p| i + p);
                spans.push(ScopeSpan {
                    label: ScopeLabel::LineComment,
                    region: Region::new(i, end),
                    closed: true,
                });
                i = end;
            }
            q @ ('"' | '\'') => {
                if chars.get(i + 1..i + 3) == Some(&[q, q][..]) {
                    let (end, closed) = close_triple(&chars, i + 3, q);
                    spans.push(ScopeSpan {
                        label: ScopeLabel::DocString,
                        region: Region::new(i, end),
                        closed,
                    });
                    i = end;
                } else {
                    i = close_short(&chars, i + 1, q);
                }
            }
            _ => i += 1,
        }
    }
    spans
}

fn close_triple(chars: &[char], mut i: usize, q: char) -> (usize, bool) {
    while i < chars.len() {
        if chars[i] == '\\' {
            i += 2;
        } else if chars.get(i..i + 3) == Some(&[q, q, q][..]) {
            return (i + 3, true);
        } else {
            i += 1;
        }
    }
    (chars.len(), false)
}

// A short string ends at its quote or, unterminated, at the line break.
fn close_short(chars: &[char], mut i: usize, q: char) -> usize {
    while i < chars.len() {
        match chars[i] {
            '\\' => i += 2,
            '\n' => return i,
            c if c == q => return i + 1,
            _ => i += 1,
        }
    }
    chars.len()
}
