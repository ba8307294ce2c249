//! Character-offset spans over the text buffer.

use serde::{Deserialize, Serialize};

/// A position in the buffer, counted in characters from the start.
pub type Offset = usize;

/// An ordered span of buffer offsets. `begin <= end` always holds; a
/// zero-width region is a plain cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Region {
    pub begin: Offset,
    pub end: Offset,
}

impl Region {
    /// Create a region, swapping the bounds if they arrive reversed.
    pub const fn new(a: Offset, b: Offset) -> Self {
        if a <= b {
            Self { begin: a, end: b }
        } else {
            Self { begin: b, end: a }
        }
    }

    /// A zero-width region at `offset`.
    pub const fn point(offset: Offset) -> Self {
        Self {
            begin: offset,
            end: offset,
        }
    }

    /// The minimal region spanning both `self` and `other`.
    pub fn cover(self, other: Self) -> Self {
        Self {
            begin: self.begin.min(other.begin),
            end: self.end.max(other.end),
        }
    }

    /// Whether `offset` falls within the region, end inclusive.
    pub const fn contains(self, offset: Offset) -> bool {
        self.begin <= offset && offset <= self.end
    }

    pub const fn len(self) -> usize {
        self.end - self.begin
    }

    pub const fn is_empty(self) -> bool {
        self.begin == self.end
    }
}
