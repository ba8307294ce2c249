//! Locating comment runs, documentation strings and function signatures
//! around the cursor.
//!
//! All scans walk whole lines through [`Host::line_at`]. Scans that could
//! run away on malformed input go through [`bounded_search`], which gives
//! up after a fixed number of lines instead of walking the whole buffer.

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::host::{Host, ScopeLabel};
use crate::reflow::{leading_whitespace, COMMENT_LINE};
use crate::region::{Offset, Region};

/// Default number of lines a signature scan may look through.
pub const DEFAULT_SCAN_WINDOW: usize = 30;

static DEF_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>\s*)(?:async\s+)?def\s+\w+\s*\(").expect("def pattern compiles")
});

// `):` with an optional return annotation in between.
static SIGNATURE_END: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\)\s*(?:->[^:]*)?:").expect("signature end pattern compiles"));

/// Direction of a line walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A function signature, possibly spread over several lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// The line holding `def`.
    pub def_line: Region,
    /// The line holding the `):` that closes the parameter list.
    pub end_line: Region,
    /// Leading whitespace of the `def` line.
    pub indent: String,
    /// Raw text between the opening parenthesis and its matching close.
    pub params: String,
}

impl Signature {
    /// From the start of the `def` line to the end of the closing line.
    pub fn region(&self) -> Region {
        self.def_line.cover(self.end_line)
    }
}

/// Whether `line` starts a function definition.
pub fn is_def_line(line: &str) -> bool {
    DEF_LINE.is_match(line)
}

// `#!` interpreter lines and encoding declarations, honored in the first
// two lines of a file only.
static HEADER_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:#!|[ \t\f]*#.*?coding[:=][ \t]*[-\w.]+)").expect("directive pattern compiles")
});

/// Whether `line` is a comment line that may join a re-flowed block.
fn is_comment_line<H: Host + ?Sized>(host: &H, line: Region) -> bool {
    let text = host.text_in_region(line);
    COMMENT_LINE.is_match(&text)
        && !(is_header_line(host, line) && HEADER_DIRECTIVE.is_match(&text))
}

fn is_header_line<H: Host + ?Sized>(host: &H, line: Region) -> bool {
    line.begin == 0 || adjacent_line(host, line, Direction::Up).is_some_and(|up| up.begin == 0)
}

/// The line next to `line` in `direction`, or `None` at a buffer edge.
pub fn adjacent_line<H: Host + ?Sized>(host: &H, line: Region, direction: Direction) -> Option<Region> {
    match direction {
        Direction::Up => (line.begin > 0).then(|| host.line_at(line.begin - 1)),
        Direction::Down => {
            // Step past the terminator, which may be more than one character.
            let mut offset = line.end + 1;
            while offset <= host.len() {
                let next = host.line_at(offset);
                if next.begin > line.begin {
                    return Some(next);
                }
                offset += 1;
            }
            None
        }
    }
}

/// Lines starting at `start` (inclusive) and walking in `direction`.
pub fn lines_from<H: Host + ?Sized>(
    host: &H,
    start: Region,
    direction: Direction,
) -> impl Iterator<Item = Region> + '_ {
    std::iter::successors(Some(start), move |line| adjacent_line(host, *line, direction))
}

/// The first of at most `cap` lines from `start` whose text satisfies `stop`.
pub fn bounded_search<H: Host + ?Sized>(
    host: &H,
    start: Region,
    direction: Direction,
    cap: usize,
    mut stop: impl FnMut(&str) -> bool,
) -> Option<Region> {
    lines_from(host, start, direction)
        .take(cap)
        .find(|line| stop(&host.text_in_region(*line)))
}

/// The run of contiguous comment lines around the cursor's line.
///
/// The cursor's own line must be a comment line; a trailing comment after
/// code does not count.
pub fn find_comment_block<H: Host + ?Sized>(host: &H, cursor: Offset) -> Result<Region> {
    let line = host.line_at(cursor);
    if !is_comment_line(host, line) {
        warn!(cursor, "cursor line is not a comment line");
        return Err(Error::not_found("comment block"));
    }

    let extend = |direction| {
        lines_from(host, line, direction)
            .skip(1)
            .take_while(|l| is_comment_line(host, *l))
            .last()
            .unwrap_or(line)
    };
    let region = extend(Direction::Up).cover(extend(Direction::Down));
    debug!(?region, "found comment block");
    Ok(region)
}

/// A documentation string widened to whole lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocstringBlock {
    /// From the start of the opening delimiter's line to the closing one.
    pub region: Region,
    /// Where the opening delimiter itself starts.
    pub opening: Offset,
}

impl DocstringBlock {
    /// Offset of the opening delimiter from the start of `region`.
    pub const fn opening_column(&self) -> usize {
        self.opening - self.region.begin
    }
}

/// The documentation string at the cursor, widened to start at the
/// beginning of the line its opening delimiter sits on.
pub fn find_docstring_block<H: Host + ?Sized>(host: &H, cursor: Offset) -> Result<DocstringBlock> {
    let extent = (host.scope_at(cursor) == ScopeLabel::DocString)
        .then(|| host.scope_extent(cursor))
        .flatten()
        .ok_or(Error::not_found("documentation string"))?;
    let block = DocstringBlock {
        region: host.line_at(extent.begin).cover(extent),
        opening: extent.begin,
    };
    debug!(?block, "found docstring block");
    Ok(block)
}

/// The signature of the function enclosing the cursor.
///
/// Looks up to `window` lines back for a `def` line, then up to `window`
/// lines forward from it for the line closing the parameter list.
pub fn find_function_signature<H: Host + ?Sized>(
    host: &H,
    cursor: Offset,
    window: usize,
) -> Result<Signature> {
    let def_line = bounded_search(host, host.line_at(cursor), Direction::Up, window, is_def_line)
        .ok_or_else(|| {
            warn!(cursor, window, "no function definition above cursor");
            Error::not_found_within("function definition", window)
        })?;
    let end_line = bounded_search(host, def_line, Direction::Down, window, |text| {
        SIGNATURE_END.is_match(text)
    })
    .ok_or_else(|| {
        warn!(?def_line, window, "parameter list never closes");
        Error::not_found_within("end of parameter list", window)
    })?;

    let def_text = host.text_in_region(def_line);
    let text = host.text_in_region(def_line.cover(end_line));
    let signature = Signature {
        def_line,
        end_line,
        indent: leading_whitespace(&def_text).to_string(),
        params: parameter_list(&text)?.to_string(),
    };
    debug!(region = ?signature.region(), params = %signature.params, "found signature");
    Ok(signature)
}

/// The lines after a signature up to the next `def` line or the buffer end.
///
/// Zero-width at the end of the signature when nothing follows it.
pub fn find_function_body<H: Host + ?Sized>(host: &H, signature: &Signature) -> Region {
    lines_from(host, signature.end_line, Direction::Down)
        .skip(1)
        .take_while(|line| !is_def_line(&host.text_in_region(*line)))
        .reduce(Region::cover)
        .unwrap_or_else(|| Region::point(signature.end_line.end))
}

/// The text between the first `(` and the `)` that balances it.
///
/// Brackets inside quoted defaults are ignored.
pub fn parameter_list(text: &str) -> Result<&str> {
    let open = text
        .find('(')
        .ok_or_else(|| Error::MalformedSignature("no opening parenthesis".into()))?;
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;

    for (i, c) in text[open..].char_indices() {
        if let Some(q) = quote {
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '"' | '\'' => quote = Some(c),
            '(' | '[' | '{' => depth += 1,
            // The scan starts on the opening paren, so depth is at least 1 here.
            ')' | ']' | '}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[open + 1..open + i]);
                }
            }
            _ => {}
        }
    }
    Err(Error::MalformedSignature(
        "parameter list is never closed".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::EditorBuffer;

    fn buffer_at(text: &str, line: usize, col: usize) -> EditorBuffer {
        let mut buf = EditorBuffer::from_text(text);
        buf.move_to(line, col);
        buf
    }

    fn text_of(buf: &EditorBuffer, region: Region) -> String {
        buf.text_in_region(region)
    }

    // --- Line walking ---

    #[test]
    fn test_adjacent_line_stops_at_edges() {
        let buf = EditorBuffer::from_text("a\nb");
        let first = buf.line_at(0);
        let last = buf.line_at(2);
        assert_eq!(adjacent_line(&buf, first, Direction::Up), None);
        assert_eq!(adjacent_line(&buf, first, Direction::Down), Some(last));
        assert_eq!(adjacent_line(&buf, last, Direction::Down), None);
        assert_eq!(adjacent_line(&buf, last, Direction::Up), Some(first));
    }

    #[test]
    fn test_adjacent_line_steps_over_crlf() {
        let buf = EditorBuffer::from_text("a\r\nb\r\nc");
        let lines: Vec<String> = lines_from(&buf, buf.line_at(0), Direction::Down)
            .map(|l| text_of(&buf, l))
            .collect();
        assert_eq!(lines, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_bounded_search_respects_cap() {
        let buf = EditorBuffer::from_text("x\nx\nx\ntarget\n");
        let start = buf.line_at(0);
        assert!(bounded_search(&buf, start, Direction::Down, 3, |t| t == "target").is_none());
        let found = bounded_search(&buf, start, Direction::Down, 4, |t| t == "target");
        assert_eq!(found.map(|r| text_of(&buf, r)), Some("target".to_string()));
    }

    // --- Comment blocks ---

    #[test]
    fn test_comment_block_extends_both_ways() {
        let text = "x = 1\n    # one\n    # two\n    # three\ny = 2\n";
        let buf = buffer_at(text, 2, 6);
        let region = find_comment_block(&buf, buf.selection_start()).unwrap();
        assert_eq!(text_of(&buf, region), "    # one\n    # two\n    # three");
    }

    #[test]
    fn test_comment_block_at_buffer_edges() {
        let buf = buffer_at("# a\n# b", 0, 0);
        let region = find_comment_block(&buf, 0).unwrap();
        assert_eq!(region, Region::new(0, 7));
    }

    #[test]
    fn test_comment_block_keeps_first_line_indent() {
        let text = "        # deep\n        # deeper\n";
        let buf = buffer_at(text, 1, 12);
        let region = find_comment_block(&buf, buf.selection_start()).unwrap();
        let first = text_of(&buf, buf.line_at(region.begin));
        assert_eq!(leading_whitespace(&first), "        ");
    }

    #[test]
    fn test_trailing_comment_is_not_a_block() {
        let buf = buffer_at("x = 1  # note\n", 0, 10);
        assert!(matches!(
            find_comment_block(&buf, buf.selection_start()),
            Err(Error::BoundaryNotFound { .. })
        ));
    }

    #[test]
    fn test_comment_block_stops_at_file_header() {
        let text = "#!/usr/bin/env python\n# -*- coding: utf-8 -*-\n# Module notes\n# go here.\nx = 1\n";
        let buf = buffer_at(text, 2, 4);
        let region = find_comment_block(&buf, buf.selection_start()).unwrap();
        assert_eq!(text_of(&buf, region), "# Module notes\n# go here.");
    }

    #[test]
    fn test_shebang_line_is_not_a_block() {
        let buf = buffer_at("#!/usr/bin/env python\n# notes\n", 0, 3);
        assert!(find_comment_block(&buf, buf.selection_start()).is_err());
    }

    #[test]
    fn test_coding_words_below_header_stay_in_block() {
        let text = "x = 1\ny = 2\n# decoding: the input\n# is bytes\n";
        let buf = buffer_at(text, 3, 4);
        let region = find_comment_block(&buf, buf.selection_start()).unwrap();
        assert_eq!(text_of(&buf, region), "# decoding: the input\n# is bytes");
    }

    // --- Docstrings ---

    #[test]
    fn test_docstring_block_includes_opening_line() {
        let text = "def f():\n    x = \"\"\"doc\n    text\"\"\"\n";
        let buf = buffer_at(text, 2, 5);
        let block = find_docstring_block(&buf, buf.selection_start()).unwrap();
        assert_eq!(text_of(&buf, block.region), "    x = \"\"\"doc\n    text\"\"\"");
        assert_eq!(block.opening_column(), 8);
    }

    #[test]
    fn test_docstring_block_after_string_closing_on_same_line() {
        let text = "x = \"\"\"a\nb\"\"\"; y = \"\"\"c\nd\"\"\"";
        let buf = buffer_at(text, 1, 13);
        let block = find_docstring_block(&buf, buf.selection_start()).unwrap();
        assert_eq!(block.region, Region::new(9, 28));
        assert_eq!(block.opening, 19);
        assert_eq!(block.opening_column(), 10);
    }

    #[test]
    fn test_docstring_block_outside_string_fails() {
        let buf = buffer_at("x = 1\n", 0, 1);
        assert!(find_docstring_block(&buf, 1).is_err());
    }

    // --- Signatures ---

    #[test]
    fn test_single_line_signature() {
        let text = "class A:\n    def go(self, a, b=1):\n        pass\n";
        let buf = buffer_at(text, 2, 8);
        let sig = find_function_signature(&buf, buf.selection_start(), 30).unwrap();
        assert_eq!(sig.params, "self, a, b=1");
        assert_eq!(sig.indent, "    ");
        assert_eq!(sig.def_line, sig.end_line);
    }

    #[test]
    fn test_multi_line_signature_with_annotation() {
        let text = "async def fetch(\n    url: str,\n    retries: int = 3,\n) -> dict:\n    pass\n";
        let buf = buffer_at(text, 4, 4);
        let sig = find_function_signature(&buf, buf.selection_start(), 30).unwrap();
        assert_eq!(sig.params, "\n    url: str,\n    retries: int = 3,\n");
        assert_eq!(text_of(&buf, sig.end_line), ") -> dict:");
    }

    #[test]
    fn test_signature_with_nested_brackets() {
        let text = "def f(a=(1, 2), b=\")\"):\n    pass\n";
        let buf = buffer_at(text, 1, 0);
        let sig = find_function_signature(&buf, buf.selection_start(), 30).unwrap();
        assert_eq!(sig.params, "a=(1, 2), b=\")\"");
    }

    #[test]
    fn test_no_def_within_window() {
        let mut text = String::from("def far(a):\n");
        text.push_str(&"    x = 1\n".repeat(40));
        let buf = buffer_at(&text, 40, 0);
        let err = find_function_signature(&buf, buf.selection_start(), 30).unwrap_err();
        assert_eq!(
            err,
            Error::BoundaryNotFound {
                what: "function definition",
                limit: Some(30)
            }
        );
    }

    #[test]
    fn test_unterminated_parameter_list_is_bounded() {
        let mut text = String::from("def f(\n");
        text.push_str(&"    a,\n".repeat(40));
        let buf = buffer_at(&text, 0, 0);
        let err = find_function_signature(&buf, 0, 30).unwrap_err();
        assert_eq!(
            err,
            Error::BoundaryNotFound {
                what: "end of parameter list",
                limit: Some(30)
            }
        );
    }

    // --- Bodies ---

    #[test]
    fn test_body_stops_at_next_def() {
        let text = "def f(a):\n    raise A\n    return 1\ndef g():\n    raise B\n";
        let buf = buffer_at(text, 0, 0);
        let sig = find_function_signature(&buf, 0, 30).unwrap();
        let body = find_function_body(&buf, &sig);
        assert_eq!(text_of(&buf, body), "    raise A\n    return 1");
    }

    #[test]
    fn test_body_runs_to_buffer_end() {
        let text = "def f(a):\n    raise A";
        let buf = buffer_at(text, 0, 0);
        let sig = find_function_signature(&buf, 0, 30).unwrap();
        assert_eq!(text_of(&buf, find_function_body(&buf, &sig)), "    raise A");
    }

    #[test]
    fn test_body_empty_after_last_line_signature() {
        let buf = buffer_at("def f(a):", 0, 0);
        let sig = find_function_signature(&buf, 0, 30).unwrap();
        assert_eq!(find_function_body(&buf, &sig), Region::point(9));
    }

    // --- Parameter list extraction ---

    #[test]
    fn test_parameter_list_unbalanced() {
        assert!(matches!(
            parameter_list("def f(a, (b):"),
            Err(Error::MalformedSignature(_))
        ));
        assert!(matches!(
            parameter_list("def f:"),
            Err(Error::MalformedSignature(_))
        ));
    }
}
