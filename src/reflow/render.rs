//! Rebuilding documentation strings and comment runs from their words.

use std::sync::LazyLock;

use regex::Regex;
use unicode_width::UnicodeWidthStr;

use super::leading_whitespace;
use super::paragraph::{split_paragraphs, split_sections, Paragraph};
use super::wrap::wrap;
use crate::error::{Error, Result};

/// Indentation, then a run of `#` markers, then the comment text.
pub(crate) static COMMENT_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<indent>\s*)(?P<marker>#+)(?P<text>.*)$").expect("comment pattern compiles")
});

const DOC_DELIMITERS: [&str; 2] = ["\"\"\"", "'''"];

/// Lay out one paragraph at `indent`.
///
/// Paragraphs holding field markers are laid out section by section, each
/// label glued to its first content word and continuation lines aligned
/// under the content.
pub fn render_paragraph(paragraph: &Paragraph, width: usize, indent: &str) -> Vec<String> {
    if !paragraph.has_sections() {
        return wrap(&paragraph.words, width, indent, indent);
    }

    let mut lines = Vec::new();
    for section in split_sections(paragraph) {
        if section.is_labeled() {
            let label = section.label_text();
            let initial = format!("{indent}{label} ");
            let continuation = format!("{indent}{}", " ".repeat(label.width() + 1));
            lines.extend(wrap(&section.content, width, &initial, &continuation));
        } else {
            lines.extend(wrap(&section.content, width, indent, indent));
        }
    }
    lines
}

/// Re-flow a documentation string.
///
/// `text` starts at the beginning of the line holding the opening delimiter
/// and ends right after the closing one; `opening` is the character offset
/// of the opening delimiter within `text`. The result keeps whatever
/// precedes that delimiter on its line, puts each paragraph on its own
/// blank-line separated block indented like that line, and closes with the
/// delimiter on a line of its own.
pub fn render_docstring(text: &str, opening: usize, width: usize) -> Result<String> {
    let first_line = text.lines().next().unwrap_or_default();
    let open_at = text
        .char_indices()
        .nth(opening)
        .map_or(text.len(), |(at, _)| at);
    let delimiter = DOC_DELIMITERS
        .into_iter()
        .find(|d| text[open_at..].starts_with(*d))
        .ok_or(Error::not_found("opening docstring delimiter"))?;

    let body_start = open_at + delimiter.len();
    let rest = &text[body_start..];
    let close_at = rest
        .rfind(delimiter)
        .ok_or(Error::not_found("closing docstring delimiter"))?;

    let indent = leading_whitespace(first_line);
    let mut out = vec![text[..body_start].to_string()];
    for (i, paragraph) in split_paragraphs(&rest[..close_at]).iter().enumerate() {
        if i > 0 {
            out.push(String::new());
        }
        out.extend(render_paragraph(paragraph, width, indent));
    }
    out.push(format!("{indent}{delimiter}"));
    Ok(out.join("\n"))
}

/// Re-flow a run of `#` comment lines.
///
/// Paragraph breaks are kept: blank comment lines in the input become a
/// single marker-only line between re-flowed paragraphs. Every line reuses
/// the first line's indentation and marker.
pub fn render_comment(text: &str, width: usize) -> Result<String> {
    let first = text
        .lines()
        .next()
        .and_then(|line| COMMENT_LINE.captures(line))
        .ok_or(Error::not_found("comment marker"))?;
    let indent = first.name("indent").map_or("", |m| m.as_str());
    let marker = first.name("marker").map_or("#", |m| m.as_str());

    let stripped = text
        .lines()
        .map(|line| {
            COMMENT_LINE
                .captures(line)
                .and_then(|c| c.name("text"))
                .map_or(line, |m| m.as_str())
        })
        .collect::<Vec<_>>()
        .join("\n");

    let bare = format!("{indent}{marker}");
    let prefix = format!("{bare} ");
    let mut out: Vec<String> = Vec::new();
    for (i, paragraph) in split_paragraphs(&stripped).iter().enumerate() {
        if i > 0 {
            out.push(bare.clone());
        }
        out.extend(wrap(&paragraph.words, width, &prefix, &prefix));
    }
    if out.is_empty() {
        out.push(bare);
    }
    Ok(out.join("\n"))
}
