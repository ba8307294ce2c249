//! Splitting block text into paragraphs and structured field sections.

use std::sync::LazyLock;

use regex::Regex;

/// First character of a structured field marker such as `:param`.
pub const FIELD_MARKER: char = ':';

/// Last character of a field label such as `:param name:`.
pub const FIELD_SEPARATOR: char = ':';

/// Most tokens a field label may span before it is given up on.
pub const LABEL_LOOKAHEAD: usize = 3;

// `:param`, `:returns:`, `:raises`; not `:` alone or `:123`.
static FIELD_START: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^:[A-Za-z_]\w*").expect("field start pattern compiles"));

/// Number of leading `words` forming a field label, or 0 when they do not.
///
/// A label opens with a `:name` token and ends at the first token carrying
/// [`FIELD_SEPARATOR`] within [`LABEL_LOOKAHEAD`] tokens. Inline roles such
/// as ``:class:`Foo` `` hold a backtick and never form a label.
pub fn label_len<S: AsRef<str>>(words: &[S]) -> usize {
    let opens = words
        .first()
        .is_some_and(|w| w.as_ref().starts_with(FIELD_MARKER) && FIELD_START.is_match(w.as_ref()));
    if !opens {
        return 0;
    }
    for (i, word) in words.iter().take(LABEL_LOOKAHEAD).enumerate() {
        let word = word.as_ref();
        if word.contains('`') {
            return 0;
        }
        if word.ends_with(FIELD_SEPARATOR) {
            return i + 1;
        }
    }
    0
}

/// Words from a run of non-blank lines, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Paragraph {
    pub words: Vec<String>,
}

impl Paragraph {
    /// Whether any word opens a structured field.
    pub fn has_sections(&self) -> bool {
        (0..self.words.len()).any(|i| label_len(&self.words[i..]) > 0)
    }
}

/// A structured entry inside a paragraph.
///
/// `label` holds the marker tokens (`:param`, `name:`) that must stay glued
/// to the first content word. It is empty for text preceding the first
/// field label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    pub label: Vec<String>,
    pub content: Vec<String>,
}

impl Section {
    fn from_tokens(mut tokens: Vec<String>) -> Self {
        let content = tokens.split_off(label_len(&tokens));
        Self {
            label: tokens,
            content,
        }
    }

    pub fn label_text(&self) -> String {
        self.label.join(" ")
    }

    pub fn is_labeled(&self) -> bool {
        !self.label.is_empty()
    }
}

/// Split text into paragraphs separated by blank lines.
///
/// Runs of blank lines collapse into a single break and no empty paragraph
/// is ever returned.
pub fn split_paragraphs(text: &str) -> Vec<Paragraph> {
    let mut paragraphs = Vec::new();
    let mut current = Paragraph::default();

    for line in text.lines() {
        let words: Vec<String> = line.split_whitespace().map(ToOwned::to_owned).collect();
        if words.is_empty() {
            if !current.words.is_empty() {
                paragraphs.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.words.extend(words);
    }

    if !current.words.is_empty() {
        paragraphs.push(current);
    }
    paragraphs
}

/// Split a paragraph into sections at field labels.
///
/// Tokens that start with the marker but do not form a label stay in the
/// running text. A label only opens a new section when the current one
/// already holds tokens, so a label leading the paragraph does not leave an
/// empty section behind.
pub fn split_sections(paragraph: &Paragraph) -> Vec<Section> {
    let mut groups: Vec<Vec<String>> = Vec::new();
    let mut current: Vec<String> = Vec::new();

    for (i, word) in paragraph.words.iter().enumerate() {
        if !current.is_empty() && label_len(&paragraph.words[i..]) > 0 {
            groups.push(std::mem::take(&mut current));
        }
        current.push(word.clone());
    }
    if !current.is_empty() {
        groups.push(current);
    }

    groups.into_iter().map(Section::from_tokens).collect()
}
