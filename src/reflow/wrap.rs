use unicode_width::UnicodeWidthStr;

/// Greedy fill of `words` into lines no wider than `width` columns.
///
/// The first line starts with `initial_indent`, later lines with
/// `continuation_indent`. Indents count toward the width. A word is moved to
/// a new line only when the current line already holds a word, so the first
/// word after an indent always stays put and an over-long word is emitted
/// unsplit on its own line.
pub fn wrap<S: AsRef<str>>(
    words: &[S],
    width: usize,
    initial_indent: &str,
    continuation_indent: &str,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = initial_indent.to_string();
    let mut current_width = initial_indent.width();
    let mut has_word = false;

    for word in words {
        let word = word.as_ref();
        let word_width = word.width();

        if has_word && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            current.push_str(continuation_indent);
            current_width = continuation_indent.width();
            has_word = false;
        }

        if has_word {
            current.push(' ');
            current_width += 1;
        }
        current.push_str(word);
        current_width += word_width;
        has_word = true;
    }

    if !has_word {
        current.truncate(current.trim_end().len());
    }
    lines.push(current);
    lines
}

/// [`wrap`], joined into one block of text.
pub fn fill<S: AsRef<str>>(
    words: &[S],
    width: usize,
    initial_indent: &str,
    continuation_indent: &str,
) -> String {
    wrap(words, width, initial_indent, continuation_indent).join("\n")
}
