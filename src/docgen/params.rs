use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// Names dropped when they lead the parameter list.
const SELF_LIKE: [&str; 2] = ["self", "cls"];

static RAISE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*raise\s+(?P<name>[A-Za-z_][\w.]*)").expect("raise pattern compiles")
});

/// Parameter names from the raw text between a signature's parentheses.
///
/// Defaults and annotations are stripped, `*`/`**` prefixes dropped along
/// with bare `*` and `/` markers, and a leading `self` or `cls` skipped.
pub fn parameter_names(params: &str) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for (i, fragment) in split_top_level(params)?.into_iter().enumerate() {
        let name = fragment
            .split(['=', ':'])
            .next()
            .unwrap_or_default()
            .trim()
            .trim_start_matches('*');
        if name.is_empty() || name == "/" {
            continue;
        }
        if i == 0 && SELF_LIKE.contains(&name) {
            continue;
        }
        if !name.chars().all(|c| c.is_alphanumeric() || c == '_') {
            return Err(Error::MalformedSignature(format!(
                "cannot read a parameter name from {:?}",
                fragment.trim()
            )));
        }
        names.push(name.to_string());
    }
    Ok(names)
}

/// Exception names raised in `body`, deduplicated in first-seen order.
///
/// Only `raise Name` statements count. Bare re-raises are skipped, as is
/// anything after a `#` on the line.
pub fn raised_exceptions(body: &str) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();
    for line in body.lines() {
        let code = line.split('#').next().unwrap_or_default();
        if let Some(name) = RAISE.captures(code).and_then(|c| c.name("name")) {
            let name = name.as_str();
            if !found.iter().any(|seen| seen == name) {
                found.push(name.to_string());
            }
        }
    }
    found
}

// Split on commas at bracket depth zero, outside quotes and comments.
fn split_top_level(params: &str) -> Result<Vec<String>> {
    let mut fragments = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut in_comment = false;

    for c in params.chars() {
        if in_comment {
            if c == '\n' {
                in_comment = false;
                current.push(c);
            }
            continue;
        }
        if let Some(q) = quote {
            current.push(c);
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
            '#' => in_comment = true,
            '"' | '\'' => {
                quote = Some(c);
                current.push(c);
            }
            '(' | '[' | '{' => {
                depth += 1;
                current.push(c);
            }
            ')' | ']' | '}' => {
                depth = depth.checked_sub(1).ok_or_else(|| {
                    Error::MalformedSignature("unbalanced brackets in parameter list".into())
                })?;
                current.push(c);
            }
            ',' if depth == 0 => fragments.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }

    if depth != 0 || quote.is_some() {
        return Err(Error::MalformedSignature(
            "unbalanced brackets in parameter list".into(),
        ));
    }
    fragments.push(current);
    Ok(fragments)
}
