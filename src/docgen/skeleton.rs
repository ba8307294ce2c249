use super::FunctionDescriptor;

/// Field-list skeleton for a function: a `:param:`/`:type:` pair per
/// parameter, one `:returns:`/`:rtype:` pair, and a `:raises:` entry per
/// exception. Each line starts with `indent`.
pub fn synthesize(descriptor: &FunctionDescriptor, indent: &str) -> Vec<String> {
    let mut lines = Vec::with_capacity(descriptor.params.len() * 2 + 2 + descriptor.exceptions.len());
    for name in &descriptor.params {
        lines.push(format!("{indent}:param {name}:"));
        lines.push(format!("{indent}:type {name}:"));
    }
    lines.push(format!("{indent}:returns:"));
    lines.push(format!("{indent}:rtype:"));
    for exception in &descriptor.exceptions {
        lines.push(format!("{indent}:raises {exception}:"));
    }
    lines
}

/// A complete docstring with a description placeholder and bracketed
/// placeholders per parameter, meant to be inserted at the end of a
/// signature's last line. Starts with a newline and ends on the closing
/// delimiter.
pub fn doc_block(params: &[String], indent: &str) -> String {
    let mut lines = vec![
        String::new(),
        format!("{indent}\"\"\""),
        format!("{indent}DESCRIPTION"),
    ];
    for name in params {
        lines.push(String::new());
        lines.push(format!("{indent}:param {name}: [{name} Description]"));
        lines.push(format!("{indent}:type {name}: [{name} Type]"));
    }
    lines.push(format!("{indent}\"\"\""));
    lines.join("\n")
}
