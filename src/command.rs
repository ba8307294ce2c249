//! Command dispatch.
//!
//! Each command runs in two phases: [`plan`] reads the host and computes a
//! single [`Edit`], then [`run`] hands that edit to the host. A failure in
//! planning returns before anything is applied.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::boundary::{
    find_comment_block, find_docstring_block, find_function_body, find_function_signature,
    DEFAULT_SCAN_WINDOW,
};
use crate::docgen::{doc_block, parameter_names, synthesize, FunctionDescriptor};
use crate::error::{Error, Result};
use crate::host::{Host, ScopeLabel};
use crate::reflow::{leading_whitespace, render_comment, render_docstring, DEFAULT_WIDTH};
use crate::region::Region;

/// Indentation added under a `def` line for a generated docstring.
const BODY_INDENT: &str = "    ";

/// Commands exposed to the host.
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Command {
    /// Insert a docstring with parameter placeholders after the signature.
    GenerateDocBlock,
    /// Re-flow the docstring or comment run at the cursor.
    ReformatDocOrComment,
    /// Insert a field-list skeleton into the open docstring at the cursor.
    GenerateStructuredDoc,
}

/// Layout settings for a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Maximum line width in columns.
    pub width: usize,
    /// Lines a signature scan may cover in each direction.
    pub scan_window: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            scan_window: DEFAULT_SCAN_WINDOW,
        }
    }
}

/// A single replacement: `region` becomes `text`. A zero-width region is an
/// insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edit {
    pub region: Region,
    pub text: String,
}

/// Compute the edit `command` would make at the host's cursor.
pub fn plan<H: Host + ?Sized>(host: &H, command: Command, options: &Options) -> Result<Edit> {
    let cursor = host.selection_start();
    debug!(?command, cursor, "planning edit");
    match command {
        Command::GenerateDocBlock => plan_doc_block(host, cursor, options),
        Command::ReformatDocOrComment => plan_reformat(host, cursor, options),
        Command::GenerateStructuredDoc => plan_structured_doc(host, cursor, options),
    }
}

/// Plan `command` and apply the result to the host as one edit.
pub fn run<H: Host + ?Sized>(host: &mut H, command: Command, options: &Options) -> Result<Edit> {
    let edit = plan(host, command, options)?;
    host.apply_edit(edit.region, &edit.text);
    debug!(region = ?edit.region, "applied edit");
    Ok(edit)
}

fn plan_doc_block<H: Host + ?Sized>(host: &H, cursor: usize, options: &Options) -> Result<Edit> {
    let signature = find_function_signature(host, cursor, options.scan_window)?;
    let names = parameter_names(&signature.params)?;
    let indent = format!("{}{BODY_INDENT}", signature.indent);
    Ok(Edit {
        region: Region::point(signature.end_line.end),
        text: doc_block(&names, &indent),
    })
}

fn plan_reformat<H: Host + ?Sized>(host: &H, cursor: usize, options: &Options) -> Result<Edit> {
    let scope = host.scope_at(cursor);
    debug!(?scope, "reformatting");
    let (region, text) = match scope {
        ScopeLabel::DocString => {
            let block = find_docstring_block(host, cursor)?;
            let text = host.text_in_region(block.region);
            let rendered = render_docstring(&text, block.opening_column(), options.width)?;
            (block.region, rendered)
        }
        ScopeLabel::LineComment => {
            let region = find_comment_block(host, cursor)?;
            (region, render_comment(&host.text_in_region(region), options.width)?)
        }
        ScopeLabel::Code => return Err(Error::InoperableScope(scope)),
    };
    Ok(Edit { region, text })
}

fn plan_structured_doc<H: Host + ?Sized>(
    host: &H,
    cursor: usize,
    options: &Options,
) -> Result<Edit> {
    let scope = host.scope_at(cursor);
    if scope != ScopeLabel::DocString {
        return Err(Error::InoperableScope(scope));
    }
    let extent = host
        .scope_extent(cursor)
        .ok_or(Error::not_found("documentation string"))?;
    let opening = host.text_in_region(host.line_at(extent.begin));
    let indent = leading_whitespace(&opening);

    let signature = find_function_signature(host, extent.begin, options.scan_window)?;
    let body = find_function_body(host, &signature);
    let descriptor =
        FunctionDescriptor::from_source(&signature.params, &host.text_in_region(body))?;
    let skeleton = synthesize(&descriptor, indent).join("\n");

    let line = host.line_at(cursor);
    if host.text_in_region(line).trim().is_empty() {
        return Ok(Edit {
            region: line,
            text: skeleton,
        });
    }
    Ok(Edit {
        region: Region::point(cursor),
        text: format!("\n{skeleton}\n{indent}"),
    })
}
