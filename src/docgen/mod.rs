//! Documentation synthesis from function signatures.
//!
//! Turns the raw parameter list and body text of a function into a
//! [`FunctionDescriptor`], and renders field-list skeletons from it.

mod params;
mod skeleton;

pub use params::{parameter_names, raised_exceptions};
pub use skeleton::{doc_block, synthesize};

use crate::error::Result;

/// What the generated documentation is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FunctionDescriptor {
    /// Parameter names in signature order.
    pub params: Vec<String>,
    /// Distinct exception names raised in the body, first occurrence first.
    pub exceptions: Vec<String>,
}

impl FunctionDescriptor {
    /// Build a descriptor from the text between a signature's parentheses and
    /// the text of the function body.
    pub fn from_source(params: &str, body: &str) -> Result<Self> {
        Ok(Self {
            params: parameter_names(params)?,
            exceptions: raised_exceptions(body),
        })
    }
}
