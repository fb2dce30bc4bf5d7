//! Scanner and parser for single-statement template calls:
//!
//! ```text
//! f('hello {{ .name }}', {
//!   name: 'world',
//!   count: 3,
//! });
//! ```
//!
//! [`parse`] turns the text into a [`FunctionStatement`] holding the raw
//! template literal and its variables. Rendering the template is left to a
//! [`Render`] implementation; [`Substitute`] is the stock one.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod render;

use std::io::Read;

pub use ast::FunctionStatement;
pub use error::{Expected, FcallError, ParseError, Result};
pub use lexer::{tokenize, Position, Scanner, Token, TokenKind};
pub use parser::Parser;
pub use render::{Registry, Render, Substitute, Verbatim};

/// Parse one statement from a string.
pub fn parse(source: &str) -> Result<FunctionStatement> {
    Ok(parser::parse(source)?)
}

/// Read all of `reader` and parse one statement from it.
pub fn parse_reader<R: Read>(mut reader: R) -> Result<FunctionStatement> {
    let mut source = String::new();
    reader.read_to_string(&mut source)?;
    parse(&source)
}

/// Parse one statement and render it.
pub fn render_source(source: &str, renderer: &dyn Render) -> Result<String> {
    parse(source)?.execute(renderer)
}
