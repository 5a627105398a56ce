//! shadexpr-parser: lexer and parser for shader expressions
//!
//! Turns a single HLSL/GLSL-flavored expression such as
//! `(float)(a.b[0] + vec3(1, 2, 3).x) * -c` into a typed tree that a code
//! generator can walk.
//!
//! # Design Principles
//!
//! 1. **Lexing on-demand**
//!    - The parser pulls one token at a time, with a non-consuming peek at
//!      the token after the current one for `(type)` cast detection
//!
//! 2. **Precedence climbing by level**
//!    - Ten binary levels from `*` (1) to `||` (10), all left-associative
//!    - Ternary sits above every level and nests to the right
//!
//! 3. **Arena-based allocation**
//!    - Nodes stored in one contiguous vector, referenced by [`NodeId`]
//!    - The arena doubles as the flat list of every node allocated
//!
//! 4. **Record, don't abort**
//!    - The first error is kept; parsing carries on with empty child slots
//!    - A post-parse pass rejects any tree that still has an empty slot
//!
//! # Example
//!
//! ```
//! use shadexpr_parser::{parse, ParserOptions};
//!
//! let ast = parse("1 + 2 * 3", ParserOptions::default()).unwrap();
//! assert_eq!(shadexpr_parser::to_sexpr(&ast.arena, ast.root), "(+ 1 (* 2 3))");
//! ```

mod arena;
mod ast;
mod error;
mod lexer;
mod parser;
mod precedence;
mod printer;
mod span;
mod token;
mod types;
mod validate;
mod visit;

// Re-exports
pub use arena::Arena;
pub use ast::*;
pub use error::ParseError;
pub use lexer::Lexer;
pub use parser::{Ast, Parser, ParserOptions};
pub use precedence::{PrecedenceTable, MAX_LEVEL};
pub use printer::{to_sexpr, to_source, Printer, Style};
pub use span::Span;
pub use token::{Token, TokenKind};
pub use types::ValueType;
pub use validate::find_missing_child;
pub use visit::{walk_node, Visitor};

/// Parse one shader expression.
pub fn parse(source: &str, options: ParserOptions) -> Result<Ast, ParseError> {
    Parser::with_options(source.as_bytes(), options).into_ast()
}

/// Parse and render in the given style.
pub fn render(source: &str, options: ParserOptions, style: Style) -> Result<String, ParseError> {
    let ast = parse(source, options)?;
    Ok(Printer::new(style).print(&ast.arena, ast.root))
}
