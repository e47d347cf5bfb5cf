//! OPLang front end
//!
//! This module transforms OPLang source text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens, pulled on demand)
//! - [`parse`]: Parsing (tokens → concrete syntax tree), split across
//!   `declarations`, `statements` and `expressions`
//! - [`cst`]: Concrete syntax tree definitions
//! - [`builder`]: CST → AST transformation
//! - [`ast`]: AST node definitions, with their canonical text form in `display`
//!
//! # Supported language
//!
//! - Classes with single inheritance (`class B extends A { ... }`)
//! - Members: attributes (`static`, `final`), methods, constructors,
//!   destructors (`~Name()`), with or without a body
//! - Types: `int`, `float`, `string`, `boolean`, `void`, class names,
//!   one-dimensional arrays `T[N]`, by-reference parameters `T & x`
//! - Statements: declarations, `:=` assignment, call statements,
//!   `if/then/else`, `for/to/downto/do`, `return`, `break`, `continue`, blocks
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser, one method per precedence level.
//! No external parser generator dependencies.

pub mod ast;
pub mod builder;
pub mod cst;
mod declarations;
mod display;
mod expressions;
pub mod lexer;
pub mod parse;
mod statements;

pub use builder::{AstBuilder, BuildError};
pub use lexer::{
    token_listing, token_listing_report, token_listing_with, LexError, LexErrorKind, Lexer, Token,
    TokenKind,
};
pub use parse::{ParseError, Parser, SyntaxError, MAX_NESTING};
