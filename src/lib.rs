//! # Introduction
//!
//! `oplang` is the front end for OPLang, a small statically structured,
//! class-based language. It turns source text into an AST ready for semantic
//! analysis.
//!
//! ## Pipeline
//!
//! ```text
//! Source → Lexer → Parser → CST → AstBuilder → AST
//! ```
//!
//! 1. [`parser::lexer`] scans characters into tokens on demand.
//! 2. [`parser::parse`] runs recursive descent over the token stream, producing a
//!    [`parser::cst::ProgramNode`] or the first syntax error.
//! 3. [`parser::builder`] reshapes the CST into the [`parser::ast`] model.
//! 4. [`config`] holds lexer policy and driver output settings, loadable from JSON.
//!
//! ```
//! let program = oplang::parse_source("class A { int x; }").unwrap();
//! assert_eq!(
//!     program.to_string(),
//!     "Program([ClassDecl(A, [AttributeDecl(PrimitiveType(int), [Attribute(x)])])])"
//! );
//! ```

pub mod config;
pub mod error;
pub mod parser;

pub use config::{CommentPolicy, FrontendConfig, LexerConfig};
pub use error::FrontendError;
pub use parser::ast::Program;

use parser::{AstBuilder, LexError, Lexer, Parser, Token};

/// Scan `source` completely, including the trailing end-of-input token.
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    Lexer::new(source).tokenize()
}

/// Lex, parse and build `source` with the default configuration.
pub fn parse_source(source: &str) -> Result<Program, FrontendError> {
    parse_source_with(source, &LexerConfig::default())
}

pub fn parse_source_with(source: &str, config: &LexerConfig) -> Result<Program, FrontendError> {
    let cst = Parser::with_config(source, *config).parse_program()?;
    let program = AstBuilder::new().build(&cst)?;
    log::debug!("built program with {} class(es)", program.classes.len());
    Ok(program)
}

/// `"success"` when `source` is syntactically valid, otherwise the message of
/// the first lexical or syntax error.
pub fn check_syntax(source: &str) -> String {
    match Parser::new(source).parse_program() {
        Ok(_) => "success".to_string(),
        Err(err) => err.to_string(),
    }
}
