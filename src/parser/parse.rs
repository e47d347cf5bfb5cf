//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, helper methods, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser uses a recursive descent approach with the following organization:
//! - This module: Parser struct, token buffering, helper methods, and coordination
//! - `declarations`: class, member, type and parameter productions
//! - `statements`: block and statement productions
//! - `expressions`: one method per precedence level
//!
//! # Token supply
//!
//! Tokens are pulled from the [`Lexer`] on demand into a small buffer that
//! always holds [`LOOKAHEAD`] tokens, which is the deepest lookahead any
//! production needs (`ID [ INT ] ID (`). A lexical error is parked and an
//! [`TokenKind::Error`] placeholder takes its place in the buffer; no
//! production accepts that placeholder, so the error surfaces exactly when the
//! parser reaches the point where scanning failed.
//!
//! # Nesting limit
//!
//! Expressions, unary operators and statements nest through recursion. Each
//! nested level counts against [`MAX_NESTING`]; entering one more level
//! reports a syntax error at the current token instead of exhausting the
//! stack.
//!
//! # Implementation
//!
//! Parser methods are split across multiple files using `impl Parser` blocks,
//! allowing each module to extend the Parser with related functionality while
//! maintaining access to the shared parser state.

use crate::config::LexerConfig;
use crate::parser::ast::SourceLocation;
use crate::parser::cst::{ProgramNode, Spelling};
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use log::debug;
use std::collections::VecDeque;
use std::fmt;

/// Number of tokens kept buffered ahead of the parse position
pub(crate) const LOOKAHEAD: usize = 6;

/// Deepest accepted nesting of expressions, unary operators and statements
pub const MAX_NESTING: usize = 64;

/// Unexpected token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    pub location: SourceLocation,
    /// Literal text of the offending token, or `<EOF>`
    pub found: String,
    /// What the production was looking for; not part of the rendered message
    pub expected: String,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Error on line {} col {}: {}",
            self.location.line, self.location.column, self.found
        )
    }
}

impl std::error::Error for SyntaxError {}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    Lex(LexError),
    Syntax(SyntaxError),
}

impl ParseError {
    pub fn location(&self) -> SourceLocation {
        match self {
            ParseError::Lex(err) => err.location,
            ParseError::Syntax(err) => err.location,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Lex(err) => err.fmt(f),
            ParseError::Syntax(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::Lex(err) => Some(err),
            ParseError::Syntax(err) => Some(err),
        }
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::Lex(err)
    }
}

impl From<SyntaxError> for ParseError {
    fn from(err: SyntaxError) -> Self {
        ParseError::Syntax(err)
    }
}

/// Recursive descent parser for OPLang
pub struct Parser {
    lexer: Lexer,
    buffer: VecDeque<Token>,
    pending: Option<LexError>,
    depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Self {
        Self::with_config(source, LexerConfig::default())
    }

    pub fn with_config(source: &str, config: LexerConfig) -> Self {
        let mut parser = Self {
            lexer: Lexer::with_config(source, config),
            buffer: VecDeque::with_capacity(LOOKAHEAD),
            pending: None,
            depth: 0,
        };
        parser.fill();
        parser
    }

    /// Parse the entire program: `classDecl* EOF`
    pub fn parse_program(&mut self) -> Result<ProgramNode, ParseError> {
        let mut program = ProgramNode::default();

        while !self.is_at_end() {
            if !self.check(TokenKind::Class) {
                return Err(self.error_at_current("'class'"));
            }
            let class = self.parse_class()?;
            debug!(
                "parsed class {} with {} member(s)",
                class.name.text,
                class.members.len()
            );
            program.classes.push(class);
        }

        Ok(program)
    }

    // ===== Token buffer =====

    fn fill(&mut self) {
        while self.buffer.len() < LOOKAHEAD {
            let next = match self.buffer.back() {
                // Both terminal kinds repeat forever
                Some(last) if matches!(last.kind, TokenKind::Eof | TokenKind::Error) => {
                    last.clone()
                }
                _ => match self.lexer.next_token() {
                    Ok(token) => token,
                    Err(err) => {
                        let placeholder = Token::new(TokenKind::Error, "", err.location);
                        self.pending = Some(err);
                        placeholder
                    }
                },
            };
            self.buffer.push_back(next);
        }
    }

    // ===== Helper methods =====

    /// Run `parse` one nesting level deeper, failing past [`MAX_NESTING`]
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING {
            return Err(self.error_at_current("shallower nesting"));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.buffer[0]
    }

    pub(crate) fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Kind of the token `n` positions past the current one (`n < LOOKAHEAD`)
    pub(crate) fn peek_ahead(&self, n: usize) -> TokenKind {
        self.buffer
            .get(n)
            .or_else(|| self.buffer.back())
            .map_or(TokenKind::Eof, |token| token.kind)
    }

    /// Token `n` positions past the current one (`n < LOOKAHEAD`)
    pub(crate) fn peek_nth(&self, n: usize) -> &Token {
        &self.buffer[n.min(self.buffer.len() - 1)]
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = match self.buffer.pop_front() {
            Some(token) => token,
            None => Token::new(TokenKind::Eof, "", SourceLocation::new(1, 0)),
        };
        self.fill();
        token
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.check(TokenKind::Eof)
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    pub(crate) fn match_token(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn expect_token(&mut self, kind: TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(&kind.to_string()))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Spelling, ParseError> {
        if self.check(TokenKind::Ident) {
            let token = self.advance();
            Ok(Spelling::new(token.lexeme, token.location))
        } else {
            Err(self.error_at_current("identifier"))
        }
    }

    /// Diagnostic for the current token.
    ///
    /// When the current token is the placeholder for a failed scan, the parked
    /// lexical error is reported instead.
    pub(crate) fn error_at_current(&self, expected: &str) -> ParseError {
        let token = self.peek();
        if token.kind == TokenKind::Error {
            if let Some(err) = &self.pending {
                debug!("raising parked lexical error: {}", err);
                return ParseError::Lex(err.clone());
            }
        }
        self.error_at(token, expected)
    }

    pub(crate) fn error_at(&self, token: &Token, expected: &str) -> ParseError {
        let err = SyntaxError {
            location: token.location,
            found: token.text().to_string(),
            expected: expected.to_string(),
        };
        debug!("{} (expected {})", err, err.expected);
        ParseError::Syntax(err)
    }
}
