//! Errors reported by the front end as a whole

use crate::parser::{BuildError, LexError, ParseError, SyntaxError};
use std::fmt;

/// Any diagnostic a caller of [`parse_source`](crate::parse_source) can receive
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontendError {
    Lex(LexError),
    Syntax(SyntaxError),
    /// The builder met a tree the parser should never have produced
    Build(BuildError),
}

impl fmt::Display for FrontendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrontendError::Lex(err) => err.fmt(f),
            FrontendError::Syntax(err) => err.fmt(f),
            FrontendError::Build(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for FrontendError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrontendError::Lex(err) => Some(err),
            FrontendError::Syntax(err) => Some(err),
            FrontendError::Build(err) => Some(err),
        }
    }
}

impl From<LexError> for FrontendError {
    fn from(err: LexError) -> Self {
        FrontendError::Lex(err)
    }
}

impl From<ParseError> for FrontendError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Lex(err) => FrontendError::Lex(err),
            ParseError::Syntax(err) => FrontendError::Syntax(err),
        }
    }
}

impl From<BuildError> for FrontendError {
    fn from(err: BuildError) -> Self {
        FrontendError::Build(err)
    }
}
